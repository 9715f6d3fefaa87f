pub mod handle_doh_request;
pub mod resolve_query;

pub use handle_doh_request::HandleDohRequestUseCase;
pub use resolve_query::{AnswerSource, Resolution, ResolveQueryUseCase};
