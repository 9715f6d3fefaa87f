pub mod exchange;
pub mod prober;

pub use exchange::{NetworkExchange, UpstreamExchange};
pub use prober::FailoverProber;
