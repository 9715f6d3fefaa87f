mod answer_store;
mod message_codec;
mod upstream_prober;

pub use answer_store::{AnswerStore, StoreStats};
pub use message_codec::MessageCodec;
pub use upstream_prober::{EndpointAnswer, ProbeReport, UpstreamProber};
