#[cfg(feature = "doh-client")]
pub mod client;
pub mod codec;
pub mod store;
pub mod transport;
pub mod upstream;

#[cfg(feature = "doh-client")]
pub use client::DohClient;
pub use codec::DnsCodec;
pub use store::PartitionedAnswerStore;
pub use upstream::{FailoverProber, NetworkExchange, UpstreamExchange};
