//! Ferrous DoH Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod doh_request;
pub mod errors;
pub mod upstream_endpoint;

pub use config::{CliOverrides, Config};
pub use dns_message::{DnsMessage, MessageKind, Question, ResponseCode};
pub use dns_record::{Record, RecordData, RecordType};
pub use doh_request::{DohRequest, DohResponse, RequestPayload, ResponseFormat};
pub use errors::DomainError;
pub use upstream_endpoint::UpstreamEndpoint;
