use ferrous_doh_domain::ResponseFormat;
use std::sync::Arc;

/// Diagnostics side channel. Nothing in the resolution path depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    RequestReceived {
        format: ResponseFormat,
    },

    /// A fresh socket was opened for one upstream attempt.
    SocketCreated {
        host: Arc<str>,
        port: u16,
    },

    UpstreamError {
        host: Arc<str>,
        port: u16,
        error: String,
    },
}

impl GatewayEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GatewayEvent::RequestReceived { .. } => "request",
            GatewayEvent::SocketCreated { .. } => "socket",
            GatewayEvent::UpstreamError { .. } => "error",
        }
    }
}
