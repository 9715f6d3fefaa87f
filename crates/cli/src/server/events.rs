use ferrous_doh_application::events::GatewayEvent;
use tokio::sync::mpsc;
use tracing::debug;

pub fn spawn_event_logger(mut rx: mpsc::UnboundedReceiver<GatewayEvent>) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match &event {
                GatewayEvent::RequestReceived { format } => {
                    debug!(event = event.name(), format = ?format, "DoH request");
                }
                GatewayEvent::SocketCreated { host, port } => {
                    debug!(event = event.name(), host = %host, port, "Upstream socket");
                }
                GatewayEvent::UpstreamError { host, port, error } => {
                    debug!(event = event.name(), host = %host, port, error = %error, "Upstream error");
                }
            }
        }
    });
}
