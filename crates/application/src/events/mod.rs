pub mod emitter;
pub mod types;

pub use emitter::GatewayEventEmitter;
pub use types::GatewayEvent;
