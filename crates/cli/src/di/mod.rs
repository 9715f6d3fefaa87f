mod gateway;

pub use gateway::GatewayServices;
