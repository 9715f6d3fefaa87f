mod events;
mod web;

pub use events::spawn_event_logger;
pub use web::start_web_server;
