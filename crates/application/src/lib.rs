//! Ferrous DoH Application Layer
pub mod events;
pub mod ports;
pub mod use_cases;
