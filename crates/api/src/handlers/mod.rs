pub mod cache;
pub mod doh;
pub mod health;

pub use cache::{get_cache_stats, reset_cache};
pub use doh::{doh_get, doh_post};
pub use health::health_check;
