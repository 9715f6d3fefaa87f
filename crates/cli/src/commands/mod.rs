mod query;

pub use query::{run_query, QueryArgs};
