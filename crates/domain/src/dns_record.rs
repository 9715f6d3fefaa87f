pub mod record;
pub mod record_type;

pub use record::{Record, RecordData};
pub use record_type::RecordType;
