pub mod status;
pub mod record;
pub mod namespace;

pub use namespace::Namespace;
pub use record::{SyncRecord, SyncSet};
pub use status::Status;
