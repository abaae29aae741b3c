//! Record model and reconciliation engine for roadwork status sync.
//!
//! Clients push the records they edited while offline; the engine merges them
//! against the last set the server stored for the same (team, service)
//! namespace and hands back the authoritative result. Transport and file
//! layout live in the server crate.

pub mod error;
pub mod model;
pub mod traits;
pub mod sync;
pub mod store;

pub use error::{Result, SyncError};
pub use model::{Namespace, Status, SyncRecord, SyncSet};
pub use sync::engine::{merge_sets, MergeOutcome, MergeReport, ReconcileOptions, Reconciler};
