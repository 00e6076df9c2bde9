//! Scythe Core
//!
//! Data model and run configuration shared by the Scythe cleanup engine and
//! the CLI. This crate performs no I/O: it describes what a run operates on
//! (resource references discovered through a remote API) and how it is
//! parameterized (cutoff date, dry-run/permanent-delete flags, paging and
//! polling bounds).

pub mod config;
pub mod error;
pub mod outcome;
pub mod resource;

// Re-exports
pub use config::{PollConfig, RunConfig, yesterday};
pub use error::ModelError;
pub use outcome::{FailureDetail, Outcome};
pub use resource::{ResourceKind, ResourceRecord, ResourceRef};
