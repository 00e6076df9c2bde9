//! Scythe Reap
//!
//! The resource-cleanup lifecycle engine: discovers stale remote resources
//! through a paginated listing API, drives each one through a deletion state
//! machine (active → marked-for-deletion → permanently-deleted), polls for
//! eventual-consistency convergence, and aggregates per-resource outcomes
//! into a run-level report.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌───────────────┐    ┌──────────┐
//! │ Fetcher  │ ─▶ │ Batch Runner │ ─▶ │ State Machine │ ─▶ │ Report   │
//! │ (fetch)  │    │ (runner)     │    │ (delete)      │    │ (report) │
//! └──────────┘    └──────────────┘    └───────────────┘    └──────────┘
//! ```
//!
//! Data flows one direction; each invocation is a fresh run with its own
//! cutoff date and result set. Resources are processed strictly
//! sequentially: the remote API is the bottleneck and the rate-limit
//! budget is controlled by not parallelizing.

pub mod client;
pub mod delete;
pub mod error;
pub mod fetch;
pub mod report;
pub mod runner;

// Re-exports
pub use client::{ApiClient, ApiResponse, ListPage};
pub use delete::{delete_resource, wait_for_convergence};
pub use error::{ReapError, Result};
pub use fetch::fetch_stale;
pub use report::RunReport;
pub use runner::run_batch;
