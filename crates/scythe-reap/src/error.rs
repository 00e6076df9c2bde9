//! Engine error types
//!
//! Only unrecoverable transport-level problems surface as errors here.
//! Per-resource deletion failures are data ([`Outcome::Failed`]) and
//! per-page listing failures are logged and skipped, so that one bad
//! response never aborts a whole run.
//!
//! [`Outcome::Failed`]: scythe_core::Outcome::Failed

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReapError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReapError>;
