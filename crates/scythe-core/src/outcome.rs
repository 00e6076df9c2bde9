//! Per-resource outcomes
//!
//! The deletion state machine returns exactly one [`Outcome`] per resource
//! per run; the aggregator can therefore count without deduplicating.

use crate::resource::ResourceRef;
use serde::{Deserialize, Serialize};

/// Terminal result of driving one resource through the deletion state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// Soft delete accepted; the remote will remove the resource after its
    /// grace period
    MarkedForDeletion(ResourceRef),

    /// The resource is gone (404 on the convergence probe)
    PermanentlyDeleted(ResourceRef),

    /// Deletion could not be completed or verified
    Failed(ResourceRef, FailureDetail),
}

impl Outcome {
    pub fn resource(&self) -> &ResourceRef {
        match self {
            Outcome::MarkedForDeletion(r)
            | Outcome::PermanentlyDeleted(r)
            | Outcome::Failed(r, _) => r,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(..))
    }
}

/// Last observed response for a failed deletion, kept for operator triage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureDetail {
    /// HTTP status of the response, when the failure came from a response
    pub status: Option<u16>,

    /// Response body or diagnostic message
    pub body: String,
}

impl FailureDetail {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Failure that has no HTTP response to capture (e.g. a verification
    /// timeout)
    pub fn note(body: impl Into<String>) -> Self {
        Self {
            status: None,
            body: body.into(),
        }
    }
}

impl std::fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.body),
            None => write!(f, "{}", self.body),
        }
    }
}
