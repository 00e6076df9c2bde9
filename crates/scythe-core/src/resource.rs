//! Resource identity and metadata
//!
//! A [`ResourceRef`] is the minimal identity a remote resource carries
//! through the cleanup pipeline: what kind it is, how to address it, when it
//! was created, and whether the remote has already scheduled it for
//! deletion.

use crate::error::ModelError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of remote resource a cleanup run can sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Project,
    Group,
    User,
}

impl ResourceKind {
    /// API collection path for the listing endpoint
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Project => "projects",
            ResourceKind::Group => "groups",
            ResourceKind::User => "users",
        }
    }

    /// Whether the remote stages deletion for this kind behind a grace
    /// period (marked-for-deletion) instead of removing it immediately.
    ///
    /// Projects and groups are soft-deleted first and expose a
    /// `marked_for_deletion_on` date while the grace period runs. Users are
    /// removed in a single phase and never carry that attribute.
    pub fn two_phase(&self) -> bool {
        matches!(self, ResourceKind::Project | ResourceKind::Group)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Project => write!(f, "project"),
            ResourceKind::Group => write!(f, "group"),
            ResourceKind::User => write!(f, "user"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "project" => Ok(ResourceKind::Project),
            "group" => Ok(ResourceKind::Group),
            "user" => Ok(ResourceKind::User),
            other => Err(ModelError::UnknownResourceKind(other.to_string())),
        }
    }
}

/// One record as returned by the listing and get endpoints
///
/// Only the fields the engine reads are modeled; everything else in the
/// response body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRecord {
    #[serde(default)]
    pub full_path: Option<String>,

    #[serde(default)]
    pub path_with_namespace: Option<String>,

    #[serde(default)]
    pub web_url: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub marked_for_deletion_on: Option<NaiveDate>,
}

impl ResourceRecord {
    /// Identity of the record: first non-empty of `full_path`,
    /// `path_with_namespace`, `web_url`.
    pub fn identity(&self) -> Option<&str> {
        [&self.full_path, &self.path_with_namespace, &self.web_url]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

/// Identity and metadata of one resource moving through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource kind
    pub kind: ResourceKind,

    /// Identity path, e.g. "sandbox/stale-project-42"
    pub path: String,

    /// When the resource was created on the remote
    pub created_at: DateTime<Utc>,

    /// Date the remote scheduled permanent removal, if already soft-deleted
    pub marked_for_deletion_on: Option<NaiveDate>,
}

impl ResourceRef {
    /// Build a reference from a parsed API record. Returns `None` when the
    /// record carries no usable identity.
    pub fn from_record(kind: ResourceKind, record: ResourceRecord) -> Option<Self> {
        let path = record.identity()?.to_string();
        Some(Self {
            kind,
            path,
            created_at: record.created_at,
            marked_for_deletion_on: record.marked_for_deletion_on,
        })
    }

    /// API endpoint of this resource, relative to the API base
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.kind.collection(), encode_path(&self.path))
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

/// Escape path separators so a hierarchical identity fits into a single
/// URL path segment.
fn encode_path(path: &str) -> String {
    path.replace('/', "%2F")
}
