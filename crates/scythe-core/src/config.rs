//! Run configuration
//!
//! A [`RunConfig`] is built once at process start and passed by reference
//! into every component. No component reads the environment directly; the
//! CLI layer owns flag and environment parsing.

use chrono::{Days, NaiveDate, Utc};
use std::time::Duration;

/// Default listing page size
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Safety valve: never walk a listing past this many pages
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Bounds for the convergence poll loop
///
/// Both values are explicit parameters rather than buried constants so tests
/// can shrink the window to milliseconds.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between convergence probes
    pub interval: Duration,

    /// Total time to wait before giving up
    pub deadline: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            deadline: Duration::from_secs(60),
        }
    }
}

/// Immutable parameters for one cleanup run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL of the target API, e.g. "https://example.com/api/v4"
    pub api_base: String,

    /// Credential presented as a bearer token
    pub token: String,

    /// Only resources created strictly before this date are eligible
    pub delete_before: NaiveDate,

    /// Report what would be deleted without issuing any mutating request
    pub dry_run: bool,

    /// Follow the soft delete with a permanent delete
    pub permanently_delete: bool,

    /// Listing page size
    pub per_page: u32,

    /// Page-count cutoff for a single listing walk
    pub max_pages: u32,

    /// Convergence poll bounds
    pub poll: PollConfig,
}

impl RunConfig {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            token: token.into(),
            delete_before: yesterday(),
            dry_run: false,
            permanently_delete: false,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            poll: PollConfig::default(),
        }
    }

    /// Age filter: strictly older than the cutoff date
    pub fn eligible(&self, created_at: chrono::DateTime<Utc>) -> bool {
        created_at.date_naive() < self.delete_before
    }
}

/// Default cutoff: the calendar day before today
pub fn yesterday() -> NaiveDate {
    Utc::now().date_naive() - Days::new(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = RunConfig::new("https://example.com/api/v4", "token");
        assert_eq!(config.delete_before, yesterday());
        assert!(!config.dry_run);
        assert!(!config.permanently_delete);
        assert_eq!(config.per_page, 100);
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.poll.interval, Duration::from_secs(1));
        assert_eq!(config.poll.deadline, Duration::from_secs(60));
    }

    #[test]
    fn test_eligible_is_strictly_before_cutoff() {
        let mut config = RunConfig::new("https://example.com/api/v4", "token");
        config.delete_before = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let created_before = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let created_on = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let created_after = Utc.with_ymd_and_hms(2024, 1, 11, 8, 0, 0).unwrap();

        assert!(config.eligible(created_before));
        assert!(!config.eligible(created_on));
        assert!(!config.eligible(created_after));
    }
}
