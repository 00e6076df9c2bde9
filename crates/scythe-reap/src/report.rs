//! Outcome aggregation and run reporting
//!
//! Groups per-resource outcomes by tag, counts successes per resource kind,
//! and keeps the full failure list with captured responses for operator
//! triage.

use scythe_core::{FailureDetail, Outcome, ResourceKind, ResourceRef};
use std::collections::BTreeMap;

/// Aggregated view of one run's outcomes
#[derive(Debug, Default)]
pub struct RunReport {
    marked: BTreeMap<ResourceKind, usize>,
    deleted: BTreeMap<ResourceKind, usize>,
    failed: Vec<(ResourceRef, FailureDetail)>,
    total: usize,
}

impl RunReport {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            report.total += 1;
            match outcome {
                Outcome::MarkedForDeletion(r) => {
                    *report.marked.entry(r.kind).or_insert(0) += 1;
                }
                Outcome::PermanentlyDeleted(r) => {
                    *report.deleted.entry(r.kind).or_insert(0) += 1;
                }
                Outcome::Failed(r, detail) => {
                    report.failed.push((r.clone(), detail.clone()));
                }
            }
        }
        report
    }

    /// Distinguishes "ran and found nothing" from a zero-count summary
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Failed outcomes with their last observed response
    pub fn failed(&self) -> &[(ResourceRef, FailureDetail)] {
        &self.failed
    }
}

fn format_counts(counts: &BTreeMap<ResourceKind, usize>) -> String {
    counts
        .iter()
        .map(|(kind, count)| format!("{} {}(s)", count, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "Nothing to report: no deletion was attempted.");
        }

        writeln!(f, "Processed {} resource(s):", self.total)?;
        if !self.marked.is_empty() {
            writeln!(f, "  marked for deletion: {}", format_counts(&self.marked))?;
        }
        if !self.deleted.is_empty() {
            writeln!(f, "  permanently deleted: {}", format_counts(&self.deleted))?;
        }
        if self.failed.is_empty() {
            write!(f, "  failed: none")?;
        } else {
            write!(f, "  failed: {} resource(s)", self.failed.len())?;
            for (resource, detail) in &self.failed {
                write!(f, "\n    {}: {}", resource, detail)?;
            }
        }
        Ok(())
    }
}
