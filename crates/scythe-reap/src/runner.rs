//! Batch runner
//!
//! Applies the deletion state machine to a collection of resources,
//! strictly sequentially. One resource's failure never aborts the batch;
//! outcomes are collected in fetch order.

use crate::client::ApiClient;
use crate::delete::delete_resource;
use crate::error::Result;
use scythe_core::{Outcome, ResourceRef, RunConfig};

/// Process a batch of resources, returning one outcome per resource
///
/// In dry-run mode no delete request is issued at all: each candidate is
/// reported as a side-channel listing and the outcome sequence stays empty.
pub async fn run_batch(
    client: &ApiClient,
    resources: &[ResourceRef],
    config: &RunConfig,
) -> Result<Vec<Outcome>> {
    if config.dry_run {
        for resource in resources {
            tracing::info!(
                "Dry run: would delete {} (created {})",
                resource,
                resource.created_at.date_naive()
            );
        }
        return Ok(Vec::new());
    }

    let mut outcomes = Vec::with_capacity(resources.len());
    for resource in resources {
        let outcome = delete_resource(client, resource, config).await?;
        match &outcome {
            Outcome::MarkedForDeletion(r) => tracing::info!("{} marked for deletion", r),
            Outcome::PermanentlyDeleted(r) => tracing::info!("{} permanently deleted", r),
            Outcome::Failed(r, detail) => tracing::warn!("{} failed: {}", r, detail),
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
