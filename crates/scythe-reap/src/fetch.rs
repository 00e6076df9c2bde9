//! Paginated fetcher
//!
//! Walks a collection listing page by page, keeps records created strictly
//! before the cutoff date, and stops either when the remote stops supplying
//! a next-page cursor or at the page-count safety valve.

use crate::client::ApiClient;
use crate::error::Result;
use scythe_core::{ResourceKind, ResourceRef, RunConfig};

/// Collect stale resources of one kind
///
/// A non-success page is logged and contributes nothing; the walk continues
/// as long as the cursor allows, so partial results from healthy pages are
/// preserved. Only transport errors propagate.
pub async fn fetch_stale(
    client: &ApiClient,
    kind: ResourceKind,
    config: &RunConfig,
) -> Result<Vec<ResourceRef>> {
    let mut resources = Vec::new();
    let mut page = 1u32;

    loop {
        let listing = client.list_page(kind.collection(), page, config.per_page).await?;

        if listing.status.is_success() {
            for record in listing.records {
                if !config.eligible(record.created_at) {
                    continue;
                }
                match ResourceRef::from_record(kind, record) {
                    Some(resource) => resources.push(resource),
                    None => {
                        tracing::warn!("Skipping {} record without a usable identity", kind);
                    }
                }
            }
        } else {
            tracing::warn!(
                "Listing {} page {} returned {}, skipping page",
                kind.collection(),
                page,
                listing.status
            );
        }

        match listing.next_page {
            None => break,
            Some(next) if next > config.max_pages => {
                tracing::warn!(
                    "Stopping {} listing at page {}: cursor {} exceeds the page cutoff of {}",
                    kind.collection(),
                    page,
                    next,
                    config.max_pages
                );
                break;
            }
            Some(next) => page = next,
        }
    }

    tracing::debug!(
        "Found {} stale {}(s) created before {}",
        resources.len(),
        kind,
        config.delete_before
    );
    Ok(resources)
}
