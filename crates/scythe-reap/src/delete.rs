//! Deletion state machine and convergence polling
//!
//! Drives one resource through soft delete, poll-for-convergence, and the
//! optional hard delete, producing exactly one [`Outcome`]. Remote 4xx/5xx
//! responses become `Outcome::Failed`; only transport errors propagate.

use crate::client::{ApiClient, ApiResponse};
use crate::error::Result;
use reqwest::StatusCode;
use scythe_core::{FailureDetail, Outcome, PollConfig, ResourceRef, RunConfig};
use tokio::time::{Instant, sleep};

/// Idempotency shortcut: a delete response carrying this phrase means a
/// prior run already soft-deleted the resource. The remote reports it as an
/// error status, so the match is on the body. Matching a literal message is
/// fragile (the remote could reword it); a structured error code would be
/// preferable if the API ever grows one.
const ALREADY_MARKED: &str = "already marked for deletion";

/// Drive one resource to a terminal state
///
/// Safe to repeat: a resource soft-deleted by an earlier partial run takes
/// the idempotency shortcut, and a resource that is already gone converges
/// through the 404 probe.
pub async fn delete_resource(
    client: &ApiClient,
    resource: &ResourceRef,
    config: &RunConfig,
) -> Result<Outcome> {
    let endpoint = resource.endpoint();

    tracing::info!("Deleting {}", resource);
    let response = client.delete(&endpoint).await?;

    if !(response.is_success() || response.body.contains(ALREADY_MARKED)) {
        // A 404 (resource vanished between discovery and delete) does not
        // match the shortcut and is reported as a failure.
        tracing::warn!("Delete request for {} returned {}", resource, response.status);
        return Ok(Outcome::Failed(resource.clone(), response.detail()));
    }

    if !wait_for_convergence(client, resource, false, &config.poll).await? {
        tracing::debug!(
            "{} did not converge within {:?}",
            resource,
            config.poll.deadline
        );
    }

    let probe = client.get(&endpoint).await?;
    if probe.status == StatusCode::NOT_FOUND {
        // Gone outright. Some kinds skip the grace period entirely.
        return Ok(Outcome::PermanentlyDeleted(resource.clone()));
    }

    if !resource.kind.two_phase() {
        // Single-phase kind still present after the poll window: the
        // deletion cannot be verified as complete.
        return Ok(Outcome::Failed(resource.clone(), probe.detail()));
    }

    if config.permanently_delete {
        return hard_delete(client, resource, probe, config).await;
    }

    Ok(Outcome::MarkedForDeletion(resource.clone()))
}

/// Second-stage delete with the explicit permanent-removal marker
///
/// The soft delete may have renamed the resource (e.g. a suffixed path), so
/// the freshly re-fetched record, not the originally discovered one, is the
/// delete target.
async fn hard_delete(
    client: &ApiClient,
    resource: &ResourceRef,
    fresh: ApiResponse,
    config: &RunConfig,
) -> Result<Outcome> {
    if !fresh.is_success() {
        tracing::warn!("Re-fetch of {} returned {}", resource, fresh.status);
        return Ok(Outcome::Failed(resource.clone(), fresh.detail()));
    }

    let record = fresh.record()?;
    let Some(fresh_ref) = ResourceRef::from_record(resource.kind, record) else {
        return Ok(Outcome::Failed(
            resource.clone(),
            FailureDetail::note("re-fetched record has no usable identity"),
        ));
    };

    tracing::info!("Permanently deleting {}", fresh_ref);
    let response = client
        .delete_permanently(&fresh_ref.endpoint(), &fresh_ref.path)
        .await?;

    if !(response.is_success() || response.body.contains(ALREADY_MARKED)) {
        tracing::warn!(
            "Permanent delete of {} returned {}",
            fresh_ref,
            response.status
        );
        return Ok(Outcome::Failed(fresh_ref, response.detail()));
    }

    if wait_for_convergence(client, &fresh_ref, true, &config.poll).await? {
        Ok(Outcome::PermanentlyDeleted(fresh_ref))
    } else {
        tracing::warn!("{} still present after permanent delete", fresh_ref);
        Ok(Outcome::Failed(
            fresh_ref,
            FailureDetail::note("resource still present after permanent delete"),
        ))
    }
}

/// Bounded wait for the remote state to reflect the requested deletion
///
/// Probes every `poll.interval` until `poll.deadline`; a timeout yields
/// `false`, never an error. With `permanent` set, only a 404 counts as
/// converged. Otherwise a 404 also converges (the kind skipped the grace
/// period), as does a re-fetched record that now carries a
/// marked-for-deletion date.
pub async fn wait_for_convergence(
    client: &ApiClient,
    resource: &ResourceRef,
    permanent: bool,
    poll: &PollConfig,
) -> Result<bool> {
    let endpoint = resource.endpoint();
    let deadline = Instant::now() + poll.deadline;

    loop {
        let response = client.get(&endpoint).await?;

        if response.status == StatusCode::NOT_FOUND {
            return Ok(true);
        }
        if !permanent && response.is_success() {
            if let Ok(record) = response.record() {
                if record.marked_for_deletion_on.is_some() {
                    return Ok(true);
                }
            }
        }

        if Instant::now() >= deadline {
            return Ok(false);
        }
        sleep(poll.interval).await;
    }
}
