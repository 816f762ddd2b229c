use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};
use crate::platform::types::WorkspaceRef;
use crate::platform::Platform;
use crate::workflow::classify::classify;
use crate::workflow::types::WorkspaceStatus;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Keep waiting through the apply phase instead of stopping at `planned`.
    pub wait_for_apply: bool,
    pub poll_interval: Duration,
    /// Give up after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            wait_for_apply: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// Classify every workspace once, in order, stopping at the first error.
///
/// The result is sorted so busy workspaces come before finished ones.
pub async fn poll_once<P: Platform + ?Sized>(
    platform: &P,
    workspaces: &[WorkspaceRef],
    wait_for_apply: bool,
) -> Result<Vec<WorkspaceStatus>> {
    let mut statuses = Vec::with_capacity(workspaces.len());

    for workspace in workspaces {
        if let Some(status) = classify(platform, workspace, wait_for_apply).await? {
            statuses.push(status);
        }
    }

    statuses.sort_by_key(|s| s.done);
    Ok(statuses)
}

pub fn render_progress(statuses: &[WorkspaceStatus]) -> String {
    let mut out = String::from("\nWaiting for the following workspaces:");
    for status in statuses {
        out.push_str(&format!("\n• {}: {}", status.workspace.name, status.status));
    }
    out
}

/// Poll until every workspace is done.
///
/// Returns the number of ticks it took. Fails on the first fatal error,
/// when `cancel` fires, or when the configured timeout elapses.
pub async fn wait_for_convergence<P: Platform + ?Sized>(
    platform: &P,
    workspaces: &[WorkspaceRef],
    options: &WaitOptions,
    cancel: &CancellationToken,
) -> Result<u64> {
    let deadline = options.timeout.map(|timeout| Instant::now() + timeout);
    let timed_out = || AppError::Timeout(options.timeout.unwrap_or_default());
    let mut tick = 0u64;

    loop {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(timed_out());
        }

        tick += 1;
        tracing::debug!(tick, "Polling workspaces");

        let statuses = poll_once(platform, workspaces, options.wait_for_apply).await?;
        let busy = statuses.iter().filter(|s| !s.done).count();

        if busy == 0 {
            tracing::info!(tick, workspaces = statuses.len(), "All workspaces settled");
            println!("All Terraform workspaces are ready!");
            return Ok(tick);
        }

        let awaiting_user = statuses
            .iter()
            .filter(|s| s.user_action_required == Some(true))
            .count();
        tracing::info!(tick, busy, awaiting_user, "Workspaces still busy");
        println!("{}", render_progress(&statuses));

        let expire = async {
            match deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
            _ = tokio::time::sleep(options.poll_interval) => {}
            _ = expire => return Err(timed_out()),
        }
    }
}
