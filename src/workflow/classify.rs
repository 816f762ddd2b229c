use crate::error::{AppError, Result};
use crate::platform::types::{RunRecord, RunStatus, WorkspaceRef};
use crate::platform::Platform;
use crate::workflow::types::WorkspaceStatus;

/// Fetch the latest run of a workspace and classify it.
///
/// Returns `Ok(None)` when the workspace has never run; such workspaces are
/// left out of the tick entirely.
pub async fn classify<P: Platform + ?Sized>(
    platform: &P,
    workspace: &WorkspaceRef,
    wait_for_apply: bool,
) -> Result<Option<WorkspaceStatus>> {
    let remote = platform.get_workspace(workspace).await?;

    let Some(link) = remote.latest_run_link else {
        tracing::warn!(workspace = %workspace.name, "No runs associated with workspace");
        return Ok(None);
    };

    let run = platform.get_run(&link).await?;
    let url = platform.run_url(workspace, &run.id);

    let verdict = classify_run(workspace, &run, &url, wait_for_apply)?;
    tracing::debug!(
        workspace = %workspace.name,
        status = %run.status,
        done = verdict.done,
        "Classified latest run"
    );
    Ok(Some(verdict))
}

/// Decide the verdict for a fetched run. The first matching rule wins.
pub fn classify_run(
    workspace: &WorkspaceRef,
    run: &RunRecord,
    url: &str,
    wait_for_apply: bool,
) -> Result<WorkspaceStatus> {
    let status = run.status.as_str();

    match run.status {
        RunStatus::Errored => {
            return Err(AppError::RunFailed {
                workspace: workspace.name.clone(),
                url: url.to_string(),
            })
        }
        RunStatus::Planning | RunStatus::PlanQueued => {
            return Ok(WorkspaceStatus::busy(workspace, status))
        }
        _ => {}
    }

    // Plan-only runs never apply, so they are finished once planned.
    if wait_for_apply && !run.plan_only {
        match run.status {
            RunStatus::Planned if !run.auto_apply => {
                return Ok(WorkspaceStatus::awaiting_user(
                    workspace,
                    format!("{status} (⚠️ waiting for you to run apply at {url})"),
                ));
            }
            RunStatus::Planned | RunStatus::Applying | RunStatus::ApplyQueued => {
                return Ok(WorkspaceStatus::busy(workspace, status));
            }
            _ => {}
        }
    }

    Ok(WorkspaceStatus::done(workspace, status))
}
