use crate::platform::types;

use super::models::{RunData, WorkspaceData};

/// Map a JSON:API workspace to our platform Workspace type.
///
/// A `latest-run` relationship whose `data` is null means the workspace has
/// never run.
pub fn map_workspace(workspace: WorkspaceData) -> types::Workspace {
    let latest_run_link = workspace.relationships.latest_run.and_then(|rel| {
        let run = rel.data?;
        let related = rel.links.and_then(|links| links.related);
        Some(related.unwrap_or_else(|| format!("/api/v2/runs/{}", run.id)))
    });

    types::Workspace {
        name: workspace.attributes.name,
        latest_run_link,
    }
}

pub fn map_run(run: RunData) -> types::RunRecord {
    types::RunRecord {
        status: types::RunStatus::from(run.attributes.status.as_str()),
        plan_only: run.attributes.plan_only.unwrap_or(false),
        auto_apply: run.attributes.auto_apply.unwrap_or(false),
        id: run.id,
    }
}
