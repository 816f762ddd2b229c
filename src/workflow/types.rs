use crate::platform::types::WorkspaceRef;

/// Verdict for one workspace in one polling tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceStatus {
    pub workspace: WorkspaceRef,
    /// Human-readable label, usually the raw run status.
    pub status: String,
    pub done: bool,
    /// Set when the run is parked until someone confirms the apply.
    pub user_action_required: Option<bool>,
}

impl WorkspaceStatus {
    pub fn busy(workspace: &WorkspaceRef, status: impl Into<String>) -> Self {
        Self {
            workspace: workspace.clone(),
            status: status.into(),
            done: false,
            user_action_required: None,
        }
    }

    pub fn done(workspace: &WorkspaceRef, status: impl Into<String>) -> Self {
        Self {
            done: true,
            ..Self::busy(workspace, status)
        }
    }

    pub fn awaiting_user(workspace: &WorkspaceRef, status: impl Into<String>) -> Self {
        Self {
            user_action_required: Some(true),
            ..Self::busy(workspace, status)
        }
    }
}
