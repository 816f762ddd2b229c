use std::fmt;

/// A workspace to watch, identified by organization and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRef {
    pub organization: String,
    pub name: String,
}

impl WorkspaceRef {
    pub fn new(organization: &str, name: &str) -> Self {
        Self {
            organization: organization.to_string(),
            name: name.to_string(),
        }
    }

    /// Parse a comma-separated workspace list. Entries are trimmed and
    /// blank entries dropped; order is preserved.
    pub fn parse_list(organization: &str, workspaces: &str) -> Vec<Self> {
        workspaces
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Self::new(organization, name))
            .collect()
    }
}

impl fmt::Display for WorkspaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.name)
    }
}

/// A workspace as returned by the platform.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub name: String,
    /// Link to the latest run; `None` when the workspace has never run.
    pub latest_run_link: Option<String>,
}

/// Lifecycle status of a run. Values this crate does not know about are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Pending,
    PlanQueued,
    Planning,
    Planned,
    ApplyQueued,
    Applying,
    Applied,
    Discarded,
    Canceled,
    Errored,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::PlanQueued => "plan_queued",
            RunStatus::Planning => "planning",
            RunStatus::Planned => "planned",
            RunStatus::ApplyQueued => "apply_queued",
            RunStatus::Applying => "applying",
            RunStatus::Applied => "applied",
            RunStatus::Discarded => "discarded",
            RunStatus::Canceled => "canceled",
            RunStatus::Errored => "errored",
            RunStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for RunStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "pending" => RunStatus::Pending,
            "plan_queued" => RunStatus::PlanQueued,
            "planning" => RunStatus::Planning,
            "planned" => RunStatus::Planned,
            "apply_queued" => RunStatus::ApplyQueued,
            "applying" => RunStatus::Applying,
            "applied" => RunStatus::Applied,
            "discarded" => RunStatus::Discarded,
            "canceled" => RunStatus::Canceled,
            "errored" => RunStatus::Errored,
            other => RunStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The latest run of a workspace.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: String,
    pub status: RunStatus,
    pub plan_only: bool,
    pub auto_apply: bool,
}
