pub mod terraform;
pub mod types;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetch a workspace by organization and name.
    async fn get_workspace(&self, workspace: &WorkspaceRef) -> Result<Workspace>;

    /// Fetch a run through a link returned by the API.
    async fn get_run(&self, link: &str) -> Result<RunRecord>;

    /// Browser URL for a run, for humans to inspect or apply it.
    fn run_url(&self, workspace: &WorkspaceRef, run_id: &str) -> String;
}
