//! Scripted in-memory platform for classifier and loop tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

#[derive(Default)]
struct Script {
    /// Runs returned in order; the last one repeats forever.
    runs: VecDeque<RunRecord>,
    workspace_fetches: usize,
}

#[derive(Default)]
pub struct FakePlatform {
    scripts: Mutex<HashMap<String, Script>>,
}

pub fn run(id: &str, status: &str) -> RunRecord {
    RunRecord {
        id: id.to_string(),
        status: RunStatus::from(status),
        plan_only: false,
        auto_apply: false,
    }
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a workspace that has never run.
    pub fn without_runs(self, workspace: &str) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(workspace.to_string(), Script::default());
        self
    }

    /// Register a workspace whose latest run goes through `runs` in order,
    /// one per fetch.
    pub fn with_runs(self, workspace: &str, runs: Vec<RunRecord>) -> Self {
        self.scripts.lock().unwrap().insert(
            workspace.to_string(),
            Script {
                runs: runs.into(),
                workspace_fetches: 0,
            },
        );
        self
    }

    /// Replace the latest run of a workspace.
    pub fn set_run(&self, workspace: &str, run: RunRecord) {
        let mut scripts = self.scripts.lock().unwrap();
        let script = scripts.entry(workspace.to_string()).or_default();
        script.runs = VecDeque::from(vec![run]);
    }

    /// How many times the workspace resource has been fetched.
    pub fn fetches(&self, workspace: &str) -> usize {
        self.scripts
            .lock()
            .unwrap()
            .get(workspace)
            .map_or(0, |s| s.workspace_fetches)
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn get_workspace(&self, workspace: &WorkspaceRef) -> Result<Workspace> {
        let mut scripts = self.scripts.lock().unwrap();
        let script = scripts.get_mut(&workspace.name).ok_or(AppError::NotFound)?;
        script.workspace_fetches += 1;

        Ok(Workspace {
            name: workspace.name.clone(),
            latest_run_link: (!script.runs.is_empty())
                .then(|| format!("/api/v2/runs/{}", workspace.name)),
        })
    }

    async fn get_run(&self, link: &str) -> Result<RunRecord> {
        let name = link.rsplit('/').next().unwrap_or_default();
        let mut scripts = self.scripts.lock().unwrap();
        let script = scripts.get_mut(name).ok_or(AppError::NotFound)?;

        if script.runs.len() > 1 {
            script.runs.pop_front().ok_or(AppError::NotFound)
        } else {
            script.runs.front().cloned().ok_or(AppError::NotFound)
        }
    }

    fn run_url(&self, workspace: &WorkspaceRef, run_id: &str) -> String {
        format!(
            "https://app.terraform.io/app/{}/workspaces/{}/runs/{run_id}",
            workspace.organization, workspace.name
        )
    }
}
