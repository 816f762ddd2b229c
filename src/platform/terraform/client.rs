use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

use super::mapper;
use super::models::{Document, RunData, WorkspaceData};

pub const DEFAULT_API_URL: &str = "https://app.terraform.io";
const JSON_API: &str = "application/vnd.api+json";

pub struct TerraformClient {
    client: Client,
    base_url: String,
    token: String,
}

// Manual Debug impl to avoid leaking the API token
impl std::fmt::Debug for TerraformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerraformClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TerraformClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(AppError::Config("Terraform API token is empty".to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Relative paths are joined onto the base URL; absolute links returned
    /// by the API are used as-is.
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// GET a resource and unwrap the `data` member of its JSON:API envelope.
    pub async fn fetch_resource<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.resolve(path);
        tracing::debug!(url = %url, "Terraform API request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, JSON_API)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(AppError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(AppError::NotFound),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::Api { status, body });
            }
            _ => {}
        }

        let body = response.text().await?;
        let document: Document<T> = serde_json::from_str(&body)?;
        Ok(document.data)
    }
}

#[async_trait]
impl Platform for TerraformClient {
    async fn get_workspace(&self, workspace: &WorkspaceRef) -> Result<Workspace> {
        let path = format!(
            "/api/v2/organizations/{}/workspaces/{}",
            urlencoding::encode(&workspace.organization),
            urlencoding::encode(&workspace.name)
        );
        let data: WorkspaceData = self.fetch_resource(&path).await?;
        Ok(mapper::map_workspace(data))
    }

    async fn get_run(&self, link: &str) -> Result<RunRecord> {
        let data: RunData = self.fetch_resource(link).await?;
        Ok(mapper::map_run(data))
    }

    fn run_url(&self, workspace: &WorkspaceRef, run_id: &str) -> String {
        format!(
            "{}/app/{}/workspaces/{}/runs/{run_id}",
            self.base_url,
            urlencoding::encode(&workspace.organization),
            urlencoding::encode(&workspace.name)
        )
    }
}
