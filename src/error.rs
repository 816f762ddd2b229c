use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("401 - Unauthorized. Please make sure the token is correct.")]
    Unauthorized,

    #[error(
        "Could not find your workspace. Please make sure the organization, workspace names are correct."
    )]
    NotFound,

    #[error("Terraform API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed Terraform API response: {0}")]
    MalformedResponse(String),

    #[error("Latest Terraform run failed for '{workspace}'\n View at: {url}")]
    RunFailed { workspace: String, url: String },

    #[error("Cancelled before all workspaces were ready")]
    Cancelled,

    #[error("Timed out after {0:?} waiting for workspaces")]
    Timeout(Duration),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::MalformedResponse(e.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
