//! JSON:API documents returned by the Terraform Cloud v2 API.
//!
//! Only the fields this crate reads are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// Top-level JSON:API envelope.
#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceData {
    pub attributes: WorkspaceAttributes,
    #[serde(default)]
    pub relationships: WorkspaceRelationships,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceAttributes {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkspaceRelationships {
    #[serde(rename = "latest-run", default)]
    pub latest_run: Option<Relationship>,
}

#[derive(Debug, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
    #[serde(default)]
    pub links: Option<RelationshipLinks>,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipLinks {
    #[serde(default)]
    pub related: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RunData {
    pub id: String,
    pub attributes: RunAttributes,
}

#[derive(Debug, Deserialize)]
pub struct RunAttributes {
    pub status: String,
    #[serde(rename = "plan-only", default)]
    pub plan_only: Option<bool>,
    #[serde(rename = "auto-apply", default)]
    pub auto_apply: Option<bool>,
}
