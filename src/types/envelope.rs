//! JSON:API envelope types shared by every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single `{id, type, attributes}` resource object.
///
/// Attribute shapes vary per resource type and are passed through
/// unvalidated; callers pick out what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceObject {
    /// Resource identifier. Some nested objects omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// JSON:API resource type (e.g. "documents", "comments").
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Opaque attribute map.
    #[serde(default)]
    pub attributes: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

/// Envelope for single-resource lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T = ResourceObject> {
    pub data: T,
    /// Pass-through response metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Related resources when an `include=` expansion was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

/// Envelope for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T = ResourceObject> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

/// A to-be-created resource for POST bodies: `{"type": ..., "attributes": ...}`.
#[derive(Debug, Serialize)]
pub struct NewResource<T> {
    #[serde(rename = "type")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<T>,
}

/// Top-level `{"data": ...}` wrapper applied to every POST body.
#[derive(Debug, Serialize)]
pub(crate) struct RequestEnvelope<T> {
    pub data: T,
}
