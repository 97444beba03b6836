//! Comment-creation types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who is submitting the comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitterType {
    Anonymous,
    Individual,
    Organization,
}

/// How the comment reaches the registry. API-submitted comments always
/// carry the `API` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionType {
    Api,
}

/// The attributes of a comment to be created.
///
/// Serializes to the JSON:API `attributes` map of a `comments` resource.
/// Required fields are fixed at construction; everything else is opt-in.
/// Fields this crate does not enumerate can be passed through `with_extra`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    /// ID of the document being commented on.
    pub comment_on_document_id: String,
    /// The comment text.
    pub comment: String,
    /// Always [`SubmissionType::Api`].
    pub submission_type: SubmissionType,
    pub submitter_type: SubmitterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Submission key scoping previously uploaded attachments; set by the
    /// attachment flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_key: Option<String>,
    /// File names of uploaded attachments; set by the attachment flow.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Additional attributes passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentDraft {
    /// Creates a draft with the required attributes. `submissionType` is
    /// fixed to `API`.
    pub fn new(comment_on_document_id: &str, comment: &str, submitter_type: SubmitterType) -> Self {
        Self {
            comment_on_document_id: comment_on_document_id.to_string(),
            comment: comment.to_string(),
            submission_type: SubmissionType::Api,
            submitter_type,
            first_name: None,
            last_name: None,
            organization: None,
            email: None,
            category: None,
            submission_key: None,
            files: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_first_name(mut self, first_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self
    }

    pub fn with_last_name(mut self, last_name: &str) -> Self {
        self.last_name = Some(last_name.to_string());
        self
    }

    pub fn with_organization(mut self, organization: &str) -> Self {
        self.organization = Some(organization.to_string());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Adds an attribute this crate does not enumerate; serialized at the
    /// top level of the attributes map.
    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_draft_serializes_required_attributes_only() {
        let draft = CommentDraft::new("FDA-2009-N-0501-0012", "test comment", SubmitterType::Anonymous);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "commentOnDocumentId": "FDA-2009-N-0501-0012",
                "comment": "test comment",
                "submissionType": "API",
                "submitterType": "ANONYMOUS",
            })
        );
    }

    #[test]
    fn optional_and_extra_attributes_flatten_in() {
        let draft = CommentDraft::new("EPA-HQ-2024-0001-0001", "hello", SubmitterType::Individual)
            .with_first_name("Jane")
            .with_last_name("Smith")
            .with_extra("stateProvinceRegion", serde_json::json!("CA"));
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["submitterType"], "INDIVIDUAL");
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["lastName"], "Smith");
        assert_eq!(value["stateProvinceRegion"], "CA");
        assert!(value.get("organization").is_none());
        assert!(value.get("files").is_none());
    }
}
