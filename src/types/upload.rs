//! Attachment-upload types: submission keys, presigned upload slips, and
//! the caller-supplied file inputs.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque server-issued token scoping a group of file uploads to a single
/// future comment.
///
/// A key is created once and must be consumed by exactly one comment
/// submission; never reuse one across unrelated submissions. The API has no
/// way to invalidate an unused key, so a flow that fails after key creation
/// leaves the key orphaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionKey(String);

impl SubmissionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A presigned upload target issued per file, used exactly once for a
/// direct binary upload and then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSlip {
    /// Time-limited, pre-authorized PUT target.
    pub presigned_url: String,
    pub file_name: String,
    pub content_type: String,
    /// Any additional metadata the server returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file to attach to a comment.
#[derive(Debug, Clone)]
pub struct AttachmentFile {
    pub file_name: String,
    /// MIME type (e.g. "application/pdf").
    pub content_type: String,
    pub contents: Vec<u8>,
}

impl AttachmentFile {
    pub fn new(file_name: &str, content_type: &str, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            contents,
        }
    }
}

/// Attributes of a `file-upload-urls` creation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadUrlRequest<'a> {
    pub submission_key: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
}
