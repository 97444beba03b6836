//! Attachment-upload orchestration.
//!
//! Attaching files to a comment is a three-step protocol with strict
//! ordering: obtain a submission key, obtain a presigned upload URL per file
//! and upload the bytes to it, then post the comment referencing the key and
//! the uploaded file names. The comment must never be posted while any
//! upload is outstanding or failed.

use std::fmt;

use crate::{
    client::Client,
    errors::Error,
    types::{AttachmentFile, CommentDraft, Response},
};

/// The step of the attachment flow at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStep {
    /// Creating the submission key.
    SubmissionKey,
    /// Requesting a presigned upload URL for one file.
    UploadUrl,
    /// Uploading one file's bytes to its presigned URL.
    FileUpload,
    /// Posting the comment.
    CommentPost,
}

impl fmt::Display for SubmitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubmitStep::SubmissionKey => "submission-key creation",
            SubmitStep::UploadUrl => "upload-URL creation",
            SubmitStep::FileUpload => "file upload",
            SubmitStep::CommentPost => "comment creation",
        })
    }
}

/// A failed comment-with-attachments submission.
///
/// Identifies how far the flow progressed so the caller can decide whether
/// to retry and from where. For per-file steps, `file_name` names the
/// attachment that failed.
#[derive(Debug)]
pub struct SubmitError {
    pub step: SubmitStep,
    pub file_name: Option<String>,
    pub source: Error,
}

impl SubmitError {
    fn at(step: SubmitStep, source: Error) -> Self {
        Self {
            step,
            file_name: None,
            source,
        }
    }

    fn at_file(step: SubmitStep, file_name: &str, source: Error) -> Self {
        Self {
            step,
            file_name: Some(file_name.to_string()),
            source,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file_name {
            Some(file_name) => write!(
                f,
                "comment submission failed during {} for '{}': {}",
                self.step, file_name, self.source
            ),
            None => write!(
                f,
                "comment submission failed during {}: {}",
                self.step, self.source
            ),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl Client {
    /// Submits a comment with file attachments.
    ///
    /// Drives the protocol in order: one submission-key creation, then per
    /// file (in the given order) an upload-URL request followed by the
    /// binary upload, and finally the comment POST referencing the key and
    /// the uploaded file names. The comment is only posted once every upload
    /// has completed; the first failure aborts the flow and reports the step
    /// (and file) that failed.
    ///
    /// A failure after key creation leaves the key orphaned -- the API has
    /// no way to invalidate an unused key. None of these calls are retried;
    /// the write endpoints are not idempotent, and a caller choosing to
    /// retry the whole flow should start over with a fresh key.
    pub async fn submit_comment_with_attachments(
        &self,
        draft: CommentDraft,
        files: &[AttachmentFile],
    ) -> Result<Response, SubmitError> {
        let key = self
            .create_submission_key()
            .await
            .map_err(|e| SubmitError::at(SubmitStep::SubmissionKey, e))?;

        let mut uploaded = Vec::with_capacity(files.len());
        for file in files {
            let slip = self
                .create_file_upload_url(&key, &file.file_name, &file.content_type)
                .await
                .map_err(|e| SubmitError::at_file(SubmitStep::UploadUrl, &file.file_name, e))?;
            self.upload_attachment(&slip, &file.contents)
                .await
                .map_err(|e| SubmitError::at_file(SubmitStep::FileUpload, &file.file_name, e))?;
            uploaded.push(file.file_name.clone());
        }

        let mut draft = draft;
        draft.submission_key = Some(key.as_str().to_string());
        draft.files = uploaded;
        self.post_comment(&draft)
            .await
            .map_err(|e| SubmitError::at(SubmitStep::CommentPost, e))
    }
}
