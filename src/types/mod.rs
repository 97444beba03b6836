mod envelope;
pub use self::envelope::{ListResponse, NewResource, ResourceObject, Response};
pub(crate) use self::envelope::RequestEnvelope;

mod comment;
pub use self::comment::{CommentDraft, SubmissionType, SubmitterType};

mod upload;
pub use self::upload::{AttachmentFile, SubmissionKey, UploadSlip};
pub(crate) use self::upload::UploadUrlRequest;
