//! Unofficial Rust client for the Regulations.gov v4 public API.
//!
//! Query and retrieve documents, comments, and dockets from the federal
//! rulemaking registry, and submit new comments -- optionally with file
//! attachments via the API's three-step submission-key/presigned-URL
//! protocol.
//!
//! ```no_run
//! use regulations_api::{Client, DocumentQuery, Query};
//!
//! # async fn run() -> Result<(), regulations_api::Error> {
//! let client = Client::new("YOUR_API_KEY")?;
//! let docs = client
//!     .get_documents(&DocumentQuery::default().with_search_term("water").with_page_size(5))
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&docs).unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! Responses are JSON:API envelopes with opaque per-resource attributes;
//! everything deserializes losslessly back to JSON, so results render
//! directly for callers that want strings rather than structs.
//!
//! Failed requests surface the verb, full URL, status, and raw response
//! body. GETs are retried with backoff for transient failures; POSTs never
//! are -- comment and submission-key creation are not idempotent, and a
//! retried write can create a duplicate server-side resource.

mod client;
mod errors;
mod query;
mod retry;
mod submit;
pub mod types;

pub use self::client::{Client, ClientBuilder};
pub use self::errors::{Error, Verb};
pub use self::query::{
    CommentQuery, CommentSortBy, DocketQuery, DocketSortBy, DocketType, DocumentQuery,
    DocumentSortBy, DocumentType, Query, QueryCommon, SortDirection, MAX_PAGE, MAX_PAGE_SIZE,
    MIN_PAGE, MIN_PAGE_SIZE,
};
pub use self::retry::{with_backoff, RetryPolicy};
pub use self::submit::{SubmitError, SubmitStep};
