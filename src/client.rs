//! HTTP client for the Regulations.gov v4 public API.

use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    errors::{Error, Verb},
    query::{CommentQuery, DocketQuery, DocumentQuery, Query},
    retry::{with_backoff, RetryPolicy},
    types::{
        CommentDraft, ListResponse, NewResource, RequestEnvelope, Response, SubmissionKey,
        UploadSlip, UploadUrlRequest,
    },
};

const DEFAULT_BASE_URL: &str = "https://api.regulations.gov/v4";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "X-Api-Key";
const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// HTTP client for the Regulations.gov v4 public API.
///
/// Every request carries the API key and the JSON:API content type. The
/// client holds no mutable state beyond its fixed credentials, so it is safe
/// to share across tasks and invoke concurrently.
///
/// GETs are retried per the configured [`RetryPolicy`] when the failure is
/// retryable (network, 429, 5xx). POSTs are issued exactly once: the write
/// endpoints carry no idempotency guarantee, and a caller-level retry of a
/// timed-out POST may create a duplicate server-side resource.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

/// Builder for [`Client`], exposing the base URL (tests), request timeout,
/// and retry policy.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ClientBuilder {
    /// Overrides the base URL. Used for testing with wiremock.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the GET retry policy. Defaults to two retries with a one-second
    /// base backoff.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidQuery(format!("invalid base URL {}: {}", self.base_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(Error::Init)?;
        Ok(Client {
            http,
            api_key: self.api_key,
            base_url: self.base_url,
            retry: self.retry,
        })
    }
}

impl Client {
    /// Creates a client pointing at the production API with default timeout
    /// and retry policy.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Starts a [`ClientBuilder`] with the given API key.
    pub fn builder(api_key: &str) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).base_url(base_url).build()
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            tracing::error!("invalid URL constructed for {}: {}", path, e);
            Error::InvalidQuery(format!("could not construct URL for {}: {}", path, e))
        })
    }

    /// Fetches a paginated list of documents matching the given query.
    pub async fn get_documents(&self, query: &DocumentQuery) -> Result<ListResponse, Error> {
        self.get_list("/documents", query).await
    }

    /// Fetches a single document by ID, optionally expanding its attachments
    /// into the envelope's `included` set.
    pub async fn get_document(
        &self,
        document_id: &str,
        include_attachments: bool,
    ) -> Result<Response, Error> {
        self.get_detail(&format!("/documents/{}", document_id), include_attachments)
            .await
    }

    /// Fetches a paginated list of comments matching the given query.
    pub async fn get_comments(&self, query: &CommentQuery) -> Result<ListResponse, Error> {
        self.get_list("/comments", query).await
    }

    /// Fetches a single comment by ID, optionally expanding its attachments.
    pub async fn get_comment(
        &self,
        comment_id: &str,
        include_attachments: bool,
    ) -> Result<Response, Error> {
        self.get_detail(&format!("/comments/{}", comment_id), include_attachments)
            .await
    }

    /// Fetches a paginated list of dockets matching the given query.
    pub async fn get_dockets(&self, query: &DocketQuery) -> Result<ListResponse, Error> {
        self.get_list("/dockets", query).await
    }

    /// Fetches a single docket by ID.
    pub async fn get_docket(&self, docket_id: &str) -> Result<Response, Error> {
        self.get_detail(&format!("/dockets/{}", docket_id), false).await
    }

    /// Fetches the comment categories defined by an agency.
    pub async fn get_agency_categories(&self, acronym: &str) -> Result<ListResponse, Error> {
        let mut url = self.endpoint_url("/agency-categories")?;
        url.query_pairs_mut().append_pair("filter[acronym]", acronym);
        self.get_json(url).await
    }

    /// Creates a new comment.
    ///
    /// The draft is wrapped as a `comments` resource:
    /// `{"data": {"type": "comments", "attributes": {...}}}`. Not idempotent;
    /// never retried.
    pub async fn post_comment(&self, draft: &CommentDraft) -> Result<Response, Error> {
        let body = RequestEnvelope {
            data: NewResource {
                resource_type: "comments",
                attributes: Some(draft),
            },
        };
        self.post_json("/comments", &body).await
    }

    /// Creates a submission key for grouping file uploads to a single future
    /// comment.
    ///
    /// Not idempotent; never retried. An unused key cannot be invalidated
    /// server-side.
    pub async fn create_submission_key(&self) -> Result<SubmissionKey, Error> {
        let body = RequestEnvelope {
            data: NewResource::<()> {
                resource_type: "submission-keys",
                attributes: None,
            },
        };
        let resp: Response = self.post_json("/submission-keys", &body).await?;
        let key = resp.data.id.ok_or_else(|| Error::Parse {
            url: format!("{}{}", self.base_url, "/submission-keys"),
            detail: "submission key response carried no id".to_string(),
        })?;
        Ok(SubmissionKey::new(key))
    }

    /// Creates a presigned upload URL for one attachment, scoped to the
    /// given submission key.
    pub async fn create_file_upload_url(
        &self,
        submission_key: &SubmissionKey,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadSlip, Error> {
        let body = RequestEnvelope {
            data: NewResource {
                resource_type: "file-upload-urls",
                attributes: Some(UploadUrlRequest {
                    submission_key: submission_key.as_str(),
                    file_name,
                    content_type,
                }),
            },
        };
        let resp: Response = self.post_json("/file-upload-urls", &body).await?;
        serde_json::from_value(resp.data.attributes).map_err(|e| Error::Parse {
            url: format!("{}{}", self.base_url, "/file-upload-urls"),
            detail: format!("upload slip attributes: {}", e),
        })
    }

    /// Uploads attachment bytes to a slip's presigned URL.
    ///
    /// The PUT goes directly to the presigned target: no API key, content
    /// type taken from the slip. Any 2xx confirms the upload.
    pub async fn upload_attachment(&self, slip: &UploadSlip, contents: &[u8]) -> Result<(), Error> {
        tracing::debug!("PUT {} ({} bytes)", slip.presigned_url, contents.len());
        let resp = self
            .http
            .put(slip.presigned_url.as_str())
            .header(CONTENT_TYPE, slip.content_type.as_str())
            .body(contents.to_vec())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("PUT {} failed: {}", slip.presigned_url, e);
                Error::Network {
                    verb: Verb::Put,
                    url: slip.presigned_url.clone(),
                    source: e,
                }
            })?;
        let status = resp.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(resp.headers());
            let body = self.read_body(Verb::Put, &slip.presigned_url, resp).await?;
            tracing::error!(
                "PUT {} returned {}: {}",
                slip.presigned_url,
                status,
                truncate_body(&body)
            );
            return Err(Error::from_status(
                Verb::Put,
                &slip.presigned_url,
                status,
                retry_after,
                body,
            ));
        }
        Ok(())
    }

    async fn get_list<Q: Query>(&self, path: &str, query: &Q) -> Result<ListResponse, Error> {
        query.validate()?;
        let url = query.add_to_url(&self.endpoint_url(path)?);
        self.get_json(url).await
    }

    async fn get_detail(&self, path: &str, include_attachments: bool) -> Result<Response, Error> {
        let mut url = self.endpoint_url(path)?;
        if include_attachments {
            url.query_pairs_mut().append_pair("include", "attachments");
        }
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        with_backoff(&self.retry, || self.fetch(url.clone())).await
    }

    /// One GET attempt. Success is any 2xx.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("GET {} failed: {}", url, e);
                Error::Network {
                    verb: Verb::Get,
                    url: url.to_string(),
                    source: e,
                }
            })?;
        let status = resp.status();
        let retry_after = parse_retry_after(resp.headers());
        let body = self.read_body(Verb::Get, url.as_str(), resp).await?;
        if !status.is_success() {
            tracing::error!("GET {} returned {}: {}", url, status, truncate_body(&body));
            return Err(Error::from_status(
                Verb::Get,
                url.as_str(),
                status,
                retry_after,
                body,
            ));
        }
        self.parse(url.as_str(), &body)
    }

    /// One POST attempt. Success is exactly 200 or 201.
    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.endpoint_url(path)?;
        let payload = serde_json::to_vec(body)
            .map_err(|e| Error::InvalidQuery(format!("could not serialize request body: {}", e)))?;
        tracing::debug!("POST {}", url);
        let resp = self
            .http
            .post(url.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("POST {} failed: {}", url, e);
                Error::Network {
                    verb: Verb::Post,
                    url: url.to_string(),
                    source: e,
                }
            })?;
        let status = resp.status();
        let retry_after = parse_retry_after(resp.headers());
        let response_body = self.read_body(Verb::Post, url.as_str(), resp).await?;
        if status != StatusCode::OK && status != StatusCode::CREATED {
            tracing::error!(
                "POST {} returned {}: {}",
                url,
                status,
                truncate_body(&response_body)
            );
            return Err(Error::from_status(
                Verb::Post,
                url.as_str(),
                status,
                retry_after,
                response_body,
            ));
        }
        self.parse(url.as_str(), &response_body)
    }

    async fn read_body(
        &self,
        verb: Verb,
        url: &str,
        resp: reqwest::Response,
    ) -> Result<String, Error> {
        resp.text().await.map_err(|e| {
            tracing::error!("failed to read response body from {}: {}", url, e);
            Error::Network {
                verb,
                url: url.to_string(),
                source: e,
            }
        })
    }

    fn parse<T: DeserializeOwned>(&self, url: &str, body: &str) -> Result<T, Error> {
        serde_json::from_str::<T>(body).map_err(|e| {
            tracing::error!(
                "failed to parse response from {}: {} | body: {}",
                url,
                e,
                truncate_body(body)
            );
            Error::Parse {
                url: url.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
