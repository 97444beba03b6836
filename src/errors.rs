//! Error types for the API client.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;

/// HTTP verb of the request that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
        })
    }
}

/// Errors that can occur when talking to the API.
///
/// Every variant produced by a request carries the verb and full URL, and --
/// where a response exists -- the status code and raw body, so a failure can
/// be diagnosed without re-issuing the request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to construct HTTP client")]
    Init(#[source] reqwest::Error),
    /// The request never produced a response (connect failure, timeout,
    /// or the body could not be read). Retryable.
    #[error("{verb} {url} failed: {source}")]
    Network {
        verb: Verb,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API rejected the credentials (401 or 403). Terminal until the
    /// caller fixes the API key.
    #[error("{verb} {url} rejected with status {status}: check the API key")]
    Auth {
        verb: Verb,
        url: String,
        status: u16,
        body: String,
    },
    /// The API rejected the request payload (422). Terminal;
    /// [`Error::field_errors`] surfaces per-field detail when present.
    #[error("{verb} {url} failed validation (status 422)")]
    Validation { verb: Verb, url: String, body: String },
    /// The API throttled the request (429). Retryable after backing off;
    /// `retry_after` carries the server's `Retry-After` hint in seconds.
    #[error("{verb} {url} was rate limited (status 429)")]
    RateLimited {
        verb: Verb,
        url: String,
        retry_after: Option<u64>,
        body: String,
    },
    /// The API returned a 5xx. Retryable with bounded attempts.
    #[error("{verb} {url} failed with server status {status}")]
    Server {
        verb: Verb,
        url: String,
        status: u16,
        body: String,
    },
    /// Any other non-success status, including a POST response that is 2xx
    /// but neither 200 nor 201.
    #[error("{verb} {url} failed with status {status}")]
    Unexpected {
        verb: Verb,
        url: String,
        status: u16,
        body: String,
    },
    /// The response body was not the expected envelope.
    #[error("failed to parse response from {url}: {detail}")]
    Parse { url: String, detail: String },
    /// The request failed client-side validation (paging bounds, URL or
    /// body construction); nothing was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl Error {
    /// Classifies a non-success status into an error variant.
    pub(crate) fn from_status(
        verb: Verb,
        url: &str,
        status: StatusCode,
        retry_after: Option<u64>,
        body: String,
    ) -> Self {
        let url = url.to_string();
        match status.as_u16() {
            401 | 403 => Error::Auth {
                verb,
                url,
                status: status.as_u16(),
                body,
            },
            422 => Error::Validation { verb, url, body },
            429 => Error::RateLimited {
                verb,
                url,
                retry_after,
                body,
            },
            500..=599 => Error::Server {
                verb,
                url,
                status: status.as_u16(),
                body,
            },
            _ => Error::Unexpected {
                verb,
                url,
                status: status.as_u16(),
                body,
            },
        }
    }

    /// The HTTP status code, for variants that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth { status, .. }
            | Error::Server { status, .. }
            | Error::Unexpected { status, .. } => Some(*status),
            Error::Validation { .. } => Some(422),
            Error::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// The raw response body, for variants that carry one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Auth { body, .. }
            | Error::Validation { body, .. }
            | Error::RateLimited { body, .. }
            | Error::Server { body, .. }
            | Error::Unexpected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether a retry with backoff can reasonably succeed.
    ///
    /// True for network failures, rate limiting, and server errors. The
    /// client only ever retries GETs: the write endpoints have no
    /// idempotency guarantee, so retrying a timed-out POST may create a
    /// duplicate server-side resource.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Network { .. } | Error::RateLimited { .. } | Error::Server { .. }
        )
    }

    /// The server's `Retry-After` hint, if one was sent on a 429.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimited {
                retry_after: Some(secs),
                ..
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    /// Field-level detail from a validation failure.
    ///
    /// The API reports 422s as a JSON:API error document
    /// (`{"errors": [{"detail": ...}, ...]}`). Returns the `detail` strings,
    /// or an empty vec when the body does not parse as such a document.
    pub fn field_errors(&self) -> Vec<String> {
        let Error::Validation { body, .. } = self else {
            return Vec::new();
        };
        let Ok(doc) = serde_json::from_str::<serde_json::Value>(body) else {
            return Vec::new();
        };
        doc.get("errors")
            .and_then(|e| e.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("detail").and_then(|d| d.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16) -> Error {
        Error::from_status(
            Verb::Get,
            "https://example.com/documents",
            StatusCode::from_u16(status).unwrap(),
            None,
            String::new(),
        )
    }

    #[test]
    fn status_classification() {
        assert!(matches!(classify(401), Error::Auth { status: 401, .. }));
        assert!(matches!(classify(403), Error::Auth { status: 403, .. }));
        assert!(matches!(classify(422), Error::Validation { .. }));
        assert!(matches!(classify(429), Error::RateLimited { .. }));
        assert!(matches!(classify(500), Error::Server { status: 500, .. }));
        assert!(matches!(classify(503), Error::Server { status: 503, .. }));
        assert!(matches!(
            classify(404),
            Error::Unexpected { status: 404, .. }
        ));
    }

    #[test]
    fn retryability() {
        assert!(classify(429).is_retryable());
        assert!(classify(500).is_retryable());
        assert!(!classify(401).is_retryable());
        assert!(!classify(422).is_retryable());
        assert!(!classify(404).is_retryable());
        assert!(!Error::InvalidQuery("page".into()).is_retryable());
    }

    #[test]
    fn retry_after_hint() {
        let err = Error::from_status(
            Verb::Get,
            "https://example.com/documents",
            StatusCode::TOO_MANY_REQUESTS,
            Some(7),
            String::new(),
        );
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(classify(429).retry_after(), None);
    }

    #[test]
    fn field_errors_from_jsonapi_document() {
        let err = Error::Validation {
            verb: Verb::Post,
            url: "https://example.com/comments".into(),
            body: r#"{"errors":[{"status":"422","detail":"comment is required"},{"detail":"submitterType is invalid"}]}"#.into(),
        };
        assert_eq!(
            err.field_errors(),
            vec!["comment is required", "submitterType is invalid"]
        );
    }

    #[test]
    fn field_errors_tolerates_unparseable_body() {
        let err = Error::Validation {
            verb: Verb::Post,
            url: "https://example.com/comments".into(),
            body: "not json".into(),
        };
        assert!(err.field_errors().is_empty());
    }
}
