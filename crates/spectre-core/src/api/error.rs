//! Ghost API client errors.

use thiserror::Error;

use super::types::ApiErrorList;
use crate::http::TransportError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url}: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("{method} {url} returned HTTP {status}{}", first_message(.errors))]
    Http {
        method: &'static str,
        url: String,
        status: u32,
        /// Parsed Ghost error list, when the body carried one.
        errors: Option<ApiErrorList>,
    },

    #[error("{method} {url}: not modified")]
    NotModified {
        method: &'static str,
        url: String,
        /// Current `ETag` reported with the 304.
        etag: Option<String>,
    },

    #[error("decoding response of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("encoding request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid API URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid post id {id:?}")]
    InvalidPostId { id: String },

    #[error("server configuration has no clientSecret")]
    MissingClientSecret,

    #[error("API task was cancelled")]
    Cancelled,
}

fn first_message(errors: &Option<ApiErrorList>) -> String {
    errors
        .as_ref()
        .and_then(|list| list.errors.first())
        .map(|e| format!(" ({}: {})", e.error_type, e.message))
        .unwrap_or_default()
}

impl ApiError {
    /// HTTP status for `Http` and `NotModified` errors.
    pub fn status(&self) -> Option<u32> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::NotModified { .. } => Some(304),
            _ => None,
        }
    }

    /// The conditional request matched: the cached copy is current.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, ApiError::NotModified { .. })
    }

    /// Ghost `errorType` of the first reported error, if any.
    pub fn error_type(&self) -> Option<&str> {
        match self {
            ApiError::Http {
                errors: Some(list), ..
            } => list.errors.first().map(|e| e.error_type.as_str()),
            _ => None,
        }
    }
}
