//! Error types for blog URL discovery.

use std::fmt;

use crate::http::TransportError;

/// Failure of a single probe against one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The admin URL could not be handed to the transport (whitespace, bad host, ...).
    InvalidAddress { url: String },
    /// The host answered 404 for the admin path: no Ghost install there.
    NotFound { url: String },
    /// The host answered with a status other than 2xx or 404.
    UnexpectedStatus { url: String, code: u32 },
    /// No status was obtained (DNS, TLS, timeout, refused, aborted).
    Transport { url: String, source: TransportError },
}

impl ProbeError {
    /// The URL this probe was about.
    pub fn url(&self) -> &str {
        match self {
            ProbeError::InvalidAddress { url }
            | ProbeError::NotFound { url }
            | ProbeError::UnexpectedStatus { url, .. }
            | ProbeError::Transport { url, .. } => url,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProbeError::NotFound { .. })
    }

    /// Status code when the server answered at all.
    pub fn status_code(&self) -> Option<u32> {
        match self {
            ProbeError::NotFound { .. } => Some(404),
            ProbeError::UnexpectedStatus { code, .. } => Some(*code),
            ProbeError::InvalidAddress { .. } | ProbeError::Transport { .. } => None,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::InvalidAddress { url } => write!(f, "invalid Ghost admin address: {}", url),
            ProbeError::NotFound { url } => write!(f, "no Ghost blog found at {}", url),
            ProbeError::UnexpectedStatus { url, code } => {
                write!(f, "response code {} when requesting admin page of {}", code, url)
            }
            ProbeError::Transport { url, source } => write!(f, "could not reach {}: {}", url, source),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Transport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure of a full resolution (HTTPS attempt, then HTTP fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Caller passed a host that already carries a scheme. No I/O was performed.
    SchemePresent { input: String },
    /// Both attempts failed.
    ///
    /// `url` is the HTTPS candidate that was tried first; `cause` is the
    /// failure of the last attempt (HTTP) and is what `source()` returns.
    Unresolved {
        url: String,
        https_failure: Box<ProbeError>,
        cause: Box<ProbeError>,
    },
    /// The blocking probe task was cancelled before producing a result.
    Cancelled { url: String },
}

impl ResolveError {
    /// True if either attempt reached a server that had no Ghost admin page.
    pub fn is_not_found(&self) -> bool {
        match self {
            ResolveError::Unresolved {
                https_failure,
                cause,
                ..
            } => https_failure.is_not_found() || cause.is_not_found(),
            _ => false,
        }
    }

    /// The URL the error is framed around (the HTTPS candidate when I/O happened).
    pub fn url(&self) -> &str {
        match self {
            ResolveError::SchemePresent { input } => input,
            ResolveError::Unresolved { url, .. } | ResolveError::Cancelled { url } => url,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::SchemePresent { input } => write!(
                f,
                "blog URL must not have a scheme (http or https): {}",
                input
            ),
            ResolveError::Unresolved { url, .. } => write!(f, "couldn't validate the url {}", url),
            ResolveError::Cancelled { url } => write!(f, "validation of {} was cancelled", url),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Unresolved { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
