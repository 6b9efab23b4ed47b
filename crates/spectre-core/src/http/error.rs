//! Transport-level failures and their classification.

use std::fmt;

/// Broad category of a transport failure, used for diagnostics and for
/// choosing user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connect or overall transfer timeout.
    Timeout,
    /// DNS, refused connection, reset, empty reply.
    Connection,
    /// TLS handshake or certificate problem.
    Tls,
    /// The transport refused the URL before connecting.
    InvalidUrl,
    /// Redirect chain exceeded the configured limit.
    TooManyRedirects,
    /// The caller abandoned the request.
    Aborted,
    Other,
}

impl TransportErrorKind {
    fn label(self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Connection => "connection failed",
            TransportErrorKind::Tls => "TLS error",
            TransportErrorKind::InvalidUrl => "invalid URL",
            TransportErrorKind::TooManyRedirects => "too many redirects",
            TransportErrorKind::Aborted => "aborted",
            TransportErrorKind::Other => "transport error",
        }
    }
}

/// Error raised by the HTTP transport before any status code was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn from_curl(e: curl::Error) -> Self {
        Self::new(classify_curl_error(&e), e.to_string())
    }

    pub fn aborted() -> Self {
        Self::new(TransportErrorKind::Aborted, "request abandoned by caller")
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.detail)
    }
}

impl std::error::Error for TransportError {}

/// Classify a curl error into a transport error kind.
pub fn classify_curl_error(e: &curl::Error) -> TransportErrorKind {
    if e.is_operation_timedout() {
        return TransportErrorKind::Timeout;
    }
    if e.is_aborted_by_callback() {
        return TransportErrorKind::Aborted;
    }
    if e.is_too_many_redirects() {
        return TransportErrorKind::TooManyRedirects;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return TransportErrorKind::InvalidUrl;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cipher()
        || e.is_ssl_cacert()
    {
        return TransportErrorKind::Tls;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportErrorKind::Connection;
    }
    TransportErrorKind::Other
}
