//! HEAD transport interface used by the resolver.
//!
//! The resolver only depends on this trait; production code plugs in
//! `CurlTransport`, tests plug in scripted fakes.

use std::sync::atomic::AtomicBool;

use crate::config::ProbeConfig;
use crate::http::{self, HttpRequest, Method, TransferOptions, TransportError};

/// What a probe needs back from a HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u32,
    /// Final URL after redirects were followed.
    pub effective_url: String,
}

/// Issues header-only requests that follow redirects.
pub trait HeadTransport: Send + Sync {
    fn head(&self, url: &str, abort: Option<&AtomicBool>) -> Result<HeadResponse, TransportError>;
}

/// libcurl-backed transport.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: TransferOptions,
}

impl CurlTransport {
    pub fn new(opts: TransferOptions) -> Self {
        Self { opts }
    }

    pub fn from_config(cfg: &ProbeConfig) -> Self {
        Self::new(cfg.transfer_options())
    }
}

impl HeadTransport for CurlTransport {
    fn head(&self, url: &str, abort: Option<&AtomicBool>) -> Result<HeadResponse, TransportError> {
        let request = HttpRequest::new(Method::Head, url);
        let response = http::perform(&request, &self.opts, abort)?;
        Ok(HeadResponse {
            status: response.status,
            effective_url: response.effective_url,
        })
    }
}
