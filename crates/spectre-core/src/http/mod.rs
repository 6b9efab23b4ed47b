//! Blocking HTTP transport over libcurl.
//!
//! One `Easy` handle per request. Redirects are followed by curl itself and the
//! effective (post-redirect) URL is reported back, which is what blog URL
//! discovery relies on. Runs in the current thread; call from `spawn_blocking`
//! if used from async code.

mod error;
mod parse;

pub use error::{classify_curl_error, TransportError, TransportErrorKind};

use std::str;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// HTTP methods the client needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Per-transfer knobs, filled from config.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub max_redirects: u32,
    pub user_agent: String,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            follow_redirects: true,
            max_redirects: 10,
            user_agent: format!("spectre/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A single request. Header pairs are sent as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl<'a> HttpRequest<'a> {
    pub fn new(method: Method, url: &'a str) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status, final URL, headers of the final hop, and body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    /// URL of the last hop after redirects were followed.
    pub effective_url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive lookup of a response header from the final hop.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs a request and returns the response of the final hop.
///
/// Any HTTP status is returned as `Ok`; only failures to obtain a status
/// (DNS, TLS, timeout, abort) are errors. When `abort` is set to true while
/// the transfer runs, curl stops at the next progress callback.
pub fn perform(
    request: &HttpRequest<'_>,
    opts: &TransferOptions,
    abort: Option<&AtomicBool>,
) -> Result<HttpResponse, TransportError> {
    if abort.is_some_and(|a| a.load(Ordering::Relaxed)) {
        return Err(TransportError::aborted());
    }

    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(request.url).map_err(TransportError::from_curl)?;
    configure_method(&mut easy, request).map_err(TransportError::from_curl)?;
    easy.follow_location(opts.follow_redirects)
        .map_err(TransportError::from_curl)?;
    easy.max_redirections(opts.max_redirects)
        .map_err(TransportError::from_curl)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(TransportError::from_curl)?;
    easy.timeout(opts.timeout).map_err(TransportError::from_curl)?;
    easy.useragent(&opts.user_agent)
        .map_err(TransportError::from_curl)?;

    let mut list = curl::easy::List::new();
    for (k, v) in &request.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(TransportError::from_curl)?;
    }
    if request.body.is_some() {
        // Small JSON bodies; skip the 100-continue round trip.
        list.append("Expect:").map_err(TransportError::from_curl)?;
    }
    easy.http_headers(list).map_err(TransportError::from_curl)?;

    if abort.is_some() {
        easy.progress(true).map_err(TransportError::from_curl)?;
    }

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(TransportError::from_curl)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(TransportError::from_curl)?;
        if let Some(abort) = abort {
            transfer
                .progress_function(move |_, _, _, _| !abort.load(Ordering::Relaxed))
                .map_err(TransportError::from_curl)?;
        }
        transfer.perform()
    };
    if let Err(e) = perform_result {
        tracing::debug!("{} {} failed: {}", request.method.as_str(), request.url, e);
        return Err(TransportError::from_curl(e));
    }

    let status = easy.response_code().map_err(TransportError::from_curl)?;
    let effective_url = easy
        .effective_url()
        .map_err(TransportError::from_curl)?
        .unwrap_or(request.url)
        .to_string();

    tracing::debug!(
        "{} {} -> {} ({})",
        request.method.as_str(),
        request.url,
        status,
        effective_url
    );

    Ok(HttpResponse {
        status,
        effective_url,
        headers: parse::parse_headers(&header_lines),
        body,
    })
}

fn configure_method(
    easy: &mut curl::easy::Easy,
    request: &HttpRequest<'_>,
) -> Result<(), curl::Error> {
    if let Some(body) = &request.body {
        easy.post_fields_copy(body)?;
    }
    match request.method {
        Method::Head => easy.nobody(true),
        Method::Get => easy.get(true),
        Method::Post => {
            if request.body.is_none() {
                easy.post_fields_copy(&[])?;
            }
            easy.post(true)
        }
        // POSTFIELDS carries the body; the custom verb replaces POST on the wire.
        Method::Put => easy.custom_request("PUT"),
        Method::Delete => easy.custom_request("DELETE"),
    }
}
