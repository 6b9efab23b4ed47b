//! Blog URL discovery.
//!
//! Given a bare host (no scheme), find the scheme that serves a Ghost admin
//! page and return the canonical blog URL after redirects. HTTPS is tried
//! first, HTTP only if HTTPS failed. Each call makes one or two HEAD requests
//! and keeps no state.

mod candidate;
mod error;
mod transport;

pub use candidate::{
    has_scheme, is_valid_address, make_absolute_url, strip_admin_path, ADMIN_PATH, SCHEME_HTTP,
    SCHEME_HTTPS,
};
pub use error::{ProbeError, ResolveError};
pub use transport::{CurlTransport, HeadResponse, HeadTransport};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::ProbeConfig;

/// Reject hosts that already carry a scheme. Performs no I/O.
pub fn check_host(host: &str) -> Result<(), ResolveError> {
    if has_scheme(host) {
        return Err(ResolveError::SchemePresent {
            input: host.to_string(),
        });
    }
    Ok(())
}

/// Probe `blog_url` (scheme included) for a Ghost admin page.
///
/// On a 2xx answer returns the final URL with the admin path stripped, so a
/// redirect (e.g. to `www.` or to HTTPS) is reflected in the result.
pub fn check_ghost_blog(
    blog_url: &str,
    transport: &dyn HeadTransport,
    abort: Option<&AtomicBool>,
) -> Result<String, ProbeError> {
    let admin_url = make_absolute_url(blog_url, ADMIN_PATH);
    if !is_valid_address(blog_url) || !is_valid_address(&admin_url) {
        return Err(ProbeError::InvalidAddress { url: admin_url });
    }

    let response = transport
        .head(&admin_url, abort)
        .map_err(|source| ProbeError::Transport {
            url: blog_url.to_string(),
            source,
        })?;

    match response.status {
        200..=299 => Ok(strip_admin_path(&response.effective_url).to_string()),
        404 => Err(ProbeError::NotFound {
            url: blog_url.to_string(),
        }),
        code => Err(ProbeError::UnexpectedStatus {
            url: blog_url.to_string(),
            code,
        }),
    }
}

/// HTTPS attempt, then HTTP attempt. Caller has already checked the host.
fn resolve_with_fallback(
    host: &str,
    transport: &dyn HeadTransport,
    abort: Option<&AtomicBool>,
) -> Result<String, ResolveError> {
    let https_url = format!("{}{}", SCHEME_HTTPS, host);
    let https_failure = match check_ghost_blog(&https_url, transport, abort) {
        Ok(blog_url) => {
            tracing::info!("resolved {} to {}", host, blog_url);
            return Ok(blog_url);
        }
        Err(e) => e,
    };
    tracing::debug!("HTTPS probe failed, trying HTTP: {}", https_failure);

    let http_url = format!("{}{}", SCHEME_HTTP, host);
    match check_ghost_blog(&http_url, transport, abort) {
        Ok(blog_url) => {
            tracing::info!("resolved {} to {} (HTTP fallback)", host, blog_url);
            Ok(blog_url)
        }
        Err(cause) => {
            tracing::warn!(
                "could not resolve {}: https: {}; http: {}",
                host,
                https_failure,
                cause
            );
            Err(ResolveError::Unresolved {
                url: https_url,
                https_failure: Box::new(https_failure),
                cause: Box::new(cause),
            })
        }
    }
}

/// Raises the abort flag when the owning future is dropped.
struct AbortOnDrop(Arc<AtomicBool>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Resolves bare hosts to canonical Ghost blog URLs.
#[derive(Clone)]
pub struct BlogUrlResolver {
    transport: Arc<dyn HeadTransport>,
}

impl BlogUrlResolver {
    pub fn new(transport: Arc<dyn HeadTransport>) -> Self {
        Self { transport }
    }

    pub fn from_config(cfg: &ProbeConfig) -> Self {
        Self::new(Arc::new(CurlTransport::from_config(cfg)))
    }

    /// Runs both attempts on the current thread.
    ///
    /// Leading and trailing whitespace around `host` is ignored; whitespace
    /// inside it makes both candidates invalid.
    pub fn resolve_blocking(&self, host: &str) -> Result<String, ResolveError> {
        let host = host.trim();
        check_host(host)?;
        resolve_with_fallback(host, self.transport.as_ref(), None)
    }

    /// Runs both attempts on the blocking pool.
    ///
    /// The scheme check happens before anything is spawned. Dropping the
    /// returned future asks an in-flight probe to stop.
    pub async fn resolve(&self, host: &str) -> Result<String, ResolveError> {
        let host = host.trim();
        check_host(host)?;

        let abort = Arc::new(AtomicBool::new(false));
        let _guard = AbortOnDrop(Arc::clone(&abort));
        let transport = Arc::clone(&self.transport);
        let owned_host = host.to_string();

        let joined = tokio::task::spawn_blocking(move || {
            resolve_with_fallback(&owned_host, transport.as_ref(), Some(abort.as_ref()))
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(ResolveError::Cancelled {
                url: format!("{}{}", SCHEME_HTTPS, host),
            }),
        }
    }
}

/// Resolve `host` with a curl transport built from `cfg`.
pub async fn resolve_blog_url(host: &str, cfg: &ProbeConfig) -> Result<String, ResolveError> {
    BlogUrlResolver::from_config(cfg).resolve(host).await
}
