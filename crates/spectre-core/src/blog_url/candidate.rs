//! Candidate URL construction and admin-path handling.
//!
//! Plain string operations: the probe contract depends on exact suffix
//! semantics (optional trailing slash), not on URL structure.

pub const SCHEME_HTTPS: &str = "https://";
pub const SCHEME_HTTP: &str = "http://";

/// Well-known Ghost admin route used as the liveness/identity probe.
pub const ADMIN_PATH: &str = "/ghost/";

/// True if `host` already starts with an http or https scheme (ASCII case-insensitive).
pub fn has_scheme(host: &str) -> bool {
    starts_with_ignore_case(host, SCHEME_HTTPS) || starts_with_ignore_case(host, SCHEME_HTTP)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Join a base URL and a relative path with one `/` between them.
///
/// At most one trailing slash is taken off `base`, and never the `//` of a
/// bare scheme. A trailing slash on `path` is preserved.
pub fn make_absolute_url(base: &str, path: &str) -> String {
    let base = match base.strip_suffix('/') {
        Some(trimmed) if !base.ends_with("://") => trimmed,
        _ => base,
    };
    format!("{}/{}", base, path.trim_start_matches('/'))
}

/// Strip a single trailing admin path (`/ghost/` or `/ghost`) from `url`.
///
/// Anchored at the end of the string; a URL without the suffix is returned unchanged.
pub fn strip_admin_path(url: &str) -> &str {
    let bare = ADMIN_PATH.trim_end_matches('/');
    url.strip_suffix(ADMIN_PATH)
        .or_else(|| url.strip_suffix(bare))
        .unwrap_or(url)
}

/// True if `url` is something the transport can be handed.
///
/// Rejects whitespace and control characters anywhere in the string, then
/// requires a parseable absolute http(s) URL with a host.
pub fn is_valid_address(url: &str) -> bool {
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}
