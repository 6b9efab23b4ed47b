//! Parse raw response header lines collected by curl.

/// Collect `(name, value)` pairs from header lines.
///
/// When redirects are followed curl reports the headers of every hop; each
/// hop starts with a status line, so only the pairs after the last status
/// line are kept.
pub(crate) fn parse_headers(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    headers
}
