//! Structural URL validation.

use url::Url;

/// Parses `raw` and returns the URL only if it carries a non-empty scheme and
/// a non-empty host. Never touches the network; unparseable input is `None`.
pub fn parse_valid_url(raw: &str) -> Option<Url> {
    let parsed = Url::parse(raw).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(parsed),
        _ => None,
    }
}

/// True if `raw` passes [`parse_valid_url`].
pub fn is_valid_url(raw: &str) -> bool {
    parse_valid_url(raw).is_some()
}
