use crate::{UrlError, UrlResult};
use std::borrow::Cow;
use url::Url;

/// Scheme prepended to candidates that carry no scheme separator
pub const DEFAULT_SCHEME: &str = "http://";

/// Marker used to decide whether a candidate already names a scheme
pub const SCHEME_SEPARATOR: &str = "://";

/// Prefixes the default scheme onto a candidate lacking a scheme separator
///
/// This is the only normalization applied to URLs anywhere in the crawler:
/// case, trailing slashes and query ordering are left untouched.
///
/// # Examples
///
/// ```
/// use sumi_sweep::url::with_default_scheme;
///
/// assert_eq!(with_default_scheme("example.com"), "http://example.com");
/// assert_eq!(with_default_scheme("https://example.com"), "https://example.com");
/// ```
pub fn with_default_scheme(candidate: &str) -> Cow<'_, str> {
    if candidate.contains(SCHEME_SEPARATOR) {
        Cow::Borrowed(candidate)
    } else {
        Cow::Owned(format!("{}{}", DEFAULT_SCHEME, candidate))
    }
}

/// Validates a candidate URL after default-scheme normalization
///
/// # Validation Rules
///
/// 1. Reject empty candidates and any whitespace or control character
/// 2. Prefix the default scheme when no `://` is present
/// 3. Reject an empty authority (`http:///path`)
/// 4. Parse with the WHATWG parser; reject on failure
/// 5. Require a non-empty host
///
/// # Arguments
///
/// * `candidate` - The raw URL string
///
/// # Returns
///
/// * `Ok(Url)` - The parsed, scheme-prefixed URL
/// * `Err(UrlError)` - The candidate is not a well-formed URL
pub fn validate_url(candidate: &str) -> UrlResult<Url> {
    if candidate.is_empty() {
        return Err(UrlError::Parse("empty URL".to_string()));
    }

    if candidate
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlError::Malformed(format!(
            "'{}' contains whitespace or control characters",
            candidate
        )));
    }

    let prefixed = with_default_scheme(candidate);

    // The WHATWG parser skips extra slashes for special schemes, so
    // "http:///about" would otherwise come back with host "about"
    if let Some((_, authority)) = prefixed.split_once(SCHEME_SEPARATOR) {
        if authority.is_empty() || authority.starts_with('/') || authority.starts_with('\\') {
            return Err(UrlError::MissingHost(candidate.to_string()));
        }
    }

    let url = Url::parse(&prefixed).map_err(|e| UrlError::Parse(format!("{}: {}", candidate, e)))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost(candidate.to_string())),
    }
}

/// Returns true if the candidate passes [`validate_url`]
pub fn is_valid_url(candidate: &str) -> bool {
    validate_url(candidate).is_ok()
}
