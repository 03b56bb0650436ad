//! Destination URL validation and canonicalization.
//!
//! Every destination passes through here before any allocation attempt.
//! Canonicalization keeps de-duplication by destination stable across
//! trivially different spellings of the same URL.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlGuardError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates a destination URL and returns its canonical form.
///
/// # Rules
///
/// 1. Only `http` and `https` schemes are accepted; `javascript:`, `data:`,
///    `file:` and friends are rejected outright.
/// 2. The hostname is lowercased.
/// 3. Default ports (80/443) are removed.
/// 4. Fragments are removed; query parameters and path case are preserved.
///
/// # Errors
///
/// Returns [`UrlGuardError::InvalidFormat`] for unparseable input and
/// [`UrlGuardError::UnsupportedProtocol`] for non-http(s) schemes.
pub fn ensure_http_url(input: &str) -> Result<String, UrlGuardError> {
    let mut url = Url::parse(input).map_err(|e| UrlGuardError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlGuardError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase))
            .map_err(|e| UrlGuardError::InvalidFormat(e.to_string()))?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port && url.set_port(None).is_err() {
        return Err(UrlGuardError::InvalidFormat(
            "Failed to remove default port".to_string(),
        ));
    }

    Ok(url.to_string())
}
