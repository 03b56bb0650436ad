//! Client network identifier extraction.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Returns the best-available client network identifier for fingerprinting.
///
/// When `behind_proxy` is set, `X-Forwarded-For` (first hop) and `X-Real-IP`
/// take priority over the peer socket address. Enable only when the service
/// runs behind a trusted reverse proxy; otherwise the headers are
/// client-controlled.
pub fn extract_client_ip(headers: &HeaderMap, addr: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(forwarded) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
        {
            return forwarded.to_string();
        }

        if let Some(real_ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
        {
            return real_ip.to_string();
        }
    }

    addr.ip().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn addr() -> SocketAddr {
        "192.0.2.10:54321".parse().unwrap()
    }

    #[test]
    fn test_peer_address_by_default() {
        let headers = HeaderMap::new();
        assert_eq!(extract_client_ip(&headers, addr(), false), "192.0.2.10");
    }

    #[test]
    fn test_forwarded_header_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(extract_client_ip(&headers, addr(), false), "192.0.2.10");
    }

    #[test]
    fn test_forwarded_header_first_hop_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(extract_client_ip(&headers, addr(), true), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));

        assert_eq!(extract_client_ip(&headers, addr(), true), "198.51.100.4");
    }

    #[test]
    fn test_empty_forwarded_header_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));

        assert_eq!(extract_client_ip(&headers, addr(), true), "192.0.2.10");
    }
}
