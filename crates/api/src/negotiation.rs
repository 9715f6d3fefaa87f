//! `Accept` header negotiation between DNS wire format and JSON.

use axum::http::{header, HeaderMap};
use ferrous_doh_domain::ResponseFormat;

pub const DNS_MESSAGE: &str = "application/dns-message";
pub const DNS_UDPWIREFORMAT: &str = "application/dns-udpwireformat";
pub const JSON: &str = "application/json";
pub const DNS_JSON: &str = "application/dns-json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiated {
    pub format: ResponseFormat,
    pub content_type: &'static str,
}

impl Negotiated {
    const fn wire(content_type: &'static str) -> Self {
        Self {
            format: ResponseFormat::Wire,
            content_type,
        }
    }

    const fn json(content_type: &'static str) -> Self {
        Self {
            format: ResponseFormat::Json,
            content_type,
        }
    }
}

/// Picks the reply representation from the `Accept` header.
///
/// The first listed media type decides. A missing header or `*/*` selects
/// wire format; any media type that is not a DNS wire type selects JSON.
pub fn negotiate(headers: &HeaderMap) -> Negotiated {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let first = accept
        .split(',')
        .map(media_type)
        .find(|media| !media.is_empty());

    match first {
        None | Some("*/*") => Negotiated::wire(DNS_MESSAGE),
        Some(media) if media.eq_ignore_ascii_case(DNS_MESSAGE) => Negotiated::wire(DNS_MESSAGE),
        Some(media) if media.eq_ignore_ascii_case(DNS_UDPWIREFORMAT) => {
            Negotiated::wire(DNS_UDPWIREFORMAT)
        }
        Some(media) if media.eq_ignore_ascii_case(DNS_JSON) => Negotiated::json(DNS_JSON),
        Some(_) => Negotiated::json(JSON),
    }
}

/// Whether a request body is a JSON question list rather than wire bytes.
pub fn is_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(media_type)
        .is_some_and(|media| {
            media.eq_ignore_ascii_case(JSON) || media.eq_ignore_ascii_case(DNS_JSON)
        })
}

fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_missing_accept_is_wire() {
        assert_eq!(negotiate(&HeaderMap::new()).format, ResponseFormat::Wire);
    }

    #[test]
    fn test_wildcard_is_wire() {
        assert_eq!(negotiate(&accept("*/*")).format, ResponseFormat::Wire);
    }

    #[test]
    fn test_wire_media_types_echo_back() {
        assert_eq!(negotiate(&accept(DNS_MESSAGE)), Negotiated::wire(DNS_MESSAGE));
        assert_eq!(
            negotiate(&accept("application/dns-udpwireformat; q=1")),
            Negotiated::wire(DNS_UDPWIREFORMAT)
        );
    }

    #[test]
    fn test_other_media_types_are_json() {
        assert_eq!(negotiate(&accept(JSON)), Negotiated::json(JSON));
        assert_eq!(negotiate(&accept(DNS_JSON)), Negotiated::json(DNS_JSON));
        assert_eq!(negotiate(&accept("text/html, */*")), Negotiated::json(JSON));
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json_body(&headers));
        assert!(!is_json_body(&HeaderMap::new()));
    }
}
