//! HTTP response type.
//!
//! [`HttpResponse`] is the raw result of one round trip: the status code,
//! the headers and the unparsed body text. Interpreting it is left to the
//! envelope resolver in [`crate::theme`].

use std::collections::HashMap;

/// A raw response from the Admin API.
///
/// Non-2xx responses are ordinary values here; a transport only returns an
/// error when no response was received at all.
///
/// # Example
///
/// ```rust
/// use themekit::clients::HttpResponse;
///
/// let response = HttpResponse::json(404, "{}");
/// assert!(!response.is_ok());
/// assert_eq!(response.body, "{}");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Creates a response with no headers, as produced by test doubles.
    #[must_use]
    pub fn json(code: u16, body: impl Into<String>) -> Self {
        Self::new(code, HashMap::new(), body)
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the body is empty or only whitespace.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            assert!(HttpResponse::json(code, "{}").is_ok(), "code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 422, 429, 500, 503] {
            assert!(!HttpResponse::json(code, "{}").is_ok(), "code {code}");
        }
    }

    #[test]
    fn test_header_names_are_lowercased() {
        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, "{}");
        assert_eq!(response.request_id(), Some("abc-123"));
    }

    #[test]
    fn test_is_body_empty_ignores_whitespace() {
        assert!(HttpResponse::json(404, "").is_body_empty());
        assert!(HttpResponse::json(404, " \n").is_body_empty());
        assert!(!HttpResponse::json(404, "{}").is_body_empty());
    }
}
