//! Reqwest-backed transport.
//!
//! [`HttpClient`] sends requests to `https://{shop domain}` (or the
//! configured API host) with the access token and JSON headers attached,
//! and returns every response as data.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::ThemeConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the Admin API password.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP transport for the Admin API.
///
/// The client never retries and never turns a status code into an error.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; the inner reqwest client pools
/// connections and can be shared.
///
/// # Example
///
/// ```rust,ignore
/// use themekit::clients::{HttpClient, HttpRequest, Transport};
///
/// let client = HttpClient::new(&config)?;
/// let response = client.send(HttpRequest::get("/meta.json")).await?;
/// println!("{} {}", response.code, response.body);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the proxy is rejected by reqwest or
    /// the TLS backend cannot be initialized.
    pub fn new(config: &ThemeConfig) -> Result<Self, HttpError> {
        let base_uri = config.api_host().map_or_else(
            || format!("https://{}", config.domain()),
            |host| host.as_ref().to_string(),
        );

        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let mut default_headers = HashMap::new();
        default_headers.insert(
            USER_AGENT.as_str().to_string(),
            format!("themekit-client v{SDK_VERSION} | Rust {rust_version}"),
        );
        default_headers.insert(ACCEPT.as_str().to_string(), "application/json".to_string());
        default_headers.insert(
            ACCESS_TOKEN_HEADER.to_string(),
            config.password().as_ref().to_string(),
        );

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .default_headers(Self::header_map(&default_headers));

        if let Some(proxy) = config.proxy() {
            let proxy = reqwest::Proxy::all(proxy.as_ref()).map_err(HttpError::Client)?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(HttpError::Client)?;

        Ok(Self {
            client,
            base_uri,
            default_headers,
        })
    }

    /// Returns the base URI requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the headers attached to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    fn header_map(headers: &HashMap<String, String>) -> HeaderMap {
        headers
            .iter()
            .filter_map(|(name, value)| {
                let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
                let value = HeaderValue::from_str(value).ok()?;
                Some((name, value))
            })
            .collect()
    }

    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.path);
        tracing::debug!(method = %request.method, path = %request.path, "sending request");

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!(code, path = %request.path, "received response");

        Ok(HttpResponse::new(code, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, HostUrl, ProxyUrl, ShopDomain};

    fn create_test_config() -> ThemeConfig {
        ThemeConfig::builder()
            .domain(ShopDomain::new("test-shop").unwrap())
            .password(AccessToken::new("test-access-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_base_uri_uses_shop_domain() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(client.base_uri(), "https://test-shop.myshopify.com");
    }

    #[test]
    fn test_base_uri_uses_api_host_when_configured() {
        let config = ThemeConfig::builder()
            .domain(ShopDomain::new("test-shop").unwrap())
            .password(AccessToken::new("token").unwrap())
            .api_host(HostUrl::new("http://127.0.0.1:9000/").unwrap())
            .build()
            .unwrap();

        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.base_uri(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_access_token_header_injection() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(
            client.default_headers().get(ACCESS_TOKEN_HEADER),
            Some(&"test-access-token".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let user_agent = client.default_headers().get("user-agent").unwrap();
        assert!(user_agent.starts_with("themekit-client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(
            client.default_headers().get("accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_client_builds_with_proxy() {
        let config = ThemeConfig::builder()
            .domain(ShopDomain::new("test-shop").unwrap())
            .password(AccessToken::new("token").unwrap())
            .proxy(ProxyUrl::new("http://localhost:3128").unwrap())
            .build()
            .unwrap();

        assert!(HttpClient::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_relative_path_is_rejected_before_sending() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let result = client.send(HttpRequest::get("meta.json")).await;
        assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
    }
}
