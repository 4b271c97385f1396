//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. It resolves request
//! paths against the backend base URL and returns the raw response; the
//! interceptor chain has already run by the time it is called.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tandem_application::ports::{HttpClient, HttpClientError};
use tandem_domain::{HttpMethod, HttpResponse, OutgoingRequest};
use tracing::trace;

/// Transport backed by `reqwest::Client`.
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
    default_timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a transport for the given backend.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "Tandem/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(base_url: Url, default_timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("Tandem/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client, base_url, default_timeout))
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url, default_timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            default_timeout,
        }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Appends a request path to the base URL, keeping any base path prefix.
    fn resolve(&self, path: &str) -> Result<Url, HttpClientError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = format!("{base}/{path}");
        Url::parse(&joined).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {joined}")))
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &OutgoingRequest) -> Result<HttpResponse, HttpClientError> {
        let url = self.resolve(&request.path)?;
        let timeout = request.timeout.unwrap_or(self.default_timeout);
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(timeout);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        let duration = start.elapsed();
        trace!(status, bytes = body.len(), "transport response");

        Ok(HttpResponse::new(status, headers, body, duration))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    fn transport(base: &str) -> ReqwestHttpClient {
        ReqwestHttpClient::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_resolve_keeps_base_path() {
        let client = transport("https://ide.example.com/backend/");
        assert_eq!(
            client.resolve("/api/projects/1").unwrap().as_str(),
            "https://ide.example.com/backend/api/projects/1"
        );

        let client = transport("https://ide.example.com");
        assert_eq!(
            client.resolve("api/projects/me/joined").unwrap().as_str(),
            "https://ide.example.com/api/projects/me/joined"
        );
    }

    #[tokio::test]
    async fn test_execute_sends_headers_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/projects/3/new-password")
            .match_header("authorization", "abc123")
            .match_body(Matcher::Json(serde_json::json!({ "password": "abcd" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = transport(&server.url());
        let mut request = OutgoingRequest::with_json(
            HttpMethod::Patch,
            "/api/projects/3/new-password",
            &serde_json::json!({ "password": "abcd" }),
        )
        .unwrap();
        request.headers.set("Authorization", "abc123");

        let response = client.execute(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/projects/me/joined")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = transport(&server.url());
        let response = client
            .execute(&OutgoingRequest::get("/api/projects/me/joined"))
            .await
            .unwrap();

        assert!(response.status.is_unauthorized());
        assert_eq!(response.text(), "unauthorized");
    }

    #[tokio::test]
    async fn test_connection_failure_is_mapped() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = transport("http://127.0.0.1:9");
        let result = client.execute(&OutgoingRequest::get("/ping")).await;

        assert!(matches!(
            result,
            Err(HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_))
        ));
    }
}
