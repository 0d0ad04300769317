//! HTTP client for the accounts API
//!
//! [`Fetcher`] is the one seam between the subscription commands and the network:
//! it issues a request, unwraps the `{ success, errors, result }` envelope, and
//! decodes the result. [`ApiClient`] is the `reqwest` implementation used by the
//! CLI; tests substitute [`crate::mock::MockFetcher`].

use crate::{
    api_types::Envelope,
    error::{QueuectlError, Result},
};
use serde::de::DeserializeOwned;
use std::{fmt, future::Future, time::Duration};
use tracing::{debug, warn};
use url::Url;

/// Default request timeout applied by [`ApiClient::new`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP verbs used by the event subscription endpoints
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Method and optional JSON body of a request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestInit {
    pub method: HttpMethod,
    pub body: Option<serde_json::Value>,
}

impl RequestInit {
    /// A bodiless GET
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn delete() -> Self {
        Self {
            method: HttpMethod::Delete,
            body: None,
        }
    }

    /// A request carrying `body` serialized as JSON
    ///
    /// # Errors
    /// Returns an error if `body` cannot be serialized
    pub fn with_json<B: serde::Serialize>(method: HttpMethod, body: &B) -> Result<Self> {
        Ok(Self {
            method,
            body: Some(serde_json::to_value(body)?),
        })
    }
}

/// Performs an API request and returns the unwrapped envelope result
///
/// Implementations are responsible for authentication and for turning a
/// `success: false` envelope into [`QueuectlError::Api`].
pub trait Fetcher: Send + Sync {
    fn fetch_result<T>(&self, path: &str, init: RequestInit) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send;
}

/// `reqwest`-backed [`Fetcher`] authenticating with a bearer API token
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://api.cloudflare.com/client/v4`
    /// * `api_token` - Bearer token sent with every request
    ///
    /// # Errors
    /// Returns an error if the base URL cannot be parsed, the token is empty, or
    /// the HTTP client cannot be built
    pub fn new(base_url: &str, api_token: &str) -> Result<Self> {
        Self::with_timeout(base_url, api_token, DEFAULT_TIMEOUT)
    }

    /// Create a new API client with a custom request timeout
    ///
    /// # Errors
    /// Returns an error if the base URL cannot be parsed, the token is empty, or
    /// the HTTP client cannot be built
    pub fn with_timeout(base_url: &str, api_token: &str, timeout: Duration) -> Result<Self> {
        if api_token.trim().is_empty() {
            return Err(QueuectlError::MissingCredentials(
                "API token is empty".to_string(),
            ));
        }

        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("queuectl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_token: api_token.to_string(),
        })
    }

    /// Get the API base URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL, keeping the base path prefix
    ///
    /// # Errors
    /// Returns an error if the joined URL is invalid
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

impl Fetcher for ApiClient {
    async fn fetch_result<T>(&self, path: &str, init: RequestInit) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.url_for(path)?;
        debug!("{} {}", init.method, url);

        let mut request = self
            .http
            .request(init.method.into(), url)
            .bearer_auth(&self.api_token);
        if let Some(body) = &init.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} {} returned HTTP {}", init.method, path, status);
        }

        // The envelope, not the status code, decides success
        let envelope: Envelope = response.json().await?;
        envelope.into_result(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    /// Serve one canned HTTP response on a local port
    ///
    /// Returns the base URL to point a client at and a handle resolving to the
    /// raw request that was received.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/client/v4", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                if request_complete(&received) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(received).unwrap()
        });

        (base_url, handle)
    }

    fn request_complete(received: &[u8]) -> bool {
        let text = String::from_utf8_lossy(received);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= content_length
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let client = ApiClient::new("https://api.example.com/client/v4", "token").unwrap();
        assert_eq!(
            client
                .url_for("/accounts/acc/event_subscriptions/events")
                .unwrap()
                .as_str(),
            "https://api.example.com/client/v4/accounts/acc/event_subscriptions/events"
        );

        let trailing = ApiClient::new("https://api.example.com/client/v4/", "token").unwrap();
        assert_eq!(
            trailing
                .url_for("/accounts/acc/event_subscriptions/subscriptions?per_page=100")
                .unwrap()
                .as_str(),
            "https://api.example.com/client/v4/accounts/acc/event_subscriptions/subscriptions?per_page=100"
        );
    }

    #[test]
    fn test_new_rejects_invalid_inputs() {
        assert!(matches!(
            ApiClient::new("https://api.example.com", "  "),
            Err(QueuectlError::MissingCredentials(_))
        ));
        assert!(matches!(
            ApiClient::new("not a url", "token"),
            Err(QueuectlError::Url(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = ApiClient::new("https://api.example.com", "secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("api.example.com"));
    }

    #[test]
    fn test_request_init_with_json() {
        let init = RequestInit::with_json(HttpMethod::Patch, &json!({"name": "x"})).unwrap();
        assert_eq!(init.method, HttpMethod::Patch);
        assert_eq!(init.body, Some(json!({"name": "x"})));

        assert_eq!(RequestInit::get().method, HttpMethod::Get);
        assert_eq!(RequestInit::delete().method, HttpMethod::Delete);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[tokio::test]
    async fn test_failed_envelope_decides_outcome_over_status() {
        let (base_url, server) = serve_once(
            "404 Not Found",
            "application/json",
            r#"{"success":false,"errors":[{"code":7003,"message":"Could not route"}],"result":null}"#,
        )
        .await;
        let client = ApiClient::new(&base_url, "token").unwrap();

        let result: Result<serde_json::Value> = client
            .fetch_result("/accounts/acc/event_subscriptions/events", RequestInit::get())
            .await;

        assert!(matches!(&result, Err(e) if e.has_api_code(7003)));
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /client/v4/accounts/acc/event_subscriptions/events "));
    }

    #[tokio::test]
    async fn test_successful_envelope_with_error_status_still_succeeds() {
        let (base_url, server) = serve_once(
            "500 Internal Server Error",
            "application/json",
            r#"{"success":true,"errors":[],"result":{"id":"sub-1"}}"#,
        )
        .await;
        let client = ApiClient::new(&base_url, "token").unwrap();

        let created: crate::api_types::CreatedSubscription = client
            .fetch_result("/accounts/acc/clipboard/subscriptions", RequestInit::get())
            .await
            .unwrap();

        assert_eq!(created.id, "sub-1");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_is_http_error() {
        let (base_url, server) =
            serve_once("200 OK", "text/html", "<html>maintenance</html>").await;
        let client = ApiClient::new(&base_url, "token").unwrap();

        let result: Result<serde_json::Value> = client
            .fetch_result("/accounts/acc/event_subscriptions/events", RequestInit::get())
            .await;

        assert!(matches!(result, Err(QueuectlError::Http(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_request_carries_token_and_json_body() {
        let (base_url, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"success":true,"errors":[],"result":{"id":"sub-1"}}"#,
        )
        .await;
        let client = ApiClient::new(&base_url, "secret-token").unwrap();
        let init = RequestInit::with_json(HttpMethod::Patch, &json!({"events": ["e1", "e2"]})).unwrap();

        let _: serde_json::Value = client
            .fetch_result("/accounts/acc/event_subscriptions/subscriptions/sub-1", init)
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with(
            "PATCH /client/v4/accounts/acc/event_subscriptions/subscriptions/sub-1 "
        ));
        let lowercase = request.to_lowercase();
        assert!(lowercase.contains("authorization: bearer secret-token"));
        assert!(lowercase.contains("content-type: application/json"));

        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body, json!({"events": ["e1", "e2"]}));
    }
}
