//! HTTP Reanalysis Client - Implementation of ReanalysisApi for the analysis service.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpReanalysisConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = HttpReanalysisClient::new(config)?;
//! let payload = client.reanalyze(&document_id, &token).await?;
//! ```
//!
//! # Wire format
//!
//! `POST {base_url}/documents/{document_id}/reanalyze` with
//! `Authorization: Bearer <token>` and no body. The JSON response body is
//! returned verbatim. The document id is percent-encoded as one path segment.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::domain::foundation::DocumentId;
use crate::ports::{is_empty_payload, ReanalysisApi, ReanalysisApiError};

/// Configuration for the HTTP re-analysis client.
#[derive(Debug, Clone)]
pub struct HttpReanalysisConfig {
    /// Base URL of the analysis service (default: http://localhost:8000).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpReanalysisConfig {
    /// Creates a configuration for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpReanalysisConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

/// reqwest-backed client for the re-analysis endpoint.
pub struct HttpReanalysisClient {
    config: HttpReanalysisConfig,
    base_url: Url,
    client: Client,
}

impl HttpReanalysisClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    /// Returns `ReanalysisApiError::Network` if the base URL does not parse
    /// or the HTTP client cannot be built.
    pub fn new(config: HttpReanalysisConfig) -> Result<Self, ReanalysisApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ReanalysisApiError::network(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ReanalysisApiError::network(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Builds the re-analysis endpoint URL for a document.
    fn reanalyze_url(&self, document_id: &DocumentId) -> Result<Url, ReanalysisApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ReanalysisApiError::network(format!(
                    "Base URL '{}' cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["documents", document_id.as_str(), "reanalyze"]);
        Ok(url)
    }

    /// Maps transport errors onto the port's error type.
    fn map_send_error(&self, e: reqwest::Error) -> ReanalysisApiError {
        if e.is_timeout() {
            ReanalysisApiError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ReanalysisApiError::network(format!("Connection failed: {}", e))
        } else {
            ReanalysisApiError::network(e.to_string())
        }
    }

    /// Rejects non-success responses, keeping the body for diagnostics.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, ReanalysisApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ReanalysisApiError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    /// Decodes the success body; blank bodies and `null` are empty payloads.
    async fn parse_payload(&self, response: Response) -> Result<Value, ReanalysisApiError> {
        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ReanalysisApiError::EmptyPayload);
        }

        let payload: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ReanalysisApiError::InvalidPayload(e.to_string()))?;

        if is_empty_payload(&payload) {
            return Err(ReanalysisApiError::EmptyPayload);
        }
        Ok(payload)
    }
}

#[async_trait]
impl ReanalysisApi for HttpReanalysisClient {
    async fn reanalyze(
        &self,
        document_id: &DocumentId,
        token: &Secret<String>,
    ) -> Result<Value, ReanalysisApiError> {
        let url = self.reanalyze_url(document_id)?;
        debug!(url = %url, "Sending re-analysis request");

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", token.expose_secret()))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = self.handle_response_status(response).await?;
        self.parse_payload(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token() -> Secret<String> {
        Secret::new("test-token".to_string())
    }

    fn doc(id: &str) -> DocumentId {
        DocumentId::new(id).unwrap()
    }

    fn client_for(server: &MockServer) -> HttpReanalysisClient {
        HttpReanalysisClient::new(HttpReanalysisConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = HttpReanalysisConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn reanalyze_url_appends_segments() {
        let client = HttpReanalysisClient::new(HttpReanalysisConfig::default()).unwrap();
        let url = client.reanalyze_url(&doc("doc-1")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/documents/doc-1/reanalyze");
    }

    #[test]
    fn reanalyze_url_keeps_base_path() {
        let client =
            HttpReanalysisClient::new(HttpReanalysisConfig::new("https://api.example.com/v1/"))
                .unwrap();
        let url = client.reanalyze_url(&doc("doc-1")).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/documents/doc-1/reanalyze");
    }

    #[test]
    fn reanalyze_url_encodes_document_id() {
        let client = HttpReanalysisClient::new(HttpReanalysisConfig::default()).unwrap();
        let url = client.reanalyze_url(&doc("reports/q1 final.pdf")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/documents/reports%2Fq1%20final.pdf/reanalyze"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = HttpReanalysisClient::new(HttpReanalysisConfig::new("not a url"));
        assert!(matches!(result, Err(ReanalysisApiError::Network(_))));
    }

    #[tokio::test]
    async fn sends_bearer_token_and_empty_body() {
        let server = MockServer::start().await;
        let payload = json!({ "document_id": "doc-1", "summary": "fresh" });

        Mock::given(method("POST"))
            .and(path("/documents/doc-1/reanalyze"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).reanalyze(&doc("doc-1"), &token()).await;

        assert_eq!(result.unwrap(), payload);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Not authenticated"))
            .mount(&server)
            .await;

        let result = client_for(&server).reanalyze(&doc("doc-1"), &token()).await;

        assert_eq!(
            result,
            Err(ReanalysisApiError::UnexpectedStatus {
                status: 401,
                body: "Not authenticated".to_string()
            })
        );
    }

    #[tokio::test]
    async fn empty_body_is_an_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = client_for(&server).reanalyze(&doc("doc-1"), &token()).await;

        assert_eq!(result, Err(ReanalysisApiError::EmptyPayload));
    }

    #[tokio::test]
    async fn null_body_is_an_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let result = client_for(&server).reanalyze(&doc("doc-1"), &token()).await;

        assert_eq!(result, Err(ReanalysisApiError::EmptyPayload));
    }

    #[tokio::test]
    async fn malformed_body_is_an_invalid_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).reanalyze(&doc("doc-1"), &token()).await;

        assert!(matches!(result, Err(ReanalysisApiError::InvalidPayload(_))));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": true }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = HttpReanalysisClient::new(
            HttpReanalysisConfig::new(server.uri()).with_timeout(Duration::from_millis(200)),
        )
        .unwrap();
        let result = client.reanalyze(&doc("doc-1"), &token()).await;

        assert!(matches!(result, Err(ReanalysisApiError::Timeout { .. })));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client =
            HttpReanalysisClient::new(HttpReanalysisConfig::new("http://127.0.0.1:1")).unwrap();
        let result = client.reanalyze(&doc("doc-1"), &token()).await;

        assert!(matches!(result, Err(ReanalysisApiError::Network(_))));
    }
}
