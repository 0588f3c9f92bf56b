//! Status client abstraction for testability

use std::future::Future;
use std::pin::Pin;

use super::{StatusError, StatusReport};

/// Boxed future returned by [`StatusClient::fetch_status`].
pub type StatusFuture<'a> =
    Pin<Box<dyn Future<Output = Result<StatusReport, StatusError>> + Send + 'a>>;

/// Trait for status endpoint requests.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock clients in tests. Uses a boxed future so the session
/// can hold the client as a trait object.
pub trait StatusClient: Send + Sync + 'static {
    /// Fetch the current status report.
    fn fetch_status(&self) -> StatusFuture<'_>;
}

/// Real status client using reqwest.
///
/// No request timeout is configured: a stalled request simply never
/// resolves until the session stops.
pub struct ReqwestStatusClient {
    client: reqwest::Client,
    url: String,
}

impl ReqwestStatusClient {
    /// Creates a client for the given status URL.
    pub fn new(url: impl Into<String>) -> Result<Self, StatusError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StatusError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StatusClient for ReqwestStatusClient {
    fn fetch_status(&self) -> StatusFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| StatusError::Request(e.to_string()))?;

            // Check HTTP status
            if !response.status().is_success() {
                return Err(StatusError::HttpStatus {
                    status: response.status().as_u16(),
                    url: self.url.clone(),
                });
            }

            response
                .json::<StatusReport>()
                .await
                .map_err(|e| StatusError::Decode(e.to_string()))
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock status client for testing
    pub struct MockStatusClient {
        pub response: Result<StatusReport, StatusError>,
    }

    impl StatusClient for MockStatusClient {
        fn fetch_status(&self) -> StatusFuture<'_> {
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockStatusClient {
            response: Ok(StatusReport {
                message: "ok".into(),
                version: "1.0.0".into(),
                status: None,
            }),
        };

        let report = mock.fetch_status().await.unwrap();
        assert_eq!(report.version, "1.0.0");
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockStatusClient {
            response: Err(StatusError::Request("Test error".to_string())),
        };

        assert!(mock.fetch_status().await.is_err());
    }

    #[tokio::test]
    async fn test_reqwest_client_unreachable_host() {
        // Reserve a free port, then release it so nothing is listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client =
            ReqwestStatusClient::new(format!("http://127.0.0.1:{}/api/status", port)).unwrap();
        let result = client.fetch_status().await;
        assert!(matches!(result, Err(StatusError::Request(_))));
    }
}
