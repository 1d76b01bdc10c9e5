//! Injectable HTTP client boundary.
//!
//! The validator only needs "execute this request"; anything satisfying
//! [`HttpClient`] may be injected — the plain [`reqwest::Client`], an
//! instrumented wrapper, or a test double pointed at a mock server.

use async_trait::async_trait;

use crate::error::AuthError;

/// Minimal outbound HTTP capability consumed by the JWKS fetch.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes the request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Network`] on connection or timeout failures.
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, AuthError>;
}

#[async_trait]
impl HttpClient for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, AuthError> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(|e| AuthError::network(e.to_string()))
    }
}
