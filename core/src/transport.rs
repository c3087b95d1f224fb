//! HTTP transport: the backend trait and the verb-level wrapper.
//!
//! # Design
//! [`HttpBackend`] is the only place real I/O happens; it fails exclusively
//! on transport faults and returns 4xx/5xx responses as data. [`Transport`]
//! sits above it and funnels every outcome into one shape: a parsed
//! [`Envelope`] on success, an [`ApiError`] otherwise. Nothing at this layer
//! retries, caches, or holds state between calls — concurrent requests are
//! independent futures.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::envelope::{Envelope, ErrorBody};
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Trait for pluggable HTTP executors.
///
/// Uses RPITIT (`impl Future` in the trait) — no `async-trait` macro
/// required. Implementations must return ordinary HTTP error statuses as
/// `Ok(HttpResponse)`; `Err` is reserved for true transport faults.
pub trait HttpBackend: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Verb-level wrapper over an [`HttpBackend`], owning the base URL.
#[derive(Debug, Clone)]
pub struct Transport<B> {
    base_url: String,
    backend: B,
}

impl<B: HttpBackend> Transport<B> {
    pub fn new(base_url: &str, backend: B) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            backend,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Vec<(String, String)>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(HttpMethod::Get, path, None, headers).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<String>,
        headers: Vec<(String, String)>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(HttpMethod::Post, path, body, headers).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<String>,
        headers: Vec<(String, String)>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(HttpMethod::Put, path, body, headers).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<String>,
        headers: Vec<(String, String)>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(HttpMethod::Patch, path, body, headers).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Vec<(String, String)>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send(HttpMethod::Delete, path, None, headers).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        headers: Vec<(String, String)>,
    ) -> Result<Envelope<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        let response = self.backend.send(request).await.map_err(ApiError::from)?;
        interpret(response)
    }
}

/// Classify a raw response: non-2xx becomes [`ApiError::Server`] with the
/// body's `message` (or "Request failed"), a 2xx body parses into an
/// [`Envelope`]. An empty 2xx body is a valid empty envelope.
fn interpret<T: DeserializeOwned>(response: HttpResponse) -> Result<Envelope<T>, ApiError> {
    if !response.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Request failed".to_string());
        return Err(ApiError::Server {
            status: response.status,
            message,
            details: (!response.body.is_empty()).then(|| response.body.clone()),
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Envelope::empty());
    }

    serde_json::from_str(&response.body).map_err(|err| {
        error!(
            status = response.status,
            %err,
            body = %response.body,
            "error deserializing response body"
        );
        ApiError::Deserialization {
            message: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn success_body_parses_into_envelope() {
        let envelope: Envelope<Vec<u32>> = interpret(response(200, r#"{"data":[1,2]}"#)).unwrap();
        assert_eq!(envelope.data, Some(vec![1, 2]));
    }

    #[test]
    fn empty_success_body_is_an_empty_envelope() {
        let envelope: Envelope<Vec<u32>> = interpret(response(204, "")).unwrap();
        assert!(envelope.data.is_none());

        let envelope: Envelope<Vec<u32>> = interpret(response(200, "  \n")).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn server_error_uses_body_message() {
        let err = interpret::<Vec<u32>>(response(404, r#"{"message":"lesson not found"}"#))
            .unwrap_err();
        match err {
            ApiError::Server {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "lesson not found");
                assert_eq!(details.as_deref(), Some(r#"{"message":"lesson not found"}"#));
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn server_error_without_message_falls_back() {
        let err = interpret::<Vec<u32>>(response(500, "<html>oops</html>")).unwrap_err();
        match err {
            ApiError::Server {
                status, message, ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Request failed");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_success_body_is_a_deserialization_error() {
        let err = interpret::<Vec<u32>>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization { .. }));
    }
}
