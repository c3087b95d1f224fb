//! Error types for the resource client.
//!
//! # Design
//! `ApiError` is the single error surface callers see. The variants map the
//! failure classes a caller actually handles differently: the server never
//! answered, the server answered with a failure status, the request could not
//! be built, or the call succeeded at the HTTP level but the envelope carried
//! no data. `MissingData` gets a dedicated variant because HTTP success and
//! operation success are not the same thing for this API.
//!
//! `TransportError` is the narrower error an [`HttpBackend`] reports; it only
//! covers true transport faults (timeouts, refused connections). Ordinary
//! 4xx/5xx responses are returned as data and classified here as `Server`.
//!
//! [`HttpBackend`]: crate::transport::HttpBackend

use thiserror::Error;

/// Errors returned by [`ResourceClient`](crate::client::ResourceClient)
/// operations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request was sent but no response ever reached the client.
    #[error("No response received from server")]
    NoResponse { details: Option<String> },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// The request could not be constructed (e.g. the body failed to
    /// serialize). Raised before any I/O happens.
    #[error("{message}")]
    Request { message: String },

    /// The HTTP call succeeded but the response envelope carried no `data`
    /// for an operation that requires it.
    #[error("No data returned from API")]
    MissingData,

    /// A success-status body that did not parse into the expected shape.
    #[error("failed to deserialize response body: {message}")]
    Deserialization { message: String },
}

impl ApiError {
    /// Construction failure with the source's message, or a generic fallback
    /// when the source produced none.
    pub fn request(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            "An unexpected error occurred".to_string()
        } else {
            message
        };
        ApiError::Request { message }
    }

    /// The HTTP status associated with this error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors reported by an [`HttpBackend`](crate::transport::HttpBackend)
/// implementation.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::NoResponse {
            details: Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_contract_messages() {
        let err = ApiError::NoResponse { details: None };
        assert_eq!(err.to_string(), "No response received from server");

        let err = ApiError::MissingData;
        assert_eq!(err.to_string(), "No data returned from API");

        let err = ApiError::Server {
            status: 500,
            message: "Request failed".to_string(),
            details: None,
        };
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn request_falls_back_when_source_has_no_message() {
        assert_eq!(
            ApiError::request("").to_string(),
            "An unexpected error occurred"
        );
        assert_eq!(ApiError::request("bad body").to_string(), "bad body");
    }

    #[test]
    fn transport_errors_map_to_no_response() {
        let err: ApiError = TransportError::Timeout.into();
        match err {
            ApiError::NoResponse { details } => {
                assert_eq!(details.as_deref(), Some("request timed out"));
            }
            other => panic!("expected NoResponse, got {other:?}"),
        }
    }

    #[test]
    fn status_is_only_present_on_server_errors() {
        let err = ApiError::Server {
            status: 404,
            message: "lesson not found".to_string(),
            details: None,
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::MissingData.status(), None);
    }
}
