//! Error types for kfp client operations

use bytes::Bytes;
use smol_str::SmolStr;

use crate::params::CompositeValidationError;
use crate::status::RpcStatus;

/// Client error type wrapping all possible error conditions
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Transport(
        #[from]
        #[diagnostic_source]
        TransportError,
    ),

    /// Parameters could not be written onto the request
    #[error("{0}")]
    Write(
        #[from]
        #[diagnostic_source]
        WriteError,
    ),

    /// Request serialization failed
    #[error("{0}")]
    Encode(
        #[from]
        #[diagnostic_source]
        EncodeError,
    ),

    /// Response deserialization failed
    #[error("{0}")]
    Decode(
        #[from]
        #[diagnostic_source]
        DecodeError,
    ),

    /// Non-2xx response from the API
    #[error("{0}")]
    Api(
        #[from]
        #[diagnostic_source]
        ApiError,
    ),
}

/// Transport-level errors that occur during HTTP communication
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TransportError {
    /// Failed to establish connection to server
    #[error("Connection error: {0}")]
    Connect(String),

    /// Request did not complete before its timeout
    #[error("Request timeout")]
    Timeout,

    /// Caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Request construction failed (malformed URI, headers, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Other transport error
    #[error("Transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Error reported by a [`ClientRequest`](crate::request::ClientRequest) when a value is rejected
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum RequestError {
    /// Query parameter could not be attached
    #[error("invalid query parameter `{name}`: {reason}")]
    #[diagnostic(code(kfp::request::query_param))]
    InvalidParam {
        /// Parameter name as given
        name: SmolStr,
        /// Why it was rejected
        reason: SmolStr,
    },

    /// Header could not be attached
    #[error("invalid header `{name}`: {reason}")]
    #[diagnostic(code(kfp::request::header))]
    InvalidHeader {
        /// Header name as given
        name: SmolStr,
        /// Why it was rejected
        reason: SmolStr,
    },

    /// Any other failure from the request implementation
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Failure while writing parameters onto a request
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum WriteError {
    /// The request rejected a setting outright (currently only the timeout)
    #[error(transparent)]
    #[diagnostic(transparent)]
    Request(#[from] RequestError),

    /// One or more parameters failed to attach
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] CompositeValidationError),
}

/// Error type for encoding requests
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum EncodeError {
    /// Failed to serialize query parameters
    #[error("Failed to serialize query: {0}")]
    Query(
        #[from]
        #[source]
        serde_html_form::ser::Error,
    ),
}

/// Response deserialization errors
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    /// JSON deserialization failed
    #[error("Failed to deserialize JSON: {0}")]
    Json(
        #[from]
        #[source]
        serde_json::Error,
    ),
}

/// Non-2xx response. The body is parsed as a `google.rpc.Status` when possible.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub struct ApiError {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Decoded status payload
    pub payload: Option<RpcStatus>,
    /// Raw response body
    pub body: Option<Bytes>,
}

impl ApiError {
    /// Server-provided message, if the payload carried one.
    pub fn message(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|p| p.message.as_deref())
            .filter(|m| !m.is_empty())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(message) = self.message() {
            write!(f, ": {}", message)?;
        } else if let Some(body) = &self.body {
            if let Ok(s) = std::str::from_utf8(body) {
                if !s.is_empty() {
                    write!(f, ":\n{}", s)?;
                }
            }
        }
        Ok(())
    }
}

/// Result type for client operations
pub type ApiResult<T> = std::result::Result<T, ClientError>;

impl TransportError {
    /// Wrap an error from an [`HttpClient`](crate::http_client::HttpClient).
    ///
    /// A client that already reports a `TransportError` keeps its variant.
    pub fn from_client<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(e);
        match boxed.downcast::<TransportError>() {
            Ok(inner) => *inner,
            Err(other) => Self::Other(other),
        }
    }
}

#[cfg(feature = "reqwest-client")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_builder() || e.is_request() {
            Self::InvalidRequest(e.to_string())
        } else {
            Self::Other(Box::new(e))
        }
    }
}
