//! # Stateless request/response mapping for API operations
//!
//! Mapping overview:
//! - Success (2xx): parse the body into the operation's typed output.
//! - Anything else: [`ApiError`] with the status code, the raw body, and the
//!   body decoded as an [`RpcStatus`] when it is one.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, Request};
use serde::de::DeserializeOwned;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{ApiError, ApiResult, DecodeError, TransportError};
use crate::formats::Registry;
use crate::params::WriteToRequest;
use crate::request::{ClientRequest, HttpRequest};
use crate::status::RpcStatus;

/// Media type every operation asks for and returns.
pub const JSON: &str = "application/json";

/// An API operation, implemented on the operation's parameter type.
pub trait ApiOperation: WriteToRequest {
    /// Operation id from the API definition
    const ID: &'static str;

    /// HTTP method
    const METHOD: Method;

    /// Path relative to the API host
    const PATH: &'static str;

    /// Decoded 2xx body
    type Output: DeserializeOwned;

    /// Signal that aborts the call when triggered.
    fn cancellation(&self) -> Option<&CancellationToken> {
        None
    }

    /// Transport to use instead of the client's own.
    #[cfg(feature = "reqwest-client")]
    fn http_client(&self) -> Option<&reqwest::Client> {
        None
    }
}

/// Per-client options applied to every request.
#[derive(Debug, Default, Clone)]
pub struct CallOptions {
    /// Bearer token sent as `Authorization`.
    pub bearer_token: Option<SmolStr>,
    /// Extra headers to attach to each request.
    pub extra_headers: Vec<(HeaderName, HeaderValue)>,
}

/// Build the HTTP request for `op`, returning it with the timeout the
/// parameters asked for.
pub fn build_http_request<O>(
    base: &Url,
    op: &O,
    reg: &Registry,
    opts: &CallOptions,
) -> ApiResult<(Request<Vec<u8>>, Duration)>
where
    O: ApiOperation,
{
    let mut req = HttpRequest::new(O::METHOD, base, O::PATH);
    req.set_header_param(http::header::ACCEPT.as_str(), JSON)
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
    if let Some(token) = &opts.bearer_token {
        req.set_header_param(
            http::header::AUTHORIZATION.as_str(),
            &format!("Bearer {}", token),
        )
        .map_err(|e| TransportError::InvalidRequest(format!("Invalid bearer token: {}", e)))?;
    }

    op.write_to_request(&mut req, reg)?;

    let timeout = req.timeout();
    let mut http_request = req.into_http()?;
    for (name, value) in &opts.extra_headers {
        http_request.headers_mut().insert(name.clone(), value.clone());
    }
    Ok((http_request, timeout))
}

/// Turn a raw response into the operation output or an [`ApiError`].
pub fn process_response<T>(http_response: http::Response<Vec<u8>>) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let status = http_response.status();
    let buffer = Bytes::from(http_response.into_body());

    if status.is_success() {
        // An empty 2xx body decodes like `{}`.
        let body: &[u8] = if buffer.is_empty() { b"{}" } else { &buffer };
        return serde_json::from_slice(body).map_err(|e| DecodeError::Json(e).into());
    }

    let payload = serde_json::from_slice::<RpcStatus>(&buffer).ok();
    #[cfg(feature = "tracing")]
    tracing::debug!(%status, has_status_payload = payload.is_some(), "api error response");
    Err(ApiError {
        status,
        payload,
        body: Some(buffer),
    }
    .into())
}
