//! The request object parameter writers render onto.
//!
//! [`ClientRequest`] is the narrow surface a generated params type sees. The
//! crate's own implementation, [`HttpRequest`], keeps the query pairs in
//! insertion order and turns into an [`http::Request`] once every writer has
//! run.

use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method, Request};
use smol_str::SmolStr;
use url::Url;

use crate::error::{EncodeError, RequestError, TransportError};

/// Deadline applied when a caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request surface that parameter writers attach values to.
pub trait ClientRequest {
    /// Set the deadline for the whole exchange. Zero disables the deadline.
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), RequestError>;

    /// Set a query parameter, replacing any earlier value with the same name.
    fn set_query_param(&mut self, name: &str, value: &str) -> Result<(), RequestError>;

    /// Set a header, replacing any earlier value with the same name.
    fn set_header_param(&mut self, name: &str, value: &str) -> Result<(), RequestError>;
}

/// Concrete request under construction.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    timeout: Duration,
    query: Vec<(SmolStr, SmolStr)>,
    headers: HeaderMap,
}

impl HttpRequest {
    /// Start a request for `path` relative to `base`.
    ///
    /// Any path on `base` is kept as a prefix, so a gateway mounted under
    /// `/pipeline` works the same as a bare host.
    pub fn new(method: Method, base: &Url, path: &str) -> Self {
        let mut url = base.clone();
        let mut full = url.path().trim_end_matches('/').to_owned();
        if !path.starts_with('/') {
            full.push('/');
        }
        full.push_str(path);
        url.set_path(&full);
        url.set_query(None);

        Self {
            method,
            url,
            timeout: DEFAULT_TIMEOUT,
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL without the query string
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Deadline currently set on the request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Value of a query parameter, if set
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All query parameters in the order they were first set
    pub fn query_params(&self) -> &[(SmolStr, SmolStr)] {
        &self.query
    }

    /// Headers set so far
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Form-urlencoded query string (`a=b&c=d+e`), empty if nothing was set.
    pub fn query_string(&self) -> Result<String, EncodeError> {
        Ok(serde_html_form::to_string(&self.query)?)
    }

    /// Finish the request. Queries carry an empty body.
    pub fn into_http(self) -> Result<Request<Vec<u8>>, TransportError> {
        let qs = self
            .query_string()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let mut url = self.url;
        if qs.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&qs));
        }

        let mut builder = Request::builder().method(self.method).uri(url.as_str());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }
        builder
            .body(Vec::new())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }
}

impl ClientRequest for HttpRequest {
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), RequestError> {
        self.timeout = timeout;
        Ok(())
    }

    fn set_query_param(&mut self, name: &str, value: &str) -> Result<(), RequestError> {
        if name.is_empty() {
            return Err(RequestError::InvalidParam {
                name: SmolStr::default(),
                reason: "name must not be empty".into(),
            });
        }
        match self.query.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.into(),
            None => self.query.push((name.into(), value.into())),
        }
        Ok(())
    }

    fn set_header_param(&mut self, name: &str, value: &str) -> Result<(), RequestError> {
        let invalid = |reason: String| RequestError::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        };
        let header = HeaderName::try_from(name).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        self.headers.insert(header, value);
        Ok(())
    }
}
