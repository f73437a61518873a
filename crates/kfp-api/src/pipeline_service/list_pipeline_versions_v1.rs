use std::time::Duration;

use http::Method;
use kfp_common::error::WriteError;
use kfp_common::params::{CompositeValidationError, WriteToRequest, write_query_param};
use kfp_common::reqwest;
use kfp_common::{ApiOperation, CancellationToken, ClientRequest, DEFAULT_TIMEOUT, Registry};
use smol_str::SmolStr;

use crate::models::{ApiListPipelineVersionsResponse, ApiResourceType};

/// Request-level settings that are not sent as parameters.
#[derive(Debug, Clone, bon::Builder)]
pub struct ParamsOptions {
    /// Deadline for the call. Zero disables it.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Cancels the call when triggered.
    pub context: Option<CancellationToken>,
    /// Transport to use instead of the client's own.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ParamsOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Parameters for the list pipeline versions v1 operation.
///
/// Every query field is optional. A field that is `None`, or a string that
/// is empty, is left off the request.
#[derive(Debug, Clone)]
pub struct ListPipelineVersionsV1Params {
    /// A base-64 encoded, JSON-serialized Filter protocol buffer (see
    /// filter.proto).
    pub filter: Option<SmolStr>,
    /// The number of pipeline versions to be listed per page. If there are more
    /// pipeline versions than this number, the response message will contain a
    /// nextPageToken field you can use to fetch the next page.
    pub page_size: Option<i32>,
    /// A page token to request the next page of results. The token is acquired
    /// from the nextPageToken field of the response from the previous
    /// ListPipelineVersions call or can be omitted when fetching the first page.
    pub page_token: Option<SmolStr>,
    /// The ID of the resource that referred to.
    pub resource_key_id: Option<SmolStr>,
    /// The type of the resource that referred to.
    pub resource_key_type: Option<SmolStr>,
    /// Can be format of "field_name", "field_name asc" or "field_name desc"
    /// Ascending by default.
    pub sort_by: Option<SmolStr>,

    timeout: Duration,
    context: Option<CancellationToken>,
    http_client: Option<reqwest::Client>,
}

impl ListPipelineVersionsV1Params {
    /// Default parameters: resource type `UNKNOWN_RESOURCE_TYPE`, default timeout.
    pub fn new() -> Self {
        Self::with_options(ParamsOptions::default())
    }

    /// Default parameters with the given request settings.
    pub fn with_options(opts: ParamsOptions) -> Self {
        Self {
            filter: None,
            page_size: None,
            page_token: None,
            resource_key_id: None,
            resource_key_type: Some(ApiResourceType::UnknownResourceType.into()),
            sort_by: None,
            timeout: opts.timeout,
            context: opts.context,
            http_client: opts.http_client,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn context(&self) -> Option<&CancellationToken> {
        self.context.as_ref()
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    pub fn set_context(&mut self, context: Option<CancellationToken>) {
        self.context = context;
    }

    pub fn with_context(mut self, context: CancellationToken) -> Self {
        self.set_context(Some(context));
        self
    }

    pub fn set_http_client(&mut self, client: Option<reqwest::Client>) {
        self.http_client = client;
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.set_http_client(Some(client));
        self
    }

    pub fn set_filter(&mut self, filter: Option<SmolStr>) {
        self.filter = filter;
    }

    pub fn with_filter(mut self, filter: impl Into<SmolStr>) -> Self {
        self.set_filter(Some(filter.into()));
        self
    }

    pub fn set_page_size(&mut self, page_size: Option<i32>) {
        self.page_size = page_size;
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.set_page_size(Some(page_size));
        self
    }

    pub fn set_page_token(&mut self, page_token: Option<SmolStr>) {
        self.page_token = page_token;
    }

    pub fn with_page_token(mut self, page_token: impl Into<SmolStr>) -> Self {
        self.set_page_token(Some(page_token.into()));
        self
    }

    pub fn set_resource_key_id(&mut self, resource_key_id: Option<SmolStr>) {
        self.resource_key_id = resource_key_id;
    }

    pub fn with_resource_key_id(mut self, resource_key_id: impl Into<SmolStr>) -> Self {
        self.set_resource_key_id(Some(resource_key_id.into()));
        self
    }

    pub fn set_resource_key_type(&mut self, resource_key_type: Option<SmolStr>) {
        self.resource_key_type = resource_key_type;
    }

    /// Accepts a raw string or an [`ApiResourceType`].
    pub fn with_resource_key_type(mut self, resource_key_type: impl Into<SmolStr>) -> Self {
        self.set_resource_key_type(Some(resource_key_type.into()));
        self
    }

    pub fn set_sort_by(&mut self, sort_by: Option<SmolStr>) {
        self.sort_by = sort_by;
    }

    pub fn with_sort_by(mut self, sort_by: impl Into<SmolStr>) -> Self {
        self.set_sort_by(Some(sort_by.into()));
        self
    }
}

impl Default for ListPipelineVersionsV1Params {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteToRequest for ListPipelineVersionsV1Params {
    fn write_to_request(
        &self,
        req: &mut dyn ClientRequest,
        _reg: &Registry,
    ) -> Result<(), WriteError> {
        req.set_timeout(self.timeout)?;
        let mut res = Vec::new();

        write_query_param(req, &mut res, "filter", self.filter.as_deref());
        let page_size = self.page_size.map(|n| n.to_string());
        write_query_param(req, &mut res, "page_size", page_size.as_deref());
        write_query_param(req, &mut res, "page_token", self.page_token.as_deref());
        write_query_param(req, &mut res, "resource_key.id", self.resource_key_id.as_deref());
        write_query_param(req, &mut res, "resource_key.type", self.resource_key_type.as_deref());
        write_query_param(req, &mut res, "sort_by", self.sort_by.as_deref());

        Ok(CompositeValidationError::check(res)?)
    }
}

impl ApiOperation for ListPipelineVersionsV1Params {
    const ID: &'static str = "ListPipelineVersionsV1";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/apis/v1beta1/pipeline_versions";
    type Output = ApiListPipelineVersionsResponse;

    fn cancellation(&self) -> Option<&CancellationToken> {
        self.context.as_ref()
    }

    fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kfp_common::HttpRequest;
    use kfp_common::error::RequestError;
    use url::Url;

    fn request() -> HttpRequest {
        HttpRequest::new(
            Method::GET,
            &Url::parse("http://localhost:8888").unwrap(),
            ListPipelineVersionsV1Params::PATH,
        )
    }

    fn render(params: &ListPipelineVersionsV1Params) -> HttpRequest {
        let mut req = request();
        params
            .write_to_request(&mut req, &Registry::default())
            .unwrap();
        req
    }

    /// Records calls and fails for the configured names.
    #[derive(Default)]
    struct RecordingRequest {
        timeout: Option<Duration>,
        reject_timeout: bool,
        reject: Vec<&'static str>,
        params: Vec<(String, String)>,
    }

    impl ClientRequest for RecordingRequest {
        fn set_timeout(&mut self, timeout: Duration) -> Result<(), RequestError> {
            if self.reject_timeout {
                return Err(RequestError::Other("timeout refused".into()));
            }
            self.timeout = Some(timeout);
            Ok(())
        }

        fn set_query_param(&mut self, name: &str, value: &str) -> Result<(), RequestError> {
            if self.reject.iter().any(|r| *r == name) {
                return Err(RequestError::InvalidParam {
                    name: name.into(),
                    reason: "refused".into(),
                });
            }
            self.params.push((name.to_owned(), value.to_owned()));
            Ok(())
        }

        fn set_header_param(&mut self, _name: &str, _value: &str) -> Result<(), RequestError> {
            Ok(())
        }
    }

    #[test]
    fn defaults() {
        let params = ListPipelineVersionsV1Params::new();
        assert_eq!(params.resource_key_type.as_deref(), Some("UNKNOWN_RESOURCE_TYPE"));
        assert_eq!(params.timeout(), DEFAULT_TIMEOUT);
        assert!(params.context().is_none());
        assert!(params.http_client().is_none());
        assert!(params.filter.is_none());
        assert!(params.page_size.is_none());

        let req = render(&params);
        assert_eq!(req.query_string().unwrap(), "resource_key.type=UNKNOWN_RESOURCE_TYPE");
        assert_eq!(req.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn options_override_timeout_and_context() {
        let token = CancellationToken::new();
        let params = ListPipelineVersionsV1Params::with_options(
            ParamsOptions::builder()
                .timeout(Duration::from_secs(5))
                .context(token.clone())
                .build(),
        );
        assert_eq!(params.timeout(), Duration::from_secs(5));
        assert!(params.cancellation().is_some());
        assert_eq!(params.resource_key_type.as_deref(), Some("UNKNOWN_RESOURCE_TYPE"));

        let mut req = RecordingRequest::default();
        params
            .write_to_request(&mut req, &Registry::default())
            .unwrap();
        assert_eq!(req.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn unset_fields_are_not_sent() {
        let mut params = ListPipelineVersionsV1Params::new().with_filter("abc");
        params.set_resource_key_type(None);
        let req = render(&params);
        assert_eq!(req.query_params().len(), 1);
        for name in [
            "page_size",
            "page_token",
            "resource_key.id",
            "resource_key.type",
            "sort_by",
        ] {
            assert_eq!(req.query_param(name), None, "{name} should be absent");
        }
    }

    #[test]
    fn empty_resource_type_is_omitted() {
        let params = ListPipelineVersionsV1Params::new()
            .with_resource_key_type("")
            .with_resource_key_id("p-1");
        let req = render(&params);
        assert_eq!(req.query_param("resource_key.type"), None);
        assert_eq!(req.query_string().unwrap(), "resource_key.id=p-1");
    }

    #[test]
    fn zero_page_size_is_sent() {
        let params = ListPipelineVersionsV1Params::new().with_page_size(0);
        let req = render(&params);
        assert_eq!(req.query_param("page_size"), Some("0"));
    }

    #[test]
    fn sort_by_is_form_encoded() {
        let mut params = ListPipelineVersionsV1Params::new().with_sort_by("name desc");
        params.set_resource_key_type(None);
        let req = render(&params);
        assert_eq!(req.query_string().unwrap(), "sort_by=name+desc");
    }

    #[test]
    fn all_fields_render_in_order() {
        let params = ListPipelineVersionsV1Params::new()
            .with_filter("eyJwcmVkaWNhdGVzIjpbXX0=")
            .with_page_size(-3)
            .with_page_token("tok")
            .with_resource_key_id("p-1")
            .with_resource_key_type(ApiResourceType::Pipeline)
            .with_sort_by("created_at");
        let req = render(&params);
        assert_eq!(
            req.query_string().unwrap(),
            "filter=eyJwcmVkaWNhdGVzIjpbXX0%3D&page_size=-3&page_token=tok\
             &resource_key.id=p-1&resource_key.type=PIPELINE&sort_by=created_at"
        );
    }

    #[test]
    fn rejected_timeout_fails_before_any_param() {
        let params = ListPipelineVersionsV1Params::new().with_filter("abc");
        let mut req = RecordingRequest {
            reject_timeout: true,
            ..Default::default()
        };
        let err = params
            .write_to_request(&mut req, &Registry::default())
            .unwrap_err();
        assert!(matches!(err, WriteError::Request(RequestError::Other(_))));
        assert!(req.params.is_empty());
    }

    #[test]
    fn param_failures_are_aggregated() {
        let params = ListPipelineVersionsV1Params::new()
            .with_filter("abc")
            .with_page_size(10)
            .with_sort_by("name");
        let mut req = RecordingRequest {
            reject: vec!["filter", "sort_by"],
            ..Default::default()
        };
        let err = params
            .write_to_request(&mut req, &Registry::default())
            .unwrap_err();
        match err {
            WriteError::Validation(composite) => {
                let names: Vec<_> = composite
                    .errors
                    .iter()
                    .map(|e| match e {
                        RequestError::InvalidParam { name, .. } => name.to_string(),
                        other => panic!("unexpected: {other:?}"),
                    })
                    .collect();
                assert_eq!(names, vec!["filter", "sort_by"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
        // attached parameters are not rolled back
        assert_eq!(
            req.params,
            vec![
                ("page_size".to_owned(), "10".to_owned()),
                (
                    "resource_key.type".to_owned(),
                    "UNKNOWN_RESOURCE_TYPE".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn setters_can_clear_fields() {
        let mut params = ListPipelineVersionsV1Params::new()
            .with_page_token("tok")
            .with_timeout(Duration::ZERO);
        params.set_page_token(None);
        assert!(params.page_token.is_none());
        assert_eq!(params.timeout(), Duration::ZERO);
    }
}
