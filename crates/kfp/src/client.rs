//! Client for sending typed API operations.

use kfp_api::models::{ApiListPipelineVersionsResponse, ApiPipelineVersion};
use kfp_api::pipeline_service::ListPipelineVersionsV1Params;
use kfp_common::error::{ApiResult, TransportError};
use kfp_common::http_client::HttpClient;
use kfp_common::operation::{build_http_request, process_response};
use kfp_common::url::Url;
use kfp_common::{ApiOperation, CallOptions, Registry, reqwest};

/// Sends API operations to one Kubeflow Pipelines host.
///
/// Example
/// ```ignore
/// use kfp::client::PipelineClient;
/// use kfp::api::pipeline_service::ListPipelineVersionsV1Params;
/// use kfp::api::models::ApiResourceType;
///
/// #[tokio::main]
/// async fn main() -> miette::Result<()> {
///     let client = PipelineClient::new(url::Url::parse("http://localhost:8888").unwrap());
///     let params = ListPipelineVersionsV1Params::new()
///         .with_resource_key_type(ApiResourceType::Pipeline)
///         .with_resource_key_id("0f3e6d6c-pipeline")
///         .with_sort_by("created_at desc")
///         .with_page_size(20);
///     let page = client.list_pipeline_versions_v1(&params).await?;
///     for v in page.versions {
///         println!("{:?} {:?}", v.id, v.name);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PipelineClient<C: HttpClient = reqwest::Client> {
    client: C,
    base: Url,
    registry: Registry,
    opts: CallOptions,
}

impl PipelineClient<reqwest::Client> {
    /// Client using a fresh reqwest transport.
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }
}

impl<C: HttpClient> PipelineClient<C> {
    /// Client using the given transport.
    pub fn with_client(client: C, base: Url) -> Self {
        Self {
            client,
            base,
            registry: Registry::default(),
            opts: CallOptions::default(),
        }
    }

    /// Replace the per-client options.
    pub fn with_options(mut self, opts: CallOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Send `op` and decode its output.
    ///
    /// The operation's timeout bounds the whole exchange (zero means no
    /// bound). Its cancellation token is checked before sending and raced
    /// against the response.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, op), fields(operation = O::ID)))]
    pub async fn submit<O>(&self, op: &O) -> ApiResult<O::Output>
    where
        O: ApiOperation + Sync,
    {
        let (request, timeout) = build_http_request(&self.base, op, &self.registry, &self.opts)?;

        if op.cancellation().is_some_and(|t| t.is_cancelled()) {
            return Err(TransportError::Cancelled.into());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(uri = %request.uri(), ?timeout, "sending request");

        let send = async {
            match op.http_client() {
                Some(http) => http.send_http(request).await,
                None => self
                    .client
                    .send_http(request)
                    .await
                    .map_err(TransportError::from_client),
            }
        };

        let bounded = async {
            if timeout.is_zero() {
                send.await
            } else {
                match tokio::time::timeout(timeout, send).await {
                    Ok(res) => res,
                    Err(_) => Err(TransportError::Timeout),
                }
            }
        };

        let response = match op.cancellation() {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(TransportError::Cancelled),
                res = bounded => res,
            },
            None => bounded.await,
        }?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status = %response.status(), "received response");

        process_response(response)
    }

    /// One page of pipeline versions.
    pub async fn list_pipeline_versions_v1(
        &self,
        params: &ListPipelineVersionsV1Params,
    ) -> ApiResult<ApiListPipelineVersionsResponse> {
        self.submit(params).await
    }

    /// Every pipeline version matching `params`, following page tokens until
    /// the server stops returning a new one.
    pub async fn list_all_pipeline_versions_v1(
        &self,
        mut params: ListPipelineVersionsV1Params,
    ) -> ApiResult<Vec<ApiPipelineVersion>> {
        let mut versions = Vec::new();
        loop {
            let page = self.list_pipeline_versions_v1(&params).await?;
            versions.extend(page.versions);
            match page.next_page_token {
                Some(token) if !token.is_empty() => {
                    if params.page_token.as_ref() == Some(&token) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(%token, "server repeated page token, stopping");
                        return Ok(versions);
                    }
                    params.set_page_token(Some(token));
                }
                _ => return Ok(versions),
            }
        }
    }
}
