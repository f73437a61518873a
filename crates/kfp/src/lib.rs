//! # kfp
//!
//! Typed client for the Kubeflow Pipelines REST API.
//!
//! Operation parameters live in [`api`], one module per endpoint. Build a
//! parameter value, tweak it with its `with_*`/`set_*` methods, and hand it to
//! a [`client::PipelineClient`]:
//!
//! ```no_run
//! use kfp::api::pipeline_service::ListPipelineVersionsV1Params;
//! use kfp::client::PipelineClient;
//!
//! # async fn run() -> kfp::ApiResult<()> {
//! let client = PipelineClient::new(kfp::url::Url::parse("http://localhost:8888").unwrap());
//! let versions = client
//!     .list_all_pipeline_versions_v1(
//!         ListPipelineVersionsV1Params::new()
//!             .with_resource_key_type("PIPELINE")
//!             .with_resource_key_id("0f3e6d6c")
//!             .with_page_size(50),
//!     )
//!     .await?;
//! println!("{} versions", versions.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Operation dispatch and pagination helpers
pub mod client;

/// Re-export of the generated API bindings
pub use kfp_api as api;
pub use kfp_common::*;
