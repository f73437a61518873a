//! Kubeflow Pipelines v1beta1 API bindings.
//!
//! One module per operation, grouped by service, plus the shared response
//! models. Parameter types implement [`kfp_common::ApiOperation`] and are sent
//! with `kfp::client::PipelineClient`.

pub mod models;
pub mod pipeline_service;
