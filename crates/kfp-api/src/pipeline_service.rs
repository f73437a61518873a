//! PipelineService operations.

pub mod list_pipeline_versions_v1;

pub use list_pipeline_versions_v1::{ListPipelineVersionsV1Params, ParamsOptions};
