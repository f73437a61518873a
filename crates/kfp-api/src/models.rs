//! Response models shared by the pipeline service operations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Response of `ListPipelineVersions`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiListPipelineVersionsResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<ApiPipelineVersion>,
    /// The token to request the next page of pipeline versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<SmolStr>,
    /// The total number of pipeline versions for the given query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiPipelineVersion {
    /// Output. Unique version ID. Generated by API server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SmolStr>,
    /// Optional input field. Version name provided by user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,
    /// Output. The time this pipeline version is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Output. The input parameters for this pipeline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ApiParameter>,
    /// Input. Optional. Pipeline version code source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_source_url: Option<SmolStr>,
    /// Input. Required. Pipeline version package url.
    /// When calling CreatePipelineVersion API method, need to provide one package
    /// file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_url: Option<ApiUrl>,
    /// Input field. Specify which resource this pipeline version belongs to.
    /// For Experiment, the only valid resource reference is a single Namespace.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_references: Vec<ApiResourceReference>,
    /// Input. Optional. Description for the pipeline version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SmolStr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SmolStr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiUrl {
    /// URL of the pipeline definition or the pipeline version definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_url: Option<SmolStr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResourceReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ApiResourceKey>,
    /// The name of the resource that referred to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,
    /// Required field. The relationship from referred resource to the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<ApiRelationship>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResourceKey {
    /// The type of the resource that referred to.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ApiResourceType>,
    /// The ID of the resource that referred to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SmolStr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiResourceType {
    #[default]
    UnknownResourceType,
    Experiment,
    Job,
    Pipeline,
    PipelineVersion,
    Namespace,
}

impl ApiResourceType {
    pub const ALL: [Self; 6] = [
        Self::UnknownResourceType,
        Self::Experiment,
        Self::Job,
        Self::Pipeline,
        Self::PipelineVersion,
        Self::Namespace,
    ];

    /// Wire name, e.g. `PIPELINE_VERSION`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownResourceType => "UNKNOWN_RESOURCE_TYPE",
            Self::Experiment => "EXPERIMENT",
            Self::Job => "JOB",
            Self::Pipeline => "PIPELINE",
            Self::PipelineVersion => "PIPELINE_VERSION",
            Self::Namespace => "NAMESPACE",
        }
    }
}

impl fmt::Display for ApiResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type `{0}`")]
pub struct UnknownResourceType(pub String);

impl FromStr for ApiResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownResourceType(s.to_owned()))
    }
}

impl From<ApiResourceType> for SmolStr {
    fn from(value: ApiResourceType) -> Self {
        SmolStr::new_static(value.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiRelationship {
    #[default]
    UnknownRelationship,
    Owner,
    Creator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_gateway_listing() {
        let body = serde_json::json!({
            "versions": [{
                "id": "8b3a6f1e",
                "name": "v2",
                "created_at": "2023-05-04T10:11:12Z",
                "parameters": [{"name": "lr", "value": "0.1"}],
                "package_url": {"pipeline_url": "gs://bucket/pipeline.yaml"},
                "resource_references": [{
                    "key": {"type": "PIPELINE", "id": "p-1"},
                    "relationship": "OWNER"
                }]
            }],
            "next_page_token": "abc",
            "total_size": 3
        });
        let resp: ApiListPipelineVersionsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.total_size, Some(3));
        assert_eq!(resp.next_page_token.as_deref(), Some("abc"));

        let v = &resp.versions[0];
        assert_eq!(v.name.as_deref(), Some("v2"));
        assert_eq!(
            v.created_at.unwrap().to_rfc3339(),
            "2023-05-04T10:11:12+00:00"
        );
        let reference = &v.resource_references[0];
        let key = reference.key.as_ref().unwrap();
        assert_eq!(key.kind, Some(ApiResourceType::Pipeline));
        assert_eq!(key.id.as_deref(), Some("p-1"));
        assert_eq!(reference.relationship, Some(ApiRelationship::Owner));
    }

    #[test]
    fn empty_object_is_empty_listing() {
        let resp: ApiListPipelineVersionsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, ApiListPipelineVersionsResponse::default());
    }

    #[test]
    fn resource_type_parses_case_insensitively() {
        assert_eq!(
            "pipeline_version".parse::<ApiResourceType>(),
            Ok(ApiResourceType::PipelineVersion)
        );
        assert!("pipelines".parse::<ApiResourceType>().is_err());
        assert_eq!(
            SmolStr::from(ApiResourceType::Namespace).as_str(),
            "NAMESPACE"
        );
    }
}
