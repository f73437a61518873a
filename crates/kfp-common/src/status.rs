use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Error body returned by the API gateway for any non-2xx response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RpcStatus {
    /// gRPC status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    /// Human readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<SmolStr>,
    /// Typed error details
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ProtobufAny>,
}

/// `google.protobuf.Any` as rendered in JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtobufAny {
    /// Type URL identifying the packed message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_url: Option<SmolStr>,
    /// Base64-encoded serialized message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
