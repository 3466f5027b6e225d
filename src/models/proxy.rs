//! Wire shapes for live proxy execution

use serde::{Deserialize, Serialize};

use super::{null_as_default, Headers};

/// Inbound description of one outbound call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Headers,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

/// Normalized result of an outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResponse {
    pub status_code: u16,
    /// Multi-valued headers are joined with `", "`.
    pub headers: Headers,
    pub body: String,
    /// Elapsed wall-clock milliseconds around the network round trip.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}
