//! Update manifest document served to clients

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version manifest consumed by the auto-update client
///
/// Platform order is kept exactly as GitHub served it. Keys the proxy does
/// not know about are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    pub platforms: IndexMap<String, PlatformEntry>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Download information for a single platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// Opaque signature, passed through untouched
    pub signature: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ReleaseManifest {
    /// Parse a manifest from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> crate::core::ProxyResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
