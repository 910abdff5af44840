//! GitHub API type definitions

use serde::{Deserialize, Serialize};

/// GitHub release information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl GitHubRelease {
    /// Find an asset by exact name
    pub fn asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// GitHub release asset
///
/// `url` is the API endpoint; requesting it with
/// `Accept: application/octet-stream` yields the asset bytes, usually via a
/// redirect to a signed CDN URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    pub url: String,
}
