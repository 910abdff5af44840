//! Trait definitions for dependency injection

use crate::core::ProxyResult;
use crate::github::{AssetDownload, GitHubRelease, ReleaseAsset};
use async_trait::async_trait;

/// Trait for GitHub release operations
///
/// Implementations hold the GitHub credentials; callers never see the token.
/// Every method makes its upstream calls exactly once, without retries.
#[async_trait]
pub trait GitHubProvider: Send + Sync {
    /// Get the latest published release of a repository
    async fn get_latest_release(&self, owner: &str, repo: &str) -> ProxyResult<GitHubRelease>;

    /// Get the release with the given tag
    async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> ProxyResult<GitHubRelease>;

    /// Open a streamed download of a release asset
    async fn download_asset(&self, asset: &ReleaseAsset) -> ProxyResult<AssetDownload>;
}
