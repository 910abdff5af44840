//! Release asset resolution
//!
//! Turns a proxy download path back into the GitHub asset it was rewritten
//! from and opens a streamed download of it.

use crate::core::{ProxyError, ProxyResult};
use crate::di::GitHubProvider;
use crate::github::AssetDownload;
use release_proxy_core::DownloadPathReference;

/// Content type used when GitHub does not send one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Resolve `/owner/repo/releases/download/tag/filename` to asset bytes
///
/// A path of the wrong shape is [`ProxyError::InvalidPath`]. The asset name
/// must equal `filename` exactly. The returned body is still a stream; the
/// caller decides how to forward it.
pub async fn resolve_asset(github: &dyn GitHubProvider, path: &str) -> ProxyResult<AssetDownload> {
    let reference = DownloadPathReference::parse(path)?;

    let release = github
        .get_release_by_tag(&reference.owner, &reference.repo, &reference.tag)
        .await?;

    let asset = release
        .asset(&reference.filename)
        .ok_or_else(|| ProxyError::AssetNotFound {
            tag: reference.tag.clone(),
            name: reference.filename.clone(),
        })?;

    tracing::debug!(
        github_path = %reference.github_path(),
        asset_id = asset.id,
        "Resolved release asset"
    );

    let mut download = github.download_asset(asset).await?;
    if download.content_type.is_none() {
        download.content_type = Some(DEFAULT_CONTENT_TYPE.to_string());
    }
    Ok(download)
}
