//! Manifest resolution against GitHub releases

use crate::core::{ProxyError, ProxyResult};
use crate::di::GitHubProvider;
use crate::manifest::types::ReleaseManifest;
use release_proxy_core::{ReleaseSelector, UpstreamReference};

/// Name of the release asset holding the update manifest
pub const MANIFEST_ASSET_NAME: &str = "latest.json";

/// Resolve the current manifest of the upstream repository
///
/// Looks up the selected release (latest or by tag), finds the
/// `latest.json` asset and downloads it through the provider, which
/// handles GitHub's signed redirect. The three calls run strictly in
/// sequence and each is attempted once.
pub async fn resolve_manifest(
    github: &dyn GitHubProvider,
    upstream: &UpstreamReference,
) -> ProxyResult<ReleaseManifest> {
    let release = match &upstream.release {
        ReleaseSelector::Latest => {
            github
                .get_latest_release(&upstream.owner, &upstream.repo)
                .await?
        }
        ReleaseSelector::Tag(tag) => {
            github
                .get_release_by_tag(&upstream.owner, &upstream.repo, tag)
                .await?
        }
    };

    tracing::debug!(
        owner = %upstream.owner,
        repo = %upstream.repo,
        tag = %release.tag_name,
        "Resolved release for manifest"
    );

    let asset = release
        .asset(MANIFEST_ASSET_NAME)
        .ok_or_else(|| ProxyError::ManifestAssetNotFound {
            tag: release.tag_name.clone(),
        })?;

    let body = github.download_asset(asset).await?.into_bytes().await?;
    ReleaseManifest::from_slice(&body)
}
