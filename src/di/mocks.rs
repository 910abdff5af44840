//! Mock implementations of service traits for testing

use super::traits::GitHubProvider;
use crate::core::{ProxyError, ProxyResult};
use crate::github::{AssetDownload, GitHubRelease, ReleaseAsset};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;

/// Canned asset response served by [`MockGitHubProvider`]
#[derive(Clone, Debug)]
pub struct MockAsset {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Mock GitHub provider for testing
///
/// Releases are keyed by `owner/repo` plus tag; assets by their API URL.
/// Anything not registered answers like GitHub would for a missing
/// resource (HTTP 404). Calls are readable through `recorded_calls`.
///
/// # Example
///
/// ```
/// use release_proxy::di::mocks::MockGitHubProvider;
///
/// let github = MockGitHubProvider::new()
///     .with_release("o", "r", MockGitHubProvider::release("v1.0.0", &[("app.zip", 1)]))
///     .with_asset(1, b"PK\x03\x04", Some("application/zip"));
/// ```
#[derive(Default)]
pub struct MockGitHubProvider {
    latest: HashMap<String, GitHubRelease>,
    releases: HashMap<String, GitHubRelease>,
    assets: HashMap<String, MockAsset>,
    failing_status: Option<StatusCode>,
    calls: Mutex<Vec<String>>,
}

impl MockGitHubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// API URL the mock assigns to an asset id
    pub fn asset_url(id: u64) -> String {
        format!("https://api.github.invalid/assets/{}", id)
    }

    /// Build a release with the given `(name, id)` assets
    pub fn release(tag: &str, assets: &[(&str, u64)]) -> GitHubRelease {
        GitHubRelease {
            tag_name: tag.to_string(),
            assets: assets
                .iter()
                .map(|(name, id)| ReleaseAsset {
                    id: *id,
                    name: name.to_string(),
                    url: Self::asset_url(*id),
                })
                .collect(),
        }
    }

    /// Register a release, reachable by its tag
    pub fn with_release(mut self, owner: &str, repo: &str, release: GitHubRelease) -> Self {
        let key = format!("{}/{}@{}", owner, repo, release.tag_name);
        self.releases.insert(key, release);
        self
    }

    /// Register a release as the repository's latest (also reachable by tag)
    pub fn with_latest(mut self, owner: &str, repo: &str, release: GitHubRelease) -> Self {
        self.latest
            .insert(format!("{}/{}", owner, repo), release.clone());
        self.with_release(owner, repo, release)
    }

    /// Register a 200 asset body
    pub fn with_asset(mut self, id: u64, body: &[u8], content_type: Option<&str>) -> Self {
        self.assets.insert(
            Self::asset_url(id),
            MockAsset {
                status: StatusCode::OK,
                content_type: content_type.map(str::to_string),
                body: body.to_vec(),
            },
        );
        self
    }

    /// Make every call fail with the given upstream status
    pub fn failing_with(mut self, status: StatusCode) -> Self {
        self.failing_status = Some(status);
        self
    }

    /// Calls recorded so far
    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> ProxyResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.clone());
        }
        match self.failing_status {
            Some(status) => Err(ProxyError::Upstream {
                status: status.as_u16(),
                context: call,
            }),
            None => Ok(()),
        }
    }

    fn not_found(context: String) -> ProxyError {
        ProxyError::Upstream {
            status: 404,
            context,
        }
    }
}

#[async_trait]
impl GitHubProvider for MockGitHubProvider {
    async fn get_latest_release(&self, owner: &str, repo: &str) -> ProxyResult<GitHubRelease> {
        let call = format!("latest {}/{}", owner, repo);
        self.record(call.clone())?;
        self.latest
            .get(&format!("{}/{}", owner, repo))
            .cloned()
            .ok_or_else(|| Self::not_found(call))
    }

    async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> ProxyResult<GitHubRelease> {
        let call = format!("tag {}/{}@{}", owner, repo, tag);
        self.record(call.clone())?;
        self.releases
            .get(&format!("{}/{}@{}", owner, repo, tag))
            .cloned()
            .ok_or_else(|| Self::not_found(call))
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> ProxyResult<AssetDownload> {
        let call = format!("asset {}", asset.name);
        self.record(call.clone())?;
        let mock = self
            .assets
            .get(&asset.url)
            .cloned()
            .ok_or_else(|| Self::not_found(call))?;
        Ok(AssetDownload::from_bytes(
            mock.status,
            mock.content_type.as_deref(),
            mock.body,
        ))
    }
}
