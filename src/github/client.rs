//! GitHub API client implementation

use crate::config::Config;
use crate::core::{ProxyError, ProxyResult};
use crate::di::traits::GitHubProvider;
use crate::github::asset::AssetDownload;
use crate::github::types::{GitHubRelease, ReleaseAsset};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{header, Client as HttpClient, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("release-proxy/", env!("CARGO_PKG_VERSION"));
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client
///
/// Holds two HTTP clients. `api_client` carries the bearer token and talks to
/// the GitHub API. `signed_client` carries no credentials and is the only
/// client that ever follows a redirect target. Neither follows redirects on
/// its own.
pub struct GitHubClient {
    api_client: HttpClient,
    signed_client: HttpClient,
    api_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: &Config) -> ProxyResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_static(GITHUB_API_VERSION),
        );

        if !config.github_token.is_empty() {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", config.github_token))
                .map_err(|e| ProxyError::Config(format!("Invalid GitHub token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let api_client = HttpClient::builder()
            .default_headers(headers)
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        let signed_client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            api_client,
            signed_client,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the latest release for a repository
    pub async fn get_latest_release(&self, owner: &str, repo: &str) -> ProxyResult<GitHubRelease> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        self.api_get(&url, &format!("fetching latest release of {}/{}", owner, repo))
            .await
    }

    /// Get a release by tag name
    pub async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> ProxyResult<GitHubRelease> {
        let url = format!(
            "{}/repos/{}/{}/releases/tags/{}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            urlencoding::encode(tag)
        );
        self.api_get(&url, &format!("fetching release {} of {}/{}", tag, owner, repo))
            .await
    }

    /// Fetch an asset's bytes through its API URL
    ///
    /// The authenticated request is sent without following redirects. A
    /// `302` is answered by exactly one unauthenticated request to its
    /// `Location`; a direct `2xx` is used as-is. Anything else fails.
    pub async fn download_asset(&self, asset: &ReleaseAsset) -> ProxyResult<AssetDownload> {
        let context = format!("downloading asset {}", asset.name);
        tracing::debug!(asset = %asset.name, id = asset.id, "Requesting asset from GitHub API");

        let response = self
            .api_client
            .get(&asset.url)
            .header(header::ACCEPT, "application/octet-stream")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::FOUND {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ProxyError::MissingLocation(context.clone()))?
                .to_string();
            return self.fetch_signed(&location, &context).await;
        }

        if !status.is_success() {
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                context,
            });
        }

        Ok(AssetDownload::from_response(response))
    }

    /// Follow a signed redirect target without credentials
    async fn fetch_signed(&self, location: &str, context: &str) -> ProxyResult<AssetDownload> {
        // The query string is the signature; keep it out of the logs.
        tracing::debug!(
            target_host = location.split('?').next().unwrap_or_default(),
            "Following signed redirect without credentials"
        );

        let response = self.signed_client.get(location).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                context: format!("{} (signed redirect)", context),
            });
        }

        Ok(AssetDownload::from_response(response))
    }

    /// Make an API GET request and parse JSON response
    async fn api_get<T: serde::de::DeserializeOwned>(&self, url: &str, context: &str) -> ProxyResult<T> {
        tracing::debug!(%url, "GitHub API request");

        let response = self
            .api_client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProxyError::Upstream {
                status: response.status().as_u16(),
                context: context.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

// Implement GitHubProvider trait
#[async_trait]
impl GitHubProvider for GitHubClient {
    async fn get_latest_release(&self, owner: &str, repo: &str) -> ProxyResult<GitHubRelease> {
        Self::get_latest_release(self, owner, repo).await
    }

    async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> ProxyResult<GitHubRelease> {
        Self::get_release_by_tag(self, owner, repo, tag).await
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> ProxyResult<AssetDownload> {
        Self::download_asset(self, asset).await
    }
}
