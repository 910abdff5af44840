//! Parsing of the two GitHub references the proxy works with
//!
//! - [`UpstreamReference`]: the configured repository URL
//!   (`https://github.com/owner/repo[...]`)
//! - [`DownloadPathReference`]: the path a client requests below `/download`
//!   (`/owner/repo/releases/download/tag/filename`)

use crate::core::error::{ProxyError, ProxyResult};
use std::fmt;
use url::Url;

const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Which release of the upstream repository to read the manifest from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelector {
    Latest,
    Tag(String),
}

impl fmt::Display for ReleaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseSelector::Latest => write!(f, "latest"),
            ReleaseSelector::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// Repository the proxy fronts, derived from the configured upstream URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReference {
    pub owner: String,
    pub repo: String,
    pub release: ReleaseSelector,
}

impl UpstreamReference {
    /// Parse an upstream repository URL
    ///
    /// Accepted shapes (anything after `owner/repo` that is not a tag form
    /// selects the latest release):
    /// - `https://github.com/owner/repo`
    /// - `https://github.com/owner/repo/releases/latest/download`
    /// - `https://github.com/owner/repo/releases/tag/v1.2.3`
    /// - `https://github.com/owner/repo/releases/download/v1.2.3`
    pub fn parse(upstream_url: &str) -> ProxyResult<Self> {
        let url = Url::parse(upstream_url)
            .map_err(|e| ProxyError::InvalidUpstream(format!("{}: {}", upstream_url, e)))?;

        let host = url.host_str().unwrap_or_default();
        if !GITHUB_HOSTS.contains(&host) {
            return Err(ProxyError::InvalidUpstream(format!(
                "{}: not a GitHub URL",
                upstream_url
            )));
        }

        let segments: Vec<String> = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect::<ProxyResult<_>>()
            .map_err(|_| {
                ProxyError::InvalidUpstream(format!("{}: undecodable path", upstream_url))
            })?;

        let (owner, repo) = match segments.as_slice() {
            [owner, repo, ..] => (owner.clone(), repo.trim_end_matches(".git").to_string()),
            _ => {
                return Err(ProxyError::InvalidUpstream(format!(
                    "{}: expected https://github.com/owner/repo",
                    upstream_url
                )))
            }
        };

        if repo.is_empty() {
            return Err(ProxyError::InvalidUpstream(format!(
                "{}: empty repository name",
                upstream_url
            )));
        }

        let release = match &segments[2..] {
            [releases, kind, tag, ..]
                if releases == "releases" && (kind == "tag" || kind == "download") =>
            {
                ReleaseSelector::Tag(tag.clone())
            }
            _ => ReleaseSelector::Latest,
        };

        Ok(Self {
            owner,
            repo,
            release,
        })
    }
}

/// A release asset addressed through the proxy's `/download` route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPathReference {
    pub owner: String,
    pub repo: String,
    pub tag: String,
    pub filename: String,
}

impl DownloadPathReference {
    /// Parse `/owner/repo/releases/download/tag/filename`
    ///
    /// Every segment is required and percent-decoded; a missing, empty or
    /// extra segment is an [`ProxyError::InvalidPath`].
    pub fn parse(path: &str) -> ProxyResult<Self> {
        let invalid = || ProxyError::InvalidPath(path.to_string());

        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let raw: Vec<&str> = trimmed.split('/').collect();

        let [owner, repo, releases, download, tag, filename] = raw.as_slice() else {
            return Err(invalid());
        };
        if *releases != "releases" || *download != "download" {
            return Err(invalid());
        }

        let decoded = [owner, repo, tag, filename]
            .iter()
            .map(|s| decode_segment(s))
            .collect::<ProxyResult<Vec<_>>>()
            .map_err(|_| invalid())?;
        if decoded.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }

        let [owner, repo, tag, filename]: [String; 4] =
            decoded.try_into().map_err(|_| invalid())?;

        Ok(Self {
            owner,
            repo,
            tag,
            filename,
        })
    }

    /// The GitHub web path this reference was derived from
    pub fn github_path(&self) -> String {
        format!(
            "/{}/{}/releases/download/{}/{}",
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo),
            urlencoding::encode(&self.tag),
            urlencoding::encode(&self.filename)
        )
    }
}

fn decode_segment(segment: &str) -> ProxyResult<String> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|e| ProxyError::InvalidPath(format!("{}: {}", segment, e)))
}
