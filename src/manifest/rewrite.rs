//! Rewriting of platform URLs to proxy download URLs

use crate::core::{ProxyError, ProxyResult};
use crate::manifest::types::ReleaseManifest;
use url::Url;

/// Route prefix the asset download handler is mounted under
pub const DOWNLOAD_PREFIX: &str = "/download";

/// Point every platform URL back through the proxy
///
/// `https://github.com/o/r/releases/download/t/f` becomes
/// `{proxy_origin}/download/o/r/releases/download/t/f`. Scheme and host are
/// dropped, the path is kept byte for byte. Every other field, and the
/// platform order, is untouched.
pub fn rewrite_manifest_urls(
    manifest: ReleaseManifest,
    proxy_origin: &str,
) -> ProxyResult<ReleaseManifest> {
    let origin = proxy_origin.trim_end_matches('/');
    let mut manifest = manifest;

    for (platform, entry) in manifest.platforms.iter_mut() {
        entry.url = proxy_url(&entry.url, origin).map_err(|e| {
            ProxyError::InvalidManifest(format!("platform '{}': {}", platform, e))
        })?;
    }

    Ok(manifest)
}

fn proxy_url(upstream_url: &str, origin: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(upstream_url)?;
    Ok(format!("{}{}{}", origin, DOWNLOAD_PREFIX, parsed.path()))
}
