//! Version manifest handling
//!
//! - [`resolver`]: fetch the current `latest.json` from a GitHub release
//! - [`rewrite`]: point each platform URL back through the proxy

pub mod resolver;
pub mod rewrite;
pub mod types;

pub use resolver::{resolve_manifest, MANIFEST_ASSET_NAME};
pub use rewrite::{rewrite_manifest_urls, DOWNLOAD_PREFIX};
pub use types::{PlatformEntry, ReleaseManifest};
