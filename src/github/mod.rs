//! GitHub integration for release resolution
//!
//! This module provides functionality for interacting with GitHub to:
//! - Fetch releases by tag or the latest release
//! - Download release assets through the API, following GitHub's signed
//!   redirect without forwarding credentials

pub mod asset;
pub mod client;
pub mod types;

pub use asset::{AssetDownload, ByteStream};
pub use client::GitHubClient;
pub use types::{GitHubRelease, ReleaseAsset};
