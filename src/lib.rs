//! Release Proxy: authenticated front for private GitHub Releases
//!
//! This crate serves an auto-updater's version manifest and release assets
//! from a private GitHub repository, injecting the GitHub token on the way
//! upstream and rewriting manifest URLs so every download comes back through
//! the proxy. Core error and reference types live in `release-proxy-core`.

pub use release_proxy_core::{
    DownloadPathReference, ProxyError, ProxyResult, ReleaseSelector, UpstreamReference,
};

/// Core module re-exported from `release-proxy-core`.
pub mod core {
    pub use release_proxy_core::core::*;
    pub use release_proxy_core::{ProxyError, ProxyResult};
}

/// Configuration loading (defaults, YAML file, environment).
pub mod config;

/// GitHub API client and wire types.
pub mod github;

/// Dependency injection infrastructure.
pub mod di;

/// Version manifest resolution and URL rewriting.
pub mod manifest;

/// Release asset resolution.
pub mod download;

/// HTTP routes, basic-auth gate and server startup.
pub mod server;
