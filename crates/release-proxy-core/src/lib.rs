//! Core types for release-proxy
//!
//! Holds the error taxonomy shared by every layer and the parsers for the
//! GitHub references the proxy resolves. Nothing here performs I/O.

pub mod core;

pub use crate::core::error::{ProxyError, ProxyResult};
pub use crate::core::reference::{DownloadPathReference, ReleaseSelector, UpstreamReference};
