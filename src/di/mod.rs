//! Dependency injection infrastructure
//!
//! Request handlers reach GitHub only through the [`GitHubProvider`] trait,
//! so resolvers can be exercised against [`mocks::MockGitHubProvider`].
//!
//! # Example (Production)
//! ```no_run
//! use release_proxy::config::Config;
//! use release_proxy::di::ServiceContainer;
//!
//! # fn example() -> release_proxy::core::ProxyResult<()> {
//! let container = ServiceContainer::new(Config::load(None)?)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use release_proxy::config::Config;
//! use release_proxy::di::{mocks::MockGitHubProvider, ServiceContainer};
//! use std::sync::Arc;
//!
//! let github = Arc::new(MockGitHubProvider::new());
//! let container = ServiceContainer::with_providers(Config::default(), github);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::GitHubProvider;
