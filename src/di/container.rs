//! Service container for dependency injection

use super::traits::GitHubProvider;
use crate::config::Config;
use crate::core::ProxyResult;
use crate::github::GitHubClient;
use std::sync::Arc;

/// Service container shared by every request handler
///
/// Cloning is cheap; both services sit behind `Arc`. Nothing in here is
/// mutable, so requests never share state beyond the HTTP client's own
/// connection pool.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<Config>,
    pub github: Arc<dyn GitHubProvider>,
}

impl ServiceContainer {
    /// Create a container backed by the real GitHub client
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value or
    /// the HTTP client cannot be built.
    pub fn new(config: Config) -> ProxyResult<Self> {
        let github = GitHubClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            github: Arc::new(github),
        })
    }

    /// Create a container with custom providers (for testing)
    pub fn with_providers(config: Config, github: Arc<dyn GitHubProvider>) -> Self {
        Self {
            config: Arc::new(config),
            github,
        }
    }
}
