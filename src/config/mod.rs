use crate::core::{ProxyError, ProxyResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Token sent as `Authorization: Bearer` on GitHub API requests
    pub github_token: String,

    /// Repository to serve, e.g. `https://github.com/owner/repo/releases/latest/download`
    pub upstream_url: String,

    /// Basic-auth username clients must present
    pub auth_username: String,

    /// Basic-auth password clients must present
    pub auth_password: String,

    /// GitHub REST API base URL (overridable for GitHub Enterprise and tests)
    pub github_api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            github_token: String::new(),
            upstream_url: String::new(),
            auth_username: String::new(),
            auth_password: String::new(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }
}

// Secrets never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("github_token", &redact(&self.github_token))
            .field("upstream_url", &self.upstream_url)
            .field("auth_username", &self.auth_username)
            .field("auth_password", &redact(&self.auth_password))
            .field("github_api_url", &self.github_api_url)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Config {
    /// Load config from defaults, an optional YAML file, then the environment
    ///
    /// Environment variables take precedence over the file:
    /// `HOST`, `PORT`, `GITHUB_TOKEN`, `UPSTREAM_URL`, `AUTH_USERNAME`,
    /// `AUTH_PASSWORD`, `GITHUB_API_URL`.
    ///
    /// Missing values are not an error here; they surface when the upstream
    /// call that needs them is attempted.
    pub fn load(path: Option<&Path>) -> ProxyResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a YAML config file
    pub fn from_file(path: &Path) -> ProxyResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ProxyError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Overlay values from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> ProxyResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| ProxyError::Config(format!("Invalid PORT '{}': {}", port, e)))?;
        }

        let fields: [(&str, &mut String); 6] = [
            ("HOST", &mut self.host),
            ("GITHUB_TOKEN", &mut self.github_token),
            ("UPSTREAM_URL", &mut self.upstream_url),
            ("AUTH_USERNAME", &mut self.auth_username),
            ("AUTH_PASSWORD", &mut self.auth_password),
            ("GITHUB_API_URL", &mut self.github_api_url),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }

        Ok(())
    }

    /// Address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
