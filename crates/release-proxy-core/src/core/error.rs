use thiserror::Error;

pub type ProxyResult<T> = Result<T, ProxyError>;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// The inbound download path does not have the
    /// `owner/repo/releases/download/tag/filename` shape.
    #[error("Invalid download path: {0}")]
    InvalidPath(String),

    /// The configured upstream URL does not name a GitHub repository.
    #[error("Invalid upstream URL: {0}")]
    InvalidUpstream(String),

    /// An upstream hop answered with a status we do not accept.
    #[error("Upstream error: HTTP {status} while {context}")]
    Upstream { status: u16, context: String },

    #[error("Redirect without Location header while {0}")]
    MissingLocation(String),

    #[error("Asset '{name}' not found in release '{tag}'")]
    AssetNotFound { tag: String, name: String },

    #[error("Manifest asset not found in release '{tag}'")]
    ManifestAssetNotFound { tag: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProxyError {
    /// True for failures caused by the shape of the inbound request rather
    /// than by GitHub.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProxyError::InvalidPath(_))
    }
}
