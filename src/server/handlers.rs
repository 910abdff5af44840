//! Route handlers

use crate::core::ProxyError;
use crate::di::ServiceContainer;
use crate::download::{resolve_asset, DEFAULT_CONTENT_TYPE};
use crate::manifest::{resolve_manifest, rewrite_manifest_urls, ReleaseManifest, DOWNLOAD_PREFIX};
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use release_proxy_core::UpstreamReference;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Failure of a proxied request
///
/// Always rendered as a bare 500. The detail goes to the log only so GitHub
/// responses and token problems are never echoed to clients.
#[derive(Debug)]
pub struct ApiError(pub ProxyError);

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            tracing::warn!(error = %self.0, "Rejected download request");
        } else {
            tracing::error!(error = %self.0, "Upstream resolution failed");
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "upstream request failed" })),
        )
            .into_response()
    }
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /latest.json`
pub async fn latest_manifest(
    State(container): State<ServiceContainer>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<ReleaseManifest>, ApiError> {
    let upstream = UpstreamReference::parse(&container.config.upstream_url)?;
    let manifest = resolve_manifest(container.github.as_ref(), &upstream).await?;

    let origin = proxy_origin(&headers, &uri);
    let manifest = rewrite_manifest_urls(manifest, &origin)?;

    tracing::info!(
        version = %manifest.version,
        platforms = manifest.platforms.len(),
        "Served manifest"
    );
    Ok(Json(manifest))
}

/// `GET /download/{owner}/{repo}/releases/download/{tag}/{filename}`
///
/// The raw request path is handed to the resolver so percent-encoding is
/// decoded exactly once.
pub async fn download_asset(
    State(container): State<ServiceContainer>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let path = uri
        .path()
        .strip_prefix(DOWNLOAD_PREFIX)
        .unwrap_or_else(|| uri.path());

    let download = resolve_asset(container.github.as_ref(), path).await?;

    let content_type = download
        .content_type
        .as_deref()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let mut response = Response::builder()
        .status(download.status)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(length) = download.content_length {
        response = response.header(header::CONTENT_LENGTH, length);
    }

    response
        .body(Body::from_stream(download.body))
        .map_err(|e| ApiError(ProxyError::Io(std::io::Error::other(e))))
}

/// Fallback for authenticated requests to unknown routes
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Scheme and host clients used to reach the proxy
///
/// Honours `X-Forwarded-Proto` and `X-Forwarded-Host` so URLs stay correct
/// behind a TLS-terminating load balancer.
pub fn proxy_origin(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = first_header_value(headers, FORWARDED_PROTO)
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    let host = first_header_value(headers, FORWARDED_HOST)
        .or_else(|| first_header_value(headers, header::HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string());

    format!("{}://{}", scheme, host)
}

fn first_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
