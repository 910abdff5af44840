//! Common utilities for integration tests

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use base64::Engine;
use bytes::Bytes;
use release_proxy::config::Config;
use release_proxy::di::ServiceContainer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GITHUB_TOKEN: &str = "test-github-token";
pub const UPSTREAM_URL: &str = "https://github.com/owner/repo/releases/latest/download";
pub const AUTH_USERNAME: &str = "testuser";
pub const AUTH_PASSWORD: &str = "testpass";

pub fn config_for(github: &MockServer) -> Config {
    Config {
        github_token: GITHUB_TOKEN.to_string(),
        upstream_url: UPSTREAM_URL.to_string(),
        auth_username: AUTH_USERNAME.to_string(),
        auth_password: AUTH_PASSWORD.to_string(),
        github_api_url: github.uri(),
        ..Config::default()
    }
}

/// Router wired to a mock GitHub
pub fn app(github: &MockServer) -> Router {
    let container = ServiceContainer::new(config_for(github)).unwrap();
    release_proxy::server::router(container)
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", username, password))
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(AUTH_USERNAME, AUTH_PASSWORD))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

/// API URL GitHub reports for an asset id on the mock server
pub fn asset_api_url(github: &MockServer, id: u64) -> String {
    format!("{}/repos/owner/repo/releases/assets/{}", github.uri(), id)
}

pub fn release_json(github: &MockServer, tag: &str, assets: &[(&str, u64)]) -> serde_json::Value {
    serde_json::json!({
        "tag_name": tag,
        "name": tag,
        "draft": false,
        "prerelease": false,
        "published_at": "2025-01-15T10:00:00Z",
        "assets": assets.iter().map(|(name, id)| serde_json::json!({
            "id": id,
            "name": name,
            "url": asset_api_url(github, *id),
            "browser_download_url": format!("https://github.com/owner/repo/releases/download/{}/{}", tag, name),
            "size": 0,
            "content_type": "application/octet-stream"
        })).collect::<Vec<_>>()
    })
}

/// Serve an asset the way GitHub does: a 302 from the API to a signed URL
pub async fn mount_signed_asset(
    github: &MockServer,
    id: u64,
    signed_path: &str,
    body: ResponseTemplate,
) {
    let signed_url = format!("{}{}?X-Amz-Signature=abc123", github.uri(), signed_path);

    Mock::given(method("GET"))
        .and(path(format!("/repos/owner/repo/releases/assets/{}", id)))
        .respond_with(ResponseTemplate::new(302).insert_header("location", signed_url.as_str()))
        .mount(github)
        .await;

    Mock::given(method("GET"))
        .and(path(signed_path))
        .respond_with(body)
        .mount(github)
        .await;
}

/// Assert GitHub saw the token on the API leg and never on the signed leg
pub async fn assert_token_only_on_api(github: &MockServer, signed_path: &str) {
    let requests = github.received_requests().await.unwrap();
    let mut saw_signed = false;
    for request in &requests {
        let auth = request.headers.get("authorization");
        if request.url.path() == signed_path {
            saw_signed = true;
            assert!(auth.is_none(), "signed URL received credentials");
        } else {
            let expected = format!("Bearer {}", GITHUB_TOKEN);
            assert_eq!(
                auth.and_then(|v| v.to_str().ok()),
                Some(expected.as_str()),
                "API request {} missing token",
                request.url
            );
        }
    }
    assert!(saw_signed, "signed URL was never requested");
}
