//! `GET /download/...`

use crate::common::*;
use axum::http::{header, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASSET_PATH: &str = "http://localhost/download/owner/repo/releases/download/v1.0.0/app.tar.gz";

async fn mount_tagged_release(github: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/releases/tags/v1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json(
            github,
            "v1.0.0",
            &[("app.tar.gz", 10), ("app.zip", 11), ("latest.json", 12)],
        )))
        .expect(1)
        .mount(github)
        .await;
}

#[tokio::test]
async fn test_binary_passthrough_via_signed_redirect() {
    let github = MockServer::start().await;
    let payload: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();

    mount_tagged_release(&github).await;
    mount_signed_asset(
        &github,
        10,
        "/cdn/app.tar.gz",
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/gzip")
            .set_body_bytes(payload.clone()),
    )
    .await;

    let response = app(&github).oneshot(authed_get(ASSET_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/gzip"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_LENGTH).unwrap(),
        payload.len().to_string().as_str()
    );

    let body = body_bytes(response).await;
    assert_eq!(body.as_ref(), payload.as_slice());

    assert_token_only_on_api(&github, "/cdn/app.tar.gz").await;
}

#[tokio::test]
async fn test_direct_asset_response_used_as_is() {
    let github = MockServer::start().await;
    let zip_magic = vec![0x50, 0x4b, 0x03, 0x04];

    mount_tagged_release(&github).await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/releases/assets/11"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(zip_magic.clone()),
        )
        .expect(1)
        .mount(&github)
        .await;

    let response = app(&github)
        .oneshot(authed_get(
            "http://localhost/download/owner/repo/releases/download/v1.0.0/app.zip",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/zip"
    );
    assert_eq!(body_bytes(response).await.as_ref(), zip_magic.as_slice());
}

#[tokio::test]
async fn test_asset_not_in_release() {
    let github = MockServer::start().await;
    mount_tagged_release(&github).await;

    let response = app(&github)
        .oneshot(authed_get(
            "http://localhost/download/owner/repo/releases/download/v1.0.0/nonexistent.tar.gz",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_download_upstream_500() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&github)
        .await;

    let response = app(&github).oneshot(authed_get(ASSET_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_signed_url_failure() {
    let github = MockServer::start().await;
    mount_tagged_release(&github).await;
    mount_signed_asset(&github, 10, "/cdn/app.tar.gz", ResponseTemplate::new(403)).await;

    let response = app(&github).oneshot(authed_get(ASSET_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_invalid_path_shape_is_500_without_upstream_calls() {
    let github = MockServer::start().await;

    for uri in [
        "http://localhost/download",
        "http://localhost/download/",
        "http://localhost/download/owner/repo",
        "http://localhost/download/owner/repo/releases/v1.0.0/app.tar.gz",
        "http://localhost/download/owner/repo/releases/download/v1.0.0/app.tar.gz/extra",
    ] {
        let response = app(&github).oneshot(authed_get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
    }

    assert!(github.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rewritten_manifest_url_round_trips() {
    let github = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json(
            &github,
            "v1.0.0",
            &[("latest.json", 12)],
        )))
        .mount(&github)
        .await;
    mount_signed_asset(
        &github,
        12,
        "/cdn/latest.json",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": "1.0.0",
            "notes": "",
            "pub_date": "2025-01-15T10:00:00.000Z",
            "platforms": {
                "linux-x86_64": {
                    "signature": "sig",
                    "url": "https://github.com/owner/repo/releases/download/v1.0.0/app.tar.gz"
                }
            }
        })),
    )
    .await;
    mount_tagged_release(&github).await;
    mount_signed_asset(
        &github,
        10,
        "/cdn/app.tar.gz",
        ResponseTemplate::new(200).set_body_bytes(b"tarball".to_vec()),
    )
    .await;

    let manifest = app(&github)
        .oneshot(authed_get("http://localhost/latest.json"))
        .await
        .unwrap();
    let manifest: serde_json::Value = serde_json::from_slice(&body_bytes(manifest).await).unwrap();
    let url = manifest["platforms"]["linux-x86_64"]["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(url, ASSET_PATH);

    let response = app(&github).oneshot(authed_get(&url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.as_ref(), b"tarball");
}
