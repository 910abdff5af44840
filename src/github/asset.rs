//! Streamed asset bodies

use crate::core::ProxyResult;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::{header, StatusCode};
use std::fmt;

pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// The final upstream response for an asset, body not yet read
pub struct AssetDownload {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: ByteStream,
}

impl AssetDownload {
    /// Wrap a response without buffering its body
    pub fn from_response(response: reqwest::Response) -> Self {
        let headers = response.headers();
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        Self {
            status: response.status(),
            content_type,
            content_length,
            body: response
                .bytes_stream()
                .map_err(std::io::Error::other)
                .boxed(),
        }
    }

    /// Build a download from an in-memory body
    pub fn from_bytes(status: StatusCode, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self {
            status,
            content_type: content_type.map(str::to_string),
            content_length: Some(body.len() as u64),
            body: stream::once(async move { Ok(body) }).boxed(),
        }
    }

    /// Read the whole body
    pub async fn into_bytes(self) -> ProxyResult<Bytes> {
        let buf = self
            .body
            .try_fold(BytesMut::new(), |mut acc, chunk| async move {
                acc.extend_from_slice(&chunk);
                Ok(acc)
            })
            .await?;
        Ok(buf.freeze())
    }
}

impl fmt::Debug for AssetDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetDownload")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
