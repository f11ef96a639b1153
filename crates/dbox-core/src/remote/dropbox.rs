//! Dropbox HTTP API client using `reqwest`.
//!
//! Implements [`RemoteStore`] on top of the v2 `files/list_folder`,
//! `files/list_folder/continue` and `files/download` endpoints.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::entry::RemoteEntry;
use super::RemoteStore;
use crate::error::{CoreError, CoreResult};

pub const DEFAULT_API_URL: &str = "https://api.dropboxapi.com";
pub const DEFAULT_CONTENT_URL: &str = "https://content.dropboxapi.com";

/// Configuration for a Dropbox connection.
#[derive(Clone)]
pub struct DropboxConfig {
    pub token: String,
    pub api_url: String,
    pub content_url: String,
    pub timeout: Duration,
}

impl DropboxConfig {
    /// Configuration against the public Dropbox endpoints.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            content_url: DEFAULT_CONTENT_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for DropboxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropboxConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("content_url", &self.content_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Errors that can occur while talking to Dropbox.
#[derive(Debug, thiserror::Error)]
pub enum DropboxError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("API error ({status}): {summary}")]
    Api { status: u16, summary: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<DropboxError> for CoreError {
    fn from(err: DropboxError) -> Self {
        CoreError::Remote(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ListFolderResult {
    entries: Vec<Metadata>,
    cursor: String,
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(rename = ".tag")]
    tag: String,
    name: String,
    path_lower: Option<String>,
    path_display: Option<String>,
    #[serde(default)]
    size: u64,
    server_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_summary: String,
}

/// An authenticated Dropbox client.
pub struct DropboxClient {
    config: DropboxConfig,
    http: reqwest::Client,
}

impl DropboxClient {
    /// Builds a client. No request is made until the first call.
    pub fn new(config: DropboxConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Remote(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &DropboxConfig {
        &self.config
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<T, DropboxError> {
        let url = format!("{}/2/{endpoint}", self.config.api_url.trim_end_matches('/'));
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DropboxError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(DropboxError::Api {
                status: status.as_u16(),
                summary: error_summary(&text),
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| DropboxError::Decode(e.to_string()))
    }

    async fn list_all(&self, path: &str) -> Result<Vec<RemoteEntry>, DropboxError> {
        let mut page: ListFolderResult = self
            .rpc("files/list_folder", json!({ "path": path }))
            .await?;
        let mut entries = entries_from(path, page.entries);

        while page.has_more {
            page = self
                .rpc("files/list_folder/continue", json!({ "cursor": page.cursor }))
                .await?;
            entries.extend(entries_from(path, page.entries));
        }
        Ok(entries)
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, DropboxError> {
        let url = format!(
            "{}/2/files/download",
            self.config.content_url.trim_end_matches('/')
        );
        let arg = escape_non_ascii(&json!({ "path": path }).to_string());
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.config.token)
            .header("Dropbox-API-Arg", arg)
            .send()
            .await
            .map_err(|e| DropboxError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(DropboxError::Api {
                status: status.as_u16(),
                summary: error_summary(&text),
            });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DropboxError::Http(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl RemoteStore for DropboxClient {
    async fn list(&self, path: &str) -> CoreResult<Vec<RemoteEntry>> {
        tracing::debug!(path, "list_folder");
        Ok(self.list_all(path).await?)
    }

    async fn download(&self, path: &str) -> CoreResult<Vec<u8>> {
        tracing::debug!(path, "download");
        Ok(self.fetch(path).await?)
    }
}

/// Converts one page of metadata into entries, dropping deleted markers.
fn entries_from(parent: &str, metadata: Vec<Metadata>) -> Vec<RemoteEntry> {
    metadata
        .into_iter()
        .filter_map(|m| {
            let is_folder = match m.tag.as_str() {
                "file" => false,
                "folder" => true,
                _ => return None,
            };
            let path = m
                .path_lower
                .or(m.path_display)
                .unwrap_or_else(|| format!("{}/{}", parent.trim_end_matches('/'), m.name));
            let modified = m.server_modified.map(SystemTime::from);
            Some(RemoteEntry::new(&m.name, &path, is_folder, m.size, modified))
        })
        .collect()
}

/// Extracts `error_summary` from a Dropbox error body, falling back to the raw text.
fn error_summary(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error_summary,
        Err(_) => body.trim().to_string(),
    }
}

/// HTTP header values must be ASCII; Dropbox expects the JSON argument
/// with every non-ASCII character written as a `\uXXXX` escape.
fn escape_non_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
