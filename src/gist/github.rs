use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::config::GistSettings;

use super::{GistApi, RemoteFile};

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct GistResponse {
    /// Kept as a json map so the order of files matches the response.
    #[serde(default)]
    files: Map<String, Value>,
}

impl GistResponse {
    /// Only the name is needed to locate the target, so a file with missing or null fields
    /// never makes the whole gist unreadable.
    fn into_files(self) -> Vec<RemoteFile> {
        self.files
            .into_iter()
            .map(|(key, value)| RemoteFile {
                filename: value
                    .get("filename")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(key),
                content: value
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect()
    }
}

/// Client for the GitHub gists api.
pub struct GitHubGistClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubGistClient {
    pub fn new(client: Client, settings: &GistSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        }
    }

    fn gist_url(&self, gist_id: &str) -> String {
        format!("{}/gists/{gist_id}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(
                header::USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
    }

    async fn patch(&self, gist_id: &str, body: Value) -> Result<()> {
        let url = self.gist_url(gist_id);
        debug!("Patching {url}");
        self.authorize(self.client.patch(&url))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?
            .error_for_status()
            .context("Gist api rejected the update")?;
        Ok(())
    }
}

#[async_trait]
impl GistApi for GitHubGistClient {
    #[instrument(skip(self))]
    async fn files(&self, gist_id: String) -> Result<Vec<RemoteFile>> {
        let url = self.gist_url(&gist_id);
        debug!("Requesting {url}");
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?
            .error_for_status()
            .context("Gist api rejected the request")?
            .json::<GistResponse>()
            .await
            .context("Unexpected gist response body")?;
        Ok(response.into_files())
    }

    #[instrument(skip(self))]
    async fn rename(&self, gist_id: String, from: String, to: String) -> Result<()> {
        self.patch(&gist_id, rename_body(&from, &to)).await
    }

    #[instrument(skip(self, content))]
    async fn update(&self, gist_id: String, filename: String, content: String) -> Result<()> {
        self.patch(&gist_id, update_body(&filename, &content)).await
    }
}

fn rename_body(from: &str, to: &str) -> Value {
    json!({ "files": { from: { "filename": to } } })
}

fn update_body(filename: &str, content: &str) -> Value {
    json!({ "files": { filename: { "content": content } } })
}
