use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::{GistApi, RemoteFile};

/// Reads from the wrapped api but only logs what would have been written.
pub struct DryRunGist<G> {
    inner: G,
}

impl<G: GistApi> DryRunGist<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: GistApi> GistApi for DryRunGist<G> {
    async fn files(&self, gist_id: String) -> Result<Vec<RemoteFile>> {
        self.inner.files(gist_id).await
    }

    async fn rename(&self, gist_id: String, from: String, to: String) -> Result<()> {
        info!("Dry run, skipping rename of {from} to {to} in gist {gist_id}");
        Ok(())
    }

    async fn update(&self, gist_id: String, filename: String, content: String) -> Result<()> {
        info!(
            "Dry run, skipping write of {} bytes to {filename} in gist {gist_id}",
            content.len()
        );
        Ok(())
    }
}
