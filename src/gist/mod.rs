//! The gist the summary is published to. The gist is expected to hold exactly one file: its
//! name acts as the title of the summary and its content gets replaced on every run.

pub mod dry_run;
pub mod github;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("gist {gist_id} has no files to update")]
    NotFound { gist_id: String },
}

/// Contract for a gist hosting service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GistApi: Send + Sync {
    /// Files of the gist, in the order the service lists them.
    async fn files(&self, gist_id: String) -> Result<Vec<RemoteFile>>;

    /// Changes the name of a file, keeping its content.
    async fn rename(&self, gist_id: String, from: String, to: String) -> Result<()>;

    /// Replaces the content of one file. Other files stay as they are.
    async fn update(&self, gist_id: String, filename: String, content: String) -> Result<()>;
}

/// Finds the file to write into. When `title` is given and differs from the current name, the
/// file is renamed first and the new name returned.
///
/// Any error here stops the run, there is nothing to write into without a filename.
pub async fn locate_target(
    api: &dyn GistApi,
    gist_id: &str,
    title: Option<&str>,
) -> Result<String> {
    let files = api.files(gist_id.to_string()).await?;
    if files.len() > 1 {
        warn!(
            "Gist {gist_id} holds {} files, only the first one is updated",
            files.len()
        );
    }
    let Some(file) = files.into_iter().next() else {
        return Err(TargetError::NotFound {
            gist_id: gist_id.to_string(),
        }
        .into());
    };

    match title {
        Some(title) if file.filename != title => {
            info!("Renaming {} to {title}", file.filename);
            api.rename(gist_id.to_string(), file.filename, title.to_string())
                .await?;
            Ok(title.to_string())
        }
        _ => Ok(file.filename),
    }
}

/// Writes `content` into `filename`. Returns whether the write went through; failures are only
/// logged.
pub async fn write_content(
    api: &dyn GistApi,
    gist_id: &str,
    filename: &str,
    content: &str,
) -> bool {
    let update = api.update(
        gist_id.to_string(),
        filename.to_string(),
        content.to_string(),
    );
    match update.await {
        Ok(_) => {
            info!("Updated {filename} in gist {gist_id}");
            true
        }
        Err(e) => {
            error!("Failed to update gist {gist_id} {e:?}");
            false
        }
    }
}
