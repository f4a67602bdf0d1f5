use anyhow::Result;
use tracing::{info, info_span, Instrument};

use crate::{
    config::Config,
    gist::{locate_target, write_content, GistApi},
    render::render,
    stats::{fetch_snapshot, StatsApi},
};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub filename: String,
    pub content: String,
    pub written: bool,
}

/// Runs a single update: stats and the target file are looked up at the same time, then the
/// rendered summary is written into the file.
///
/// Only a failure to find the target file is returned as an error. Missing stats produce a
/// placeholder and a failed write is reported through [UpdateOutcome::written].
pub async fn run_update(
    config: &Config,
    stats: &dyn StatsApi,
    gist: &dyn GistApi,
) -> Result<UpdateOutcome> {
    let gist_id = config.gist.gist_id.as_str();

    let (snapshot, filename) = tokio::join!(
        fetch_snapshot(stats, config.range).instrument(info_span!("Fetching stats")),
        locate_target(gist, gist_id, config.wanted_title())
            .instrument(info_span!("Locating gist file")),
    );
    let filename = filename?;

    let content = render(snapshot.as_ref(), config.style);
    info!("Writing {} lines to {filename}", content.lines().count());
    let written = write_content(gist, gist_id, &filename, &content).await;

    Ok(UpdateOutcome {
        filename,
        content,
        written,
    })
}
