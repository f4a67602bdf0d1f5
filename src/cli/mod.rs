use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{builder::FalseyValueParser, ArgAction, Parser};
use reqwest::Client;
use tracing::{error, info, level_filters::LevelFilter};

use crate::{
    config::{BarStyle, Config, GistSettings, TimeRange, WakaTimeSettings},
    gist::{dry_run::DryRunGist, github::GitHubGistClient, github::DEFAULT_GITHUB_URL, GistApi},
    pipeline::run_update,
    stats::wakatime::{WakaTimeClient, DEFAULT_WAKATIME_URL},
    utils::logging::enable_logging,
};

#[derive(Parser, Debug)]
#[command(name = "wakagist", version, long_about = None)]
#[command(about = "Publishes your WakaTime language breakdown into a GitHub gist")]
struct Args {
    #[arg(long, env = "WAKATIME_API_KEY", hide_env_values = true)]
    wakatime_api_key: String,
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    gh_token: String,
    #[arg(long, env = "GIST_ID", help = "Gist holding the single file to update")]
    gist_id: String,
    #[arg(
        long,
        env = "TIME_RANGE",
        help = "One of yesterday, last_7_days, last_30_days, last_year. Anything else means last_7_days"
    )]
    time_range: Option<String>,
    #[arg(
        long,
        env = "BAR_STYLE",
        help = "One of solid, shade, dots, ascii, compact. Anything else means solid"
    )]
    bar_style: Option<String>,
    #[arg(long, env = "WAKATIME_BASE_URL", default_value = DEFAULT_WAKATIME_URL)]
    wakatime_url: String,
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_URL)]
    github_url: String,
    #[arg(
        long = "no-title-sync",
        env = "NO_TITLE_SYNC",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Keep the current file name instead of renaming it after the time range"
    )]
    no_title_sync: bool,
    #[arg(long, help = "Print the summary instead of writing it to the gist")]
    dry_run: bool,
    #[arg(long = "log-filter")]
    log: Option<LevelFilter>,
    #[arg(long = "log-dir", env = "WAKAGIST_LOG_DIR", help = "Also write rotated logs here")]
    log_dir: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            wakatime: WakaTimeSettings {
                api_key: args.wakatime_api_key,
                base_url: args.wakatime_url,
            },
            gist: GistSettings {
                token: args.gh_token,
                gist_id: args.gist_id,
                base_url: args.github_url,
            },
            range: TimeRange::resolve(args.time_range.as_deref()),
            style: BarStyle::resolve(args.bar_style.as_deref()),
            sync_title: !args.no_title_sync,
            dry_run: args.dry_run,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();
    enable_logging(args.log_dir.as_deref(), args.log)?;

    let config = Config::from(args);
    info!(
        "Updating gist {} with {} stats",
        config.gist.gist_id,
        config.range.slug()
    );

    // Failures are only logged, the next scheduled run starts from scratch anyway.
    if let Err(e) = update(&config).await {
        error!("Update failed {e:?}");
    }
    Ok(())
}

async fn update(config: &Config) -> Result<()> {
    let client = Client::builder()
        .build()
        .context("Failed to create http client")?;
    let stats = WakaTimeClient::new(client.clone(), &config.wakatime);
    let github = GitHubGistClient::new(client, &config.gist);

    let gist: Box<dyn GistApi> = if config.dry_run {
        Box::new(DryRunGist::new(github))
    } else {
        Box::new(github)
    };

    let outcome = run_update(config, &stats, gist.as_ref()).await?;
    if config.dry_run {
        println!("{}\n{}", outcome.filename, outcome.content);
    }
    Ok(())
}
