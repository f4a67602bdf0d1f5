//! Retrieval of per-language coding time. [fetch_snapshot] is the entry point used by the
//! update pipeline, [StatsApi] abstracts the remote service so it can be replaced in tests.

pub mod wakatime;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::{debug, error, info};

use crate::config::TimeRange;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    /// WakaTime reports fractional seconds. Anything below a whole second is dropped.
    #[serde(deserialize_with = "whole_seconds")]
    pub total_seconds: u64,
}

impl LanguageStat {
    pub fn new(name: impl Into<String>, total_seconds: u64) -> Self {
        Self {
            name: name.into(),
            total_seconds,
        }
    }
}

fn whole_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(if value.is_finite() && value > 0. {
        value.trunc() as u64
    } else {
        0
    })
}

/// Languages in the order the service ranked them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub languages: Vec<LanguageStat>,
}

impl StatsSnapshot {
    pub fn total_seconds(&self) -> u64 {
        self.languages.iter().map(|v| v.total_seconds).sum()
    }
}

/// Body of `/users/current/stats/{range}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateResponse {
    pub data: AggregateData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregateData {
    #[serde(default)]
    pub languages: Vec<LanguageStat>,
}

/// Body of `/users/current/summaries`. One entry per day.
#[derive(Debug, Clone, Deserialize)]
pub struct SummariesResponse {
    #[serde(default)]
    pub data: Vec<DailySummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySummary {
    #[serde(default)]
    pub languages: Vec<LanguageStat>,
}

/// The endpoint that was queried decides the variant, the body is never sniffed.
#[derive(Debug, Clone)]
pub enum StatsResponse {
    Aggregate(AggregateResponse),
    Summaries(SummariesResponse),
}

impl From<StatsResponse> for StatsSnapshot {
    fn from(value: StatsResponse) -> Self {
        let languages = match value {
            StatsResponse::Aggregate(response) => response.data.languages,
            StatsResponse::Summaries(response) => response
                .data
                .into_iter()
                .next()
                .map(|day| day.languages)
                .unwrap_or_default(),
        };
        StatsSnapshot { languages }
    }
}

/// Which of the two endpoints serves a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsEndpoint {
    Summaries,
    Aggregate,
}

impl From<TimeRange> for StatsEndpoint {
    fn from(value: TimeRange) -> Self {
        match value {
            TimeRange::Yesterday => StatsEndpoint::Summaries,
            TimeRange::Last7Days | TimeRange::LastYear | TimeRange::Last30Days => {
                StatsEndpoint::Aggregate
            }
        }
    }
}

/// Contract for a service reporting coding time. Implementations issue exactly one request per
/// call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn fetch(&self, range: TimeRange) -> Result<StatsResponse>;
}

/// Fetches stats for `range`. Failures are logged and turned into [None] so the gist still gets
/// updated with a placeholder.
pub async fn fetch_snapshot(api: &dyn StatsApi, range: TimeRange) -> Option<StatsSnapshot> {
    debug!("Fetching stats for {}", range.slug());
    match api.fetch(range).await {
        Ok(response) => {
            let snapshot = StatsSnapshot::from(response);
            info!(
                "Fetched {} languages for {}",
                snapshot.languages.len(),
                range.slug()
            );
            Some(snapshot)
        }
        Err(e) => {
            error!("Failed to fetch stats {e:?}");
            None
        }
    }
}
