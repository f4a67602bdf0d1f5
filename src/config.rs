//! Turns loose user settings into the values the rest of the application works with.
//! Nothing here fails: anything unrecognized quietly becomes the default.

use std::str::FromStr;

use anyhow::anyhow;

/// Window of activity that gets fetched and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Yesterday,
    #[default]
    Last7Days,
    Last30Days,
    LastYear,
}

impl TimeRange {
    /// Picks a range from an optional raw value, falling back to [TimeRange::Last7Days].
    pub fn resolve(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Identifier WakaTime uses for the range in its urls.
    pub fn slug(&self) -> &'static str {
        match self {
            TimeRange::Yesterday => "yesterday",
            TimeRange::Last7Days => "last_7_days",
            TimeRange::Last30Days => "last_30_days",
            TimeRange::LastYear => "last_year",
        }
    }

    /// Human readable name. The gist file is renamed to this when title sync is on.
    pub fn title(&self) -> &'static str {
        match self {
            TimeRange::Yesterday => "📊 Yesterday's coding activity",
            TimeRange::Last7Days => "📊 Weekly development breakdown",
            TimeRange::Last30Days => "📊 Monthly development breakdown",
            TimeRange::LastYear => "📊 Yearly development breakdown",
        }
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yesterday" => Ok(TimeRange::Yesterday),
            "last_7_days" => Ok(TimeRange::Last7Days),
            "last_30_days" => Ok(TimeRange::Last30Days),
            "last_year" => Ok(TimeRange::LastYear),
            other => Err(anyhow!("Unknown time range {other}")),
        }
    }
}

/// Glyphs and width of the proportional bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarStyle {
    #[default]
    Solid,
    Shade,
    Dots,
    Ascii,
    Compact,
}

impl BarStyle {
    pub fn resolve(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn filled(&self) -> char {
        match self {
            BarStyle::Solid => '█',
            BarStyle::Shade => '▓',
            BarStyle::Dots => '⣿',
            BarStyle::Ascii => '#',
            BarStyle::Compact => '■',
        }
    }

    pub fn empty(&self) -> char {
        match self {
            BarStyle::Solid | BarStyle::Shade => '░',
            BarStyle::Dots => '⣀',
            BarStyle::Ascii => '-',
            BarStyle::Compact => '□',
        }
    }

    /// Total amount of glyphs in a bar.
    pub fn blocks(&self) -> usize {
        match self {
            BarStyle::Compact => 10,
            _ => 20,
        }
    }
}

impl FromStr for BarStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(BarStyle::Solid),
            "shade" => Ok(BarStyle::Shade),
            "dots" => Ok(BarStyle::Dots),
            "ascii" => Ok(BarStyle::Ascii),
            "compact" => Ok(BarStyle::Compact),
            other => Err(anyhow!("Unknown bar style {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WakaTimeSettings {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct GistSettings {
    pub token: String,
    pub gist_id: String,
    pub base_url: String,
}

/// Everything a single update run needs. Built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub wakatime: WakaTimeSettings,
    pub gist: GistSettings,
    pub range: TimeRange,
    pub style: BarStyle,
    pub sync_title: bool,
    pub dry_run: bool,
}

impl Config {
    /// Title the target file should carry, if title sync is enabled.
    pub fn wanted_title(&self) -> Option<&'static str> {
        self.sync_title.then(|| self.range.title())
    }
}
