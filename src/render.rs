//! Fixed width text that ends up in the gist. Each line looks like
//!
//! ```text
//! Rust        3 hrs 12 mins  ██████████░░░░░░░░░░  50.0%
//! ```

use crate::{
    config::BarStyle,
    stats::StatsSnapshot,
    utils::percentage::{seconds_percentage, Percentage},
};

/// Written instead of stats when they couldn't be fetched.
pub const PLACEHOLDER: &str = "No coding activity available right now.";
/// Written when stats were fetched but list no languages. GitHub rejects blank file content.
pub const NO_ACTIVITY: &str = "No coding activity recorded for this period.";

pub const MAX_LANGUAGES: usize = 5;
const NAME_WIDTH: usize = 11;
const DURATION_WIDTH: usize = 14;

/// Renders the top languages of `snapshot`. Percentages are taken against every language in the
/// snapshot, not only the displayed ones, so the shown rows may add up to less than 100%.
pub fn render(snapshot: Option<&StatsSnapshot>, style: BarStyle) -> String {
    let Some(snapshot) = snapshot else {
        return PLACEHOLDER.to_string();
    };
    if snapshot.languages.is_empty() {
        return NO_ACTIVITY.to_string();
    }
    let total = snapshot.total_seconds();

    snapshot
        .languages
        .iter()
        .take(MAX_LANGUAGES)
        .map(|language| {
            let percentage = seconds_percentage(language.total_seconds, total);
            format!(
                "{:<NAME_WIDTH$} {:<DURATION_WIDTH$} {} {:>6}",
                truncate(&language.name, NAME_WIDTH),
                format_duration(language.total_seconds),
                progress_bar(percentage, style),
                percentage
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole hours and minutes, seconds are dropped.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = total_seconds % 3600 / 60;
    match (hours, minutes) {
        (0, 0) => "0 mins".to_string(),
        (0, m) => format!("{m} mins"),
        (h, 0) => format!("{h} hrs"),
        (h, m) => format!("{h} hrs {m} mins"),
    }
}

pub fn progress_bar(percentage: Percentage, style: BarStyle) -> String {
    let blocks = style.blocks();
    let filled = percentage.filled_blocks(blocks);
    std::iter::repeat(style.filled())
        .take(filled)
        .chain(std::iter::repeat(style.empty()).take(blocks - filled))
        .collect()
}

fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
