//! Small scheduled job that reads your coding activity from WakaTime and publishes the top
//! languages as a text bar chart into a GitHub gist. Meant to be triggered by cron or a CI
//! schedule, every run is independent.
//!

pub mod cli;
pub mod config;
pub mod gist;
pub mod pipeline;
pub mod render;
pub mod stats;
pub mod utils;
