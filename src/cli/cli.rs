use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorChoice, LogLevel};

/// Replays a scenario of folder operations against a fresh in-memory tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// YAML scenario file to replay
    pub scenario: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Worker threads for parallel steps [default: available parallelism]
    #[clap(long, short)]
    pub workers: Option<NonZeroUsize>,

    /// When to color the report
    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorChoice,
}
