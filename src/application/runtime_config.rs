use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::application::data::ColorChoice;
use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scenario: PathBuf,
    pub workers: Option<NonZeroUsize>,
    pub color: ColorChoice,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            scenario: cli.scenario,
            workers: cli.workers,
            color: cli.color,
        }
    }
}
