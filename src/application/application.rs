use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::executor::{ExecutionError, Executor, Report};
use crate::scenario::{Scenario, ScenarioError};

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<Vec<Report>, ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);
        app_config.color.apply();

        let scenario = Scenario::read(&app_config.scenario).context(ScenarioSnafu)?;
        debug!(
            "Loaded scenario with {} operations",
            scenario.operation_count()
        );

        let executor = Executor::new(app_config.workers).context(ExecutionSnafu)?;
        let reports = executor.execute(&scenario);

        for report in &reports {
            Self::print_report(report);
        }

        let failures = reports
            .iter()
            .filter(|report| report.outcome.is_failure())
            .count();
        if failures > 0 {
            warn!("{} of {} operations failed", failures, reports.len());
        }
        info!("Final root listing: {:?}", executor.tree().list("/"));

        Ok(reports)
    }

    fn print_report(report: &Report) {
        let outcome = report.outcome.to_string();
        let outcome = if report.outcome.is_failure() {
            outcome.red()
        } else {
            outcome.green()
        };
        println!("{} -> {}", report.operation, outcome);
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the scenario"))]
    ScenarioError { source: ScenarioError },
    #[snafu(display("Critical failure encountered while preparing scenario execution"))]
    ExecutionError { source: ExecutionError },
}
