use std::num::NonZeroUsize;
use std::thread::available_parallelism;

use derive_more::Display;
use foldertree::Tree;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::scenario::{Operation, Outcome, Scenario, Step};

/// Default number of worker threads when unable to determine system parallelism
const DEFAULT_WORKER_THREADS: NonZeroUsize = NonZeroUsize::MIN;

/// The outcome of one operation, in scenario order.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{operation} -> {outcome}")]
pub struct Report {
    pub operation: Operation,
    pub outcome: Outcome,
}

/// Replays scenarios against a single tree.
pub struct Executor {
    tree: Tree,
    pool: ThreadPool,
}

impl Executor {
    /// Creates an executor over an empty tree. Parallel groups are spread over
    /// `workers` threads, or over the available parallelism when unset.
    pub fn new(workers: Option<NonZeroUsize>) -> Result<Self, ExecutionError> {
        let workers = workers.unwrap_or_else(Self::determine_worker_count);
        debug!("Using {} worker threads for parallel steps", workers);

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.get())
            .thread_name(|index| format!("foldertree-worker-{index}"))
            .build()
            .context(PoolBuildSnafu)?;

        Ok(Self {
            tree: Tree::new(),
            pool,
        })
    }

    /// Determines the optimal number of worker threads for parallel steps
    fn determine_worker_count() -> NonZeroUsize {
        available_parallelism().unwrap_or(DEFAULT_WORKER_THREADS)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Runs every step in order and returns one report per operation.
    pub fn execute(&self, scenario: &Scenario) -> Vec<Report> {
        let mut reports = Vec::with_capacity(scenario.operation_count());

        for step in scenario.steps() {
            match step {
                Step::Single(operation) => reports.push(self.run(operation)),
                Step::Parallel(operations) => reports.extend(self.run_parallel(operations)),
            }
        }

        info!("Executed {} operations", reports.len());
        reports
    }

    fn run(&self, operation: &Operation) -> Report {
        let outcome = operation.apply(&self.tree);
        debug!("{} -> {}", operation, outcome);

        Report {
            operation: operation.clone(),
            outcome,
        }
    }

    /// Runs a group of operations concurrently on the worker pool. Reports
    /// come back in the order the operations were listed.
    fn run_parallel(&self, operations: &[Operation]) -> Vec<Report> {
        debug!(
            "Dispatching {} operations to {} workers",
            operations.len(),
            self.pool.current_num_threads()
        );

        self.pool.install(|| {
            operations
                .par_iter()
                .map(|operation| self.run(operation))
                .collect()
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ExecutionError {
    #[snafu(display("Failed to start the worker pool"))]
    PoolBuildError { source: rayon::ThreadPoolBuildError },
}
