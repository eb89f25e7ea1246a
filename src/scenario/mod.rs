//! Scenario files: YAML lists of folder operations to replay against a tree.

mod operation;
mod scenario;

pub use operation::{Operation, Outcome};
pub use scenario::{Scenario, ScenarioError, Step};
