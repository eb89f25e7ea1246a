use std::borrow::Cow;

use derive_more::Display;
use foldertree::{Tree, TreeError};
use saphyr::{Scalar, Yaml};
use tracing::{debug, warn};

/// A single tree operation read from a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Operation {
    #[display("list {path}")]
    List { path: String },
    #[display("create {path}")]
    Create { path: String },
    #[display("remove {path}")]
    Remove { path: String },
    #[display("move {from} {to}")]
    Move { from: String, to: String },
}

/// What an operation produced when applied to a tree.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Outcome {
    #[display("ok")]
    Done,
    #[display("{_0}")]
    Listed(String),
    #[display("no such folder")]
    Unlisted,
    #[display("{_0} ({})", _0.code())]
    Failed(TreeError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_) | Outcome::Unlisted)
    }
}

impl From<Result<(), TreeError>> for Outcome {
    fn from(result: Result<(), TreeError>) -> Self {
        match result {
            Ok(()) => Outcome::Done,
            Err(error) => Outcome::Failed(error),
        }
    }
}

impl Operation {
    /// Parses one `kind: argument` pair of a scenario step.
    ///
    /// `list`, `create` and `remove` take a path; `move` takes a mapping with
    /// `from` and `to` paths. Anything else is skipped with a warning.
    pub fn from_yaml_pair(kind: &str, argument: &Yaml) -> Option<Self> {
        let operation = match kind {
            "list" => Operation::List {
                path: argument.as_str()?.to_string(),
            },
            "create" => Operation::Create {
                path: argument.as_str()?.to_string(),
            },
            "remove" => Operation::Remove {
                path: argument.as_str()?.to_string(),
            },
            "move" => {
                let endpoints = argument.as_mapping()?;
                let endpoint = |name: &'static str| {
                    endpoints
                        .get(&Yaml::Value(Scalar::String(Cow::Borrowed(name))))
                        .and_then(|value| value.as_str())
                        .map(str::to_string)
                };
                Operation::Move {
                    from: endpoint("from")?,
                    to: endpoint("to")?,
                }
            }
            _ => {
                warn!("Unknown operation '{}'. Skipping.", kind);
                return None;
            }
        };

        debug!("Parsed operation '{}'", operation);
        Some(operation)
    }

    pub fn apply(&self, tree: &Tree) -> Outcome {
        match self {
            Operation::List { path } => tree.list(path).map_or(Outcome::Unlisted, Outcome::Listed),
            Operation::Create { path } => tree.create(path).into(),
            Operation::Remove { path } => tree.remove(path).into(),
            Operation::Move { from, to } => tree.move_folder(from, to).into(),
        }
    }
}
