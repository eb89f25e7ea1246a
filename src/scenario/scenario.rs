use std::{borrow::Cow, fs, path::Path};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::ext::PathDisplayExt;
use crate::scenario::Operation;

const STEPS_KEY: &str = "steps";
const PARALLEL_KEY: &str = "parallel";

/// One entry of a scenario: a single operation, or a group of operations to
/// run concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Single(Operation),
    Parallel(Vec<Operation>),
}

#[derive(Debug, Clone, Default)]
pub struct Scenario {
    steps: Vec<Step>,
}

impl Scenario {
    pub fn read(path: &Path) -> Result<Self, ScenarioError> {
        debug!("Reading scenario file: {}", path.display_best_effort());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.display_best_effort(),
        })?;
        debug!("Successfully read scenario file: {} bytes", contents.len());

        contents.as_str().try_into()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn operation_count(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Single(_) => 1,
                Step::Parallel(operations) => operations.len(),
            })
            .sum()
    }

    fn parse_steps(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Vec<Step>, ScenarioError> {
        let steps = top_level
            .get(&Yaml::Value(Scalar::String(Cow::Borrowed(STEPS_KEY))))
            .unwrap_or(&Yaml::Sequence(Vec::new()))
            .as_sequence()
            .ok_or(ScenarioError::StepsNotSequence)?
            .iter()
            .filter_map(Self::parse_step)
            .collect::<Vec<_>>();

        Ok(steps)
    }

    fn parse_step(entry: &Yaml) -> Option<Step> {
        let Some((kind, argument)) = Self::single_pair(entry) else {
            warn!("Skipping step that is not a single-key mapping: {:?}", entry);
            return None;
        };

        if kind != PARALLEL_KEY {
            return Operation::from_yaml_pair(kind, argument).map(Step::Single);
        }

        let Some(entries) = argument.as_sequence() else {
            warn!("Skipping parallel group that is not a sequence");
            return None;
        };
        let operations = entries
            .iter()
            .filter_map(|entry| match Self::single_pair(entry) {
                Some((PARALLEL_KEY, _)) => {
                    warn!("Skipping nested parallel group");
                    None
                }
                Some((kind, argument)) => Operation::from_yaml_pair(kind, argument),
                None => {
                    warn!("Skipping parallel entry that is not a single-key mapping");
                    None
                }
            })
            .collect();

        Some(Step::Parallel(operations))
    }

    /// Returns the only key and its value when `entry` is a one-entry mapping
    /// with a string key.
    fn single_pair<'y, 'a>(entry: &'y Yaml<'a>) -> Option<(&'y str, &'y Yaml<'a>)> {
        let mapping = entry.as_mapping()?;
        if mapping.len() != 1 {
            return None;
        }
        let (key, value) = mapping.iter().next()?;
        Some((key.as_str()?, value))
    }
}

impl From<Vec<Step>> for Scenario {
    fn from(steps: Vec<Step>) -> Self {
        Scenario { steps }
    }
}

impl TryFrom<&str> for Scenario {
    type Error = ScenarioError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents =
            Yaml::load_from_str(contents).map_err(|e| ScenarioError::ParseError { source: e })?;
        let document = documents.first().ok_or(ScenarioError::MalformedScenario)?;

        let top_level = document
            .as_mapping()
            .ok_or(ScenarioError::TopLevelNotMap)?;

        let steps = Self::parse_steps(top_level)?;
        debug!("Parsed {} scenario steps", steps.len());

        Ok(Scenario { steps })
    }
}

#[derive(Debug, Snafu)]
pub enum ScenarioError {
    #[snafu(display("Failed to read the scenario file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the scenario file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted scenario file"))]
    MalformedScenario,
    #[snafu(display("Top level of scenario should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Steps section should be a sequence"))]
    StepsNotSequence,
}
