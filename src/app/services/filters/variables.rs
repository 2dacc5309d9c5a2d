//! Variable renaming and selection

use super::{Configurable, Filter, Kwargs, NameSelection, to_kwargs};
use crate::app::models::{Data, StationMap};
use crate::constants::filter_names;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Arguments of [`VariableNameFilter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariableNameArgs {
    /// Reader variable name to the name offered after filtering
    pub reader_to_new: BTreeMap<String, String>,

    /// New names to keep; empty keeps all
    pub include: Vec<String>,

    /// New names to drop
    pub exclude: Vec<String>,
}

/// Renames reader variables and selects among the new names
///
/// Include and exclude always refer to the new names.
#[derive(Debug, Clone, Default)]
pub struct VariableNameFilter {
    args: VariableNameArgs,
    new_to_reader: HashMap<String, String>,
    selection: NameSelection,
}

impl VariableNameFilter {
    /// Name offered after filtering for a reader variable
    pub fn new_variable(&self, reader_variable: &str) -> String {
        self.args
            .reader_to_new
            .get(reader_variable)
            .cloned()
            .unwrap_or_else(|| reader_variable.to_string())
    }

    /// True if the filter keeps `variable`, given as a new name
    pub fn has_variable(&self, variable: &str) -> bool {
        self.selection.allows(variable)
    }

    /// True if the filter keeps `variable`, given as a reader name
    pub fn has_reader_variable(&self, variable: &str) -> bool {
        self.has_variable(&self.new_variable(variable))
    }
}

impl Configurable for VariableNameFilter {
    type Args = VariableNameArgs;
    const NAME: &'static str = filter_names::VARIABLES;

    fn from_args(args: Self::Args) -> Result<Self> {
        let mut new_to_reader = HashMap::with_capacity(args.reader_to_new.len());
        for (reader, new) in &args.reader_to_new {
            if let Some(previous) = new_to_reader.insert(new.clone(), reader.clone()) {
                return Err(Error::configuration(format!(
                    "Variables '{}' and '{}' are both renamed to '{}'",
                    previous, reader, new
                )));
            }
        }

        let selection = NameSelection::new(&args.include, &args.exclude);
        Ok(Self {
            args,
            new_to_reader,
            selection,
        })
    }

    fn args(&self) -> Self::Args {
        self.args.clone()
    }
}

impl Filter for VariableNameFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init_kwargs(&self) -> Kwargs {
        to_kwargs(&self.args)
    }

    fn filter_variables(&self, variables: Vec<String>) -> Vec<String> {
        variables
            .iter()
            .map(|variable| self.new_variable(variable))
            .filter(|variable| self.has_variable(variable))
            .collect()
    }

    fn filter_data(
        &self,
        mut data: Data,
        _stations: &StationMap,
        _variables: &[String],
    ) -> Result<Data> {
        let new = self.new_variable(data.variable());
        if new != data.variable() {
            data.set_variable(new);
        }
        Ok(data)
    }

    fn reader_variable(&self, variable: &str) -> String {
        self.new_to_reader
            .get(variable)
            .cloned()
            .unwrap_or_else(|| variable.to_string())
    }
}
