//! Measurement flag filter

use super::{Configurable, DataIndexFilter, Filter, Kwargs, to_kwargs};
use crate::app::models::{Data, Flag, RowIndex, StationMap};
use crate::constants::filter_names;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Arguments of [`FlagFilter`], flags given as integer codes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlagFilterArgs {
    /// Flags to keep; empty keeps all defined flags
    pub include: Vec<Flag>,

    /// Flags to drop
    pub exclude: Vec<Flag>,
}

/// Keeps rows whose flag code is among the valid flags
///
/// Rows carrying a code that no [`Flag`] names are only kept by the identity
/// filter.
#[derive(Debug, Clone, Default)]
pub struct FlagFilter {
    args: FlagFilterArgs,
    valid: HashSet<i16>,
}

impl FlagFilter {
    /// Flag codes this filter keeps
    pub fn valid_flags(&self) -> &HashSet<i16> {
        &self.valid
    }

    fn is_identity(&self) -> bool {
        self.args.include.is_empty() && self.args.exclude.is_empty()
    }
}

impl Configurable for FlagFilter {
    type Args = FlagFilterArgs;
    const NAME: &'static str = filter_names::FLAGS;

    fn from_args(args: Self::Args) -> Result<Self> {
        let included: Vec<Flag> = if args.include.is_empty() {
            Flag::ALL.to_vec()
        } else {
            args.include.clone()
        };
        let valid = included
            .into_iter()
            .filter(|flag| !args.exclude.contains(flag))
            .map(Flag::code)
            .collect();

        Ok(Self { args, valid })
    }

    fn args(&self) -> Self::Args {
        self.args.clone()
    }
}

impl DataIndexFilter for FlagFilter {
    fn filter_data_idx(
        &self,
        data: &Data,
        _stations: &StationMap,
        _variables: &[String],
    ) -> RowIndex {
        if self.is_identity() {
            return RowIndex::all(data.len());
        }
        let flags = data.flags();
        RowIndex::from_fn(data.len(), |i| self.valid.contains(&flags[i]))
    }
}

impl Filter for FlagFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init_kwargs(&self) -> Kwargs {
        to_kwargs(&self.args)
    }

    fn filter_data(&self, data: Data, stations: &StationMap, variables: &[String]) -> Result<Data> {
        self.filter_data_by_index(data, stations, variables)
    }
}
