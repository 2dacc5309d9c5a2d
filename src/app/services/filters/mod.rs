//! Filter framework for timeseries readers
//!
//! Filters narrow what a reader returns: they may rename or drop variables,
//! shrink the station map, and remove rows from a [`Data`] table. Readers do
//! not re-implement filtering; they hand their raw results to a
//! [`FilterChain`] built from a declarative [`FilterCollection`].
//!
//! ## Architecture
//!
//! - [`Filter`] - the interface every filter implements
//! - [`Configurable`] - construction from keyword arguments (`Kwargs`)
//! - [`DataIndexFilter`] / [`StationReductionFilter`] - index based strategies
//! - [`builtin`] - the closed set of built-in filters
//! - [`factory`] - registry of filters by name
//! - [`collection`] - ordered, declarative filter pipelines
//!
//! ## Usage
//!
//! ```rust
//! use aero_timeseries::app::services::filters::{FilterCollection, FilterFactory};
//! use serde_json::json;
//!
//! # fn example() -> aero_timeseries::Result<()> {
//! let factory = FilterFactory::with_builtins();
//! let chain = FilterCollection::new()
//!     .with("countries", json!({"include": ["NO"]}))
//!     .with("flags", json!({"exclude": [1]}))
//!     .resolve(&factory)?;
//! assert_eq!(chain.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::app::models::{Data, RowIndex, Station, StationMap};
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

pub mod bounding_box;
pub mod builtin;
pub mod collection;
pub mod factory;
pub mod flags;
pub mod stations;
pub mod time_bounds;
pub mod time_variable_station;
pub mod variables;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use bounding_box::{BoundingBox, BoundingBoxArgs, BoundingBoxFilter};
pub use builtin::BuiltinFilter;
pub use collection::{FilterChain, FilterCollection, FilterOutcome, FilterSpec};
pub use factory::FilterFactory;
pub use flags::{FlagFilter, FlagFilterArgs};
pub use stations::{CountryFilter, IncludeExcludeArgs, StationFilter};
pub use time_bounds::{TimeBoundsArgs, TimeBoundsFilter};
pub use time_variable_station::{
    ExcludeEntry, TimeVariableStationArgs, TimeVariableStationFilter, read_exclude_file,
};
pub use variables::{VariableNameArgs, VariableNameFilter};

/// Keyword arguments of a filter, always a JSON object
pub type Kwargs = serde_json::Value;

// =============================================================================
// Filter Interface
// =============================================================================

/// Interface shared by all filters
///
/// Every operation has an identity default, so a filter only overrides the
/// aspects it actually narrows. Filters never mutate their inputs: reduced
/// tables and maps are new values.
pub trait Filter {
    /// Unique registry name
    fn name(&self) -> &'static str;

    /// Arguments that rebuild an equivalent filter
    fn init_kwargs(&self) -> Kwargs;

    /// Reduce (or rename) the variables a reader offers
    fn filter_variables(&self, variables: Vec<String>) -> Vec<String> {
        variables
    }

    /// Reduce the station map
    fn filter_stations(&self, stations: StationMap) -> StationMap {
        stations
    }

    /// Reduce the rows of one variable's table
    ///
    /// `stations` and `variables` are the context after earlier filters ran.
    fn filter_data(
        &self,
        data: Data,
        _stations: &StationMap,
        _variables: &[String],
    ) -> Result<Data> {
        Ok(data)
    }

    /// Map a variable name offered after filtering back to the reader's name
    fn reader_variable(&self, variable: &str) -> String {
        variable.to_string()
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Construction of a filter from its argument struct
///
/// The argument struct is the filter's full configuration. It deserialises
/// from keyword arguments with missing keys taking defaults and unknown keys
/// rejected, so the default arguments always build the identity filter.
pub trait Configurable: Sized {
    type Args: Serialize + DeserializeOwned + Default;

    /// Registry name of this filter
    const NAME: &'static str;

    /// Validate arguments and build the filter
    fn from_args(args: Self::Args) -> Result<Self>;

    /// Arguments this filter was built from, in normalised form
    fn args(&self) -> Self::Args;
}

/// Build a filter from keyword arguments
///
/// `null` is accepted as "no arguments"; anything else must be an object
/// whose keys match the filter's arguments.
pub fn build_from_kwargs<F: Configurable>(kwargs: &Kwargs) -> Result<F> {
    let args = match kwargs {
        Kwargs::Null => F::Args::default(),
        Kwargs::Object(_) => serde_json::from_value::<F::Args>(kwargs.clone())
            .map_err(|e| Error::invalid_filter_arguments(F::NAME, e))?,
        other => {
            return Err(Error::configuration(format!(
                "Arguments for filter '{}' must be an object, got {}",
                F::NAME,
                other
            )));
        }
    };
    F::from_args(args)
}

/// Serialise an argument struct into keyword arguments
pub fn to_kwargs<A: Serialize>(args: &A) -> Kwargs {
    // Argument structs only contain strings, numbers and string-keyed maps
    serde_json::to_value(args).unwrap_or_else(|_| Kwargs::Object(Default::default()))
}

// =============================================================================
// Index Based Strategies
// =============================================================================

/// Filter whose row reduction is computed as a [`RowIndex`]
pub trait DataIndexFilter {
    /// Rows of `data` to keep
    fn filter_data_idx(&self, data: &Data, stations: &StationMap, variables: &[String]) -> RowIndex;

    /// Apply [`filter_data_idx`](Self::filter_data_idx) through [`Data::slice`]
    fn filter_data_by_index(
        &self,
        data: Data,
        stations: &StationMap,
        variables: &[String],
    ) -> Result<Data> {
        let index = self.filter_data_idx(&data, stations, variables);
        if index.is_identity(data.len()) {
            return Ok(data);
        }
        data.slice(&index)
    }
}

/// Filter that only decides which stations to keep
///
/// Row reduction follows from the station decision: a row is kept when its
/// station is in the station context and passes [`keep_station`](Self::keep_station).
pub trait StationReductionFilter {
    fn keep_station(&self, id: &str, station: &Station) -> bool;

    fn reduce_stations(&self, stations: StationMap) -> StationMap {
        stations
            .into_iter()
            .filter(|(id, station)| self.keep_station(id, station))
            .collect()
    }
}

impl<T: StationReductionFilter + ?Sized> DataIndexFilter for T {
    fn filter_data_idx(
        &self,
        data: &Data,
        stations: &StationMap,
        _variables: &[String],
    ) -> RowIndex {
        let retained: HashSet<&str> = stations
            .iter()
            .filter(|(id, station)| self.keep_station(id, station))
            .map(|(id, _)| id.as_str())
            .collect();

        let row_stations = data.stations();
        RowIndex::from_fn(data.len(), |i| retained.contains(row_stations[i].as_str()))
    }
}

/// Include/exclude decision over a set of names
///
/// An empty include set allows every name; exclude always wins.
#[derive(Debug, Clone, Default)]
pub(crate) struct NameSelection {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl NameSelection {
    pub(crate) fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: include.iter().cloned().collect(),
            exclude: exclude.iter().cloned().collect(),
        }
    }

    pub(crate) fn allows(&self, name: &str) -> bool {
        (self.include.is_empty() || self.include.contains(name)) && !self.exclude.contains(name)
    }
}
