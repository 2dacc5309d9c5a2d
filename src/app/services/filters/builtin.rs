//! Closed set of built-in filters
//!
//! [`BuiltinFilter`] is what the registry stores and what a resolved pipeline
//! runs. The variant of a registered prototype selects the constructor used
//! for fresh instances.

use super::{
    BoundingBoxFilter, CountryFilter, Filter, FlagFilter, Kwargs, StationFilter,
    TimeBoundsFilter, TimeVariableStationFilter, VariableNameFilter, build_from_kwargs,
};
use crate::app::models::{Data, StationMap};
use crate::Result;

/// One of the built-in filters
#[derive(Debug, Clone)]
pub enum BuiltinFilter {
    Variables(VariableNameFilter),
    Stations(StationFilter),
    Countries(CountryFilter),
    BoundingBoxes(BoundingBoxFilter),
    TimeBounds(TimeBoundsFilter),
    TimeVariableStation(TimeVariableStationFilter),
    Flags(FlagFilter),
}

macro_rules! dispatch {
    ($self:expr, $filter:ident => $body:expr) => {
        match $self {
            BuiltinFilter::Variables($filter) => $body,
            BuiltinFilter::Stations($filter) => $body,
            BuiltinFilter::Countries($filter) => $body,
            BuiltinFilter::BoundingBoxes($filter) => $body,
            BuiltinFilter::TimeBounds($filter) => $body,
            BuiltinFilter::TimeVariableStation($filter) => $body,
            BuiltinFilter::Flags($filter) => $body,
        }
    };
}

impl BuiltinFilter {
    /// Identity instances of every built-in, in registration order
    pub fn defaults() -> Vec<BuiltinFilter> {
        vec![
            BuiltinFilter::Variables(VariableNameFilter::default()),
            BuiltinFilter::Stations(StationFilter::default()),
            BuiltinFilter::Countries(CountryFilter::default()),
            BuiltinFilter::BoundingBoxes(BoundingBoxFilter::default()),
            BuiltinFilter::TimeBounds(TimeBoundsFilter::default()),
            BuiltinFilter::TimeVariableStation(TimeVariableStationFilter::default()),
            BuiltinFilter::Flags(FlagFilter::default()),
        ]
    }

    /// Build a fresh filter of the same kind from `kwargs`
    pub fn rebuild(&self, kwargs: &Kwargs) -> Result<BuiltinFilter> {
        Ok(match self {
            BuiltinFilter::Variables(_) => BuiltinFilter::Variables(build_from_kwargs(kwargs)?),
            BuiltinFilter::Stations(_) => BuiltinFilter::Stations(build_from_kwargs(kwargs)?),
            BuiltinFilter::Countries(_) => BuiltinFilter::Countries(build_from_kwargs(kwargs)?),
            BuiltinFilter::BoundingBoxes(_) => {
                BuiltinFilter::BoundingBoxes(build_from_kwargs(kwargs)?)
            }
            BuiltinFilter::TimeBounds(_) => BuiltinFilter::TimeBounds(build_from_kwargs(kwargs)?),
            BuiltinFilter::TimeVariableStation(_) => {
                BuiltinFilter::TimeVariableStation(build_from_kwargs(kwargs)?)
            }
            BuiltinFilter::Flags(_) => BuiltinFilter::Flags(build_from_kwargs(kwargs)?),
        })
    }

    /// The time bounds filter, if this is one
    pub fn as_time_bounds(&self) -> Option<&TimeBoundsFilter> {
        match self {
            BuiltinFilter::TimeBounds(filter) => Some(filter),
            _ => None,
        }
    }
}

impl Filter for BuiltinFilter {
    fn name(&self) -> &'static str {
        dispatch!(self, f => f.name())
    }

    fn init_kwargs(&self) -> Kwargs {
        dispatch!(self, f => f.init_kwargs())
    }

    fn filter_variables(&self, variables: Vec<String>) -> Vec<String> {
        dispatch!(self, f => f.filter_variables(variables))
    }

    fn filter_stations(&self, stations: StationMap) -> StationMap {
        dispatch!(self, f => f.filter_stations(stations))
    }

    fn filter_data(&self, data: Data, stations: &StationMap, variables: &[String]) -> Result<Data> {
        dispatch!(self, f => f.filter_data(data, stations, variables))
    }

    fn reader_variable(&self, variable: &str) -> String {
        dispatch!(self, f => f.reader_variable(variable))
    }
}

macro_rules! impl_from_filter {
    ($($filter:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$filter> for BuiltinFilter {
                fn from(filter: $filter) -> Self {
                    BuiltinFilter::$variant(filter)
                }
            }
        )*
    };
}

impl_from_filter! {
    VariableNameFilter => Variables,
    StationFilter => Stations,
    CountryFilter => Countries,
    BoundingBoxFilter => BoundingBoxes,
    TimeBoundsFilter => TimeBounds,
    TimeVariableStationFilter => TimeVariableStation,
    FlagFilter => Flags,
}
