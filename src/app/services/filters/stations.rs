//! Station and country filters
//!
//! Both filters reduce the station map only; rows follow through the
//! [`StationReductionFilter`] strategy.

use super::{
    Configurable, DataIndexFilter, Filter, Kwargs, NameSelection, StationReductionFilter,
    to_kwargs,
};
use crate::app::models::{Data, Station, StationMap};
use crate::constants::filter_names;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Include/exclude arguments shared by [`StationFilter`] and [`CountryFilter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncludeExcludeArgs {
    /// Names to keep; empty keeps all
    pub include: Vec<String>,

    /// Names to drop
    pub exclude: Vec<String>,
}

/// Keeps stations by identifier
#[derive(Debug, Clone, Default)]
pub struct StationFilter {
    args: IncludeExcludeArgs,
    selection: NameSelection,
}

impl StationFilter {
    pub fn has_station(&self, station: &str) -> bool {
        self.selection.allows(station)
    }
}

impl Configurable for StationFilter {
    type Args = IncludeExcludeArgs;
    const NAME: &'static str = filter_names::STATIONS;

    fn from_args(args: Self::Args) -> Result<Self> {
        let selection = NameSelection::new(&args.include, &args.exclude);
        Ok(Self { args, selection })
    }

    fn args(&self) -> Self::Args {
        self.args.clone()
    }
}

impl StationReductionFilter for StationFilter {
    fn keep_station(&self, id: &str, _station: &Station) -> bool {
        self.has_station(id)
    }
}

impl Filter for StationFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init_kwargs(&self) -> Kwargs {
        to_kwargs(&self.args)
    }

    fn filter_stations(&self, stations: StationMap) -> StationMap {
        self.reduce_stations(stations)
    }

    fn filter_data(&self, data: Data, stations: &StationMap, variables: &[String]) -> Result<Data> {
        self.filter_data_by_index(data, stations, variables)
    }
}

/// Keeps stations by ISO2 country code (capitals, compared exactly)
#[derive(Debug, Clone, Default)]
pub struct CountryFilter {
    args: IncludeExcludeArgs,
    selection: NameSelection,
}

impl CountryFilter {
    pub fn has_country(&self, country: &str) -> bool {
        self.selection.allows(country)
    }
}

impl Configurable for CountryFilter {
    type Args = IncludeExcludeArgs;
    const NAME: &'static str = filter_names::COUNTRIES;

    fn from_args(args: Self::Args) -> Result<Self> {
        let selection = NameSelection::new(&args.include, &args.exclude);
        Ok(Self { args, selection })
    }

    fn args(&self) -> Self::Args {
        self.args.clone()
    }
}

impl StationReductionFilter for CountryFilter {
    fn keep_station(&self, _id: &str, station: &Station) -> bool {
        self.has_country(station.country())
    }
}

impl Filter for CountryFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init_kwargs(&self) -> Kwargs {
        to_kwargs(&self.args)
    }

    fn filter_stations(&self, stations: StationMap) -> StationMap {
        self.reduce_stations(stations)
    }

    fn filter_data(&self, data: Data, stations: &StationMap, variables: &[String]) -> Result<Data> {
        self.filter_data_by_index(data, stations, variables)
    }
}
