//! Geographic bounding box filter

use super::{Configurable, DataIndexFilter, Filter, Kwargs, StationReductionFilter, to_kwargs};
use crate::app::models::{Data, Station, StationMap};
use crate::constants::{LATITUDE_RANGE, LONGITUDE_RANGE, filter_names};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Box as `(north, east, south, west)` in decimal degrees
pub type BoundingBox = (f64, f64, f64, f64);

/// Arguments of [`BoundingBoxFilter`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundingBoxArgs {
    /// Keep stations inside any of these boxes; empty keeps all
    pub include: Vec<BoundingBox>,

    /// Drop stations inside any of these boxes
    pub exclude: Vec<BoundingBox>,
}

/// Keeps stations by location
///
/// Box edges are inclusive. Boxes crossing the date line must be split in two.
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxFilter {
    args: BoundingBoxArgs,
}

fn validate_box(&(north, east, south, west): &BoundingBox) -> Result<()> {
    let (lat_min, lat_max) = LATITUDE_RANGE;
    let (lon_min, lon_max) = LONGITUDE_RANGE;

    for (label, value) in [("north", north), ("south", south)] {
        if !(lat_min..=lat_max).contains(&value) {
            return Err(Error::bounding_box(format!(
                "{} latitude {} outside [{}, {}]",
                label, value, lat_min, lat_max
            )));
        }
    }
    for (label, value) in [("east", east), ("west", west)] {
        if !(lon_min..=lon_max).contains(&value) {
            return Err(Error::bounding_box(format!(
                "{} longitude {} outside [{}, {}]",
                label, value, lon_min, lon_max
            )));
        }
    }
    if south >= north {
        return Err(Error::bounding_box(format!(
            "south {} must be smaller than north {}",
            south, north
        )));
    }
    if west >= east {
        return Err(Error::bounding_box(format!(
            "west {} must be smaller than east {}",
            west, east
        )));
    }
    Ok(())
}

fn inside(&(north, east, south, west): &BoundingBox, latitude: f64, longitude: f64) -> bool {
    south <= latitude && latitude <= north && west <= longitude && longitude <= east
}

impl BoundingBoxFilter {
    /// True if a location passes the include and exclude boxes
    pub fn has_location(&self, latitude: f64, longitude: f64) -> bool {
        let included = self.args.include.is_empty()
            || self
                .args
                .include
                .iter()
                .any(|b| inside(b, latitude, longitude));

        included
            && !self
                .args
                .exclude
                .iter()
                .any(|b| inside(b, latitude, longitude))
    }
}

impl Configurable for BoundingBoxFilter {
    type Args = BoundingBoxArgs;
    const NAME: &'static str = filter_names::BOUNDING_BOXES;

    fn from_args(args: Self::Args) -> Result<Self> {
        for bounding_box in args.include.iter().chain(args.exclude.iter()) {
            validate_box(bounding_box)?;
        }
        Ok(Self { args })
    }

    fn args(&self) -> Self::Args {
        self.args.clone()
    }
}

impl StationReductionFilter for BoundingBoxFilter {
    fn keep_station(&self, _id: &str, station: &Station) -> bool {
        self.has_location(station.latitude(), station.longitude())
    }
}

impl Filter for BoundingBoxFilter {
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
