//! Test utilities for filter testing
//!
//! The shared fixture has two stations and two variables with 52 daily rows
//! per station and variable, 208 rows in total.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::app::models::{Data, DataRow, Station, StationMap, station_map};
use crate::app::services::filters::{BuiltinFilter, FilterChain};
use crate::app::services::readers::{FilteredReader, MemoryReader, Reader};

mod flags_tests;
mod variables_tests;

/// Days of data per station and variable
pub const DAYS: i64 = 52;

/// Midnight `offset` days after 1997-01-01
pub fn day(offset: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1997, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(offset)
}

/// Parse a timestamp in filter argument format
pub fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn create_test_stations() -> StationMap {
    station_map([
        Station::new("station1", 60.0, 10.7, 100.0)
            .with_long_name("Station One")
            .with_country("NO"),
        Station::new("station2", 51.5, -0.1, 20.0)
            .with_long_name("Station Two")
            .with_country("GB"),
    ])
}

/// Daily rows for both stations, each row lasting one day
pub fn create_test_data(variable: &str, units: &str) -> Data {
    let stations = create_test_stations();
    let mut data = Data::with_capacity(variable, units, 2 * DAYS as usize);
    for station in stations.values() {
        for offset in 0..DAYS {
            data.append(DataRow::new(
                offset as f64,
                station.station(),
                station.latitude(),
                station.longitude(),
                station.altitude(),
                day(offset),
                day(offset + 1),
            ))
            .unwrap();
        }
    }
    data
}

pub fn create_test_reader() -> MemoryReader {
    let mut reader = MemoryReader::new();
    for station in create_test_stations().into_values() {
        reader.insert_station(station);
    }
    reader.insert_data(create_test_data("SOx", "Gg")).unwrap();
    reader.insert_data(create_test_data("NOx", "Mg")).unwrap();
    reader
}

/// Rows summed over all variables of a reader
pub fn count_rows(reader: &dyn Reader) -> usize {
    reader
        .variables()
        .unwrap()
        .iter()
        .map(|variable| reader.data(variable).unwrap().len())
        .sum()
}

/// Open the fixture through `filters`; returns (rows, stations)
pub fn apply_filters(filters: Vec<BuiltinFilter>) -> (usize, usize) {
    let reader = FilteredReader::new(create_test_reader(), FilterChain::new(filters));
    (count_rows(&reader), reader.stations().unwrap().len())
}
