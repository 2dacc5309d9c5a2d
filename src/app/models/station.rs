//! Station metadata
//!
//! A [`Station`] describes one observation site. Readers expose their stations
//! as a [`StationMap`] keyed by station identifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stations keyed by station identifier
pub type StationMap = BTreeMap<String, Station>;

/// Metadata for one observation site
///
/// Stations are immutable once built: fields are only readable through
/// accessors, and the `with_*` builders consume the value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Station {
    /// Station identifier, the key used in [`StationMap`] and in data rows
    station: String,

    /// Descriptive station name
    long_name: String,

    /// Latitude in decimal degrees
    latitude: f64,

    /// Longitude in decimal degrees
    longitude: f64,

    /// Altitude above sea level in metres
    altitude: f64,

    /// ISO 3166-1 alpha-2 country code (capitals)
    country: String,

    /// Link to further information about the station
    url: String,
}

impl Station {
    /// Create a station with position; names, country and url start empty
    pub fn new(station: impl Into<String>, latitude: f64, longitude: f64, altitude: f64) -> Self {
        let station = station.into();
        Self {
            long_name: station.clone(),
            station,
            latitude,
            longitude,
            altitude,
            country: String::new(),
            url: String::new(),
        }
    }

    /// Set the descriptive name
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = long_name.into();
        self
    }

    /// Set the ISO2 country code
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Set the information url
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Station location as (latitude, longitude)
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Build a [`StationMap`] from stations, keyed by their identifiers
///
/// Later stations replace earlier ones with the same identifier.
pub fn station_map(stations: impl IntoIterator<Item = Station>) -> StationMap {
    stations
        .into_iter()
        .map(|station| (station.station.clone(), station))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_builders() {
        let station = Station::new("NO0042", 78.9, 11.9, 474.0)
            .with_long_name("Zeppelin mountain")
            .with_country("NO")
            .with_url("https://ebas.nilu.no");

        assert_eq!(station.station(), "NO0042");
        assert_eq!(station.long_name(), "Zeppelin mountain");
        assert_eq!(station.country(), "NO");
        assert_eq!(station.location(), (78.9, 11.9));
        assert_eq!(station.altitude(), 474.0);
        assert_eq!(station.url(), "https://ebas.nilu.no");
    }

    #[test]
    fn test_station_long_name_defaults_to_id() {
        let station = Station::new("station1", 0.0, 0.0, 0.0);
        assert_eq!(station.long_name(), "station1");
        assert!(station.country().is_empty());
    }

    #[test]
    fn test_station_map_keys_unique() {
        let map = station_map([
            Station::new("a", 1.0, 1.0, 0.0),
            Station::new("b", 2.0, 2.0, 0.0),
            Station::new("a", 3.0, 3.0, 0.0),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"].latitude(), 3.0);
    }
}
