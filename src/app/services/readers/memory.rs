//! In-memory reader
//!
//! Holds complete tables and stations in memory. Used to compose pipelines
//! around data produced elsewhere and as a backend in tests.

use super::Reader;
use crate::app::models::{Data, Station, StationMap};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Reader over tables and stations held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    data: BTreeMap<String, Data>,
    stations: StationMap,
    metadata: BTreeMap<String, String>,
    closed: bool,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table; rows of an already known variable are appended
    ///
    /// # Errors
    ///
    /// Returns a unit mismatch error if the variable is known with other units.
    pub fn insert_data(&mut self, data: Data) -> Result<()> {
        match self.data.entry(data.variable().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(data);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.units() != data.units() {
                    return Err(Error::unit_mismatch(
                        data.variable(),
                        existing.units(),
                        data.units(),
                    ));
                }
                existing.append_data(&data);
            }
        }
        Ok(())
    }

    /// Add or replace a station
    pub fn insert_station(&mut self, station: Station) {
        self.stations.insert(station.station().to_string(), station);
    }

    pub fn with_data(mut self, data: Data) -> Result<Self> {
        self.insert_data(data)?;
        Ok(self)
    }

    pub fn with_station(mut self, station: Station) -> Self {
        self.insert_station(station);
        self
    }

    /// Set a metadata entry, builder style
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::ReaderClosed);
        }
        Ok(())
    }
}

impl Reader for MemoryReader {
    fn data(&self, variable: &str) -> Result<Data> {
        self.ensure_open()?;
        self.data
            .get(variable)
            .cloned()
            .ok_or_else(|| Error::variable_not_found(variable))
    }

    fn stations(&self) -> Result<StationMap> {
        self.ensure_open()?;
        Ok(self.stations.clone())
    }

    fn variables(&self) -> Result<Vec<String>> {
        self.ensure_open()?;
        Ok(self.data.keys().cloned().collect())
    }

    fn metadata(&self) -> Result<BTreeMap<String, String>> {
        self.ensure_open()?;
        Ok(self.metadata.clone())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
