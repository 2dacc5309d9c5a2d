//! Reader applying a filter chain to a backend

use super::Reader;
use crate::app::models::{Data, StationMap};
use crate::app::services::filters::{FilterChain, FilterCollection, FilterFactory};
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Reader whose every result has passed through a [`FilterChain`]
///
/// Variables are requested by their filtered names; the chain maps them back
/// to the backend's names before fetching.
#[derive(Debug)]
pub struct FilteredReader<R: Reader> {
    reader: R,
    chain: FilterChain,
}

impl<R: Reader> FilteredReader<R> {
    pub fn new(reader: R, chain: FilterChain) -> Self {
        Self { reader, chain }
    }

    /// Resolve `filters` against `factory` and wrap `reader`
    pub fn from_collection(
        reader: R,
        filters: &FilterCollection,
        factory: &FilterFactory,
    ) -> Result<Self> {
        Ok(Self::new(reader, filters.resolve(factory)?))
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    /// The unfiltered backend
    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Reader> Reader for FilteredReader<R> {
    fn data(&self, variable: &str) -> Result<Data> {
        if !self.variables()?.iter().any(|v| v == variable) {
            return Err(Error::variable_not_found(variable));
        }

        let reader_variable = self.chain.reader_variable(variable);
        debug!("Reading '{}' as '{}'", variable, reader_variable);
        let data = self.reader.data(&reader_variable)?;
        let outcome = self
            .chain
            .run(data, self.reader.stations()?, self.reader.variables()?)?;
        Ok(outcome.data)
    }

    fn stations(&self) -> Result<StationMap> {
        Ok(self.chain.filter_stations(self.reader.stations()?))
    }

    fn variables(&self) -> Result<Vec<String>> {
        Ok(self.chain.filter_variables(self.reader.variables()?))
    }

    fn metadata(&self) -> Result<BTreeMap<String, String>> {
        self.reader.metadata()
    }

    fn close(&mut self) -> Result<()> {
        self.reader.close()
    }
}
