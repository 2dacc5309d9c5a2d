//! Engines open readers from source identifiers
//!
//! An [`Engine`] stands for one kind of backend. Engines are registered by
//! name in an [`EngineRegistry`], which opens scoped, filtered readers.

use super::{FilteredReader, MemoryReader, Reader, ScopedReader};
use crate::app::services::filters::{FilterChain, FilterCollection, FilterFactory};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Factory for readers of one backend kind
pub trait Engine {
    /// Open `source` with `filters` applied to every result
    fn open(&self, source: &str, filters: FilterChain) -> Result<Box<dyn Reader>>;

    /// Names of the parameters [`open`](Self::open) takes
    fn args(&self) -> &'static [&'static str] {
        &["source", "filters"]
    }

    /// Short description of the backend
    fn description(&self) -> &str;

    /// Where to find documentation of the backend
    fn url(&self) -> &str;
}

/// Engine serving named in-memory sources
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    sources: BTreeMap<String, MemoryReader>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named source
    pub fn insert_source(&mut self, name: impl Into<String>, reader: MemoryReader) {
        self.sources.insert(name.into(), reader);
    }

    pub fn with_source(mut self, name: impl Into<String>, reader: MemoryReader) -> Self {
        self.insert_source(name, reader);
        self
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

impl Engine for MemoryEngine {
    fn open(&self, source: &str, filters: FilterChain) -> Result<Box<dyn Reader>> {
        let reader = self
            .sources
            .get(source)
            .cloned()
            .ok_or_else(|| Error::unknown_source("memory", source))?;
        debug!("Opening memory source '{}' with {} filters", source, filters.len());
        Ok(Box::new(FilteredReader::new(reader, filters)))
    }

    fn description(&self) -> &str {
        "Timeseries held in memory"
    }

    fn url(&self) -> &str {
        env!("CARGO_PKG_REPOSITORY")
    }
}

/// Registry of engines by name
#[derive(Default)]
pub struct EngineRegistry {
    engines: BTreeMap<String, Box<dyn Engine>>,
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.engines.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `engine` under `name`
    ///
    /// # Errors
    /// Returns a duplicate engine error if the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        engine: impl Engine + 'static,
    ) -> Result<()> {
        let name = name.into();
        if self.engines.contains_key(&name) {
            return Err(Error::duplicate_engine(name));
        }
        info!("Registered engine '{}': {}", name, engine.description());
        self.engines.insert(name, Box::new(engine));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&dyn Engine> {
        self.engines
            .get(name)
            .map(|engine| engine.as_ref())
            .ok_or_else(|| Error::unknown_engine(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.engines.keys().map(String::as_str).collect()
    }

    /// Open `source` with engine `name`, filtered by `filters`
    ///
    /// The returned reader closes itself when dropped.
    pub fn open(
        &self,
        name: &str,
        source: &str,
        filters: &FilterCollection,
        factory: &FilterFactory,
    ) -> Result<ScopedReader<Box<dyn Reader>>> {
        let engine = self.get(name)?;
        let chain = filters.resolve(factory)?;
        Ok(ScopedReader::new(engine.open(source, chain)?))
    }
}
