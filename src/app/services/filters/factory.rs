//! Registry of filters by name
//!
//! The factory is an ordinary value: build it once, then pass it by
//! reference to everything that resolves filter pipelines.

use super::{BuiltinFilter, Filter, Kwargs};
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Registry mapping filter names to prototype filters
#[derive(Debug, Clone)]
pub struct FilterFactory {
    filters: BTreeMap<String, BuiltinFilter>,
    /// Names in registration order
    order: Vec<String>,
}

impl Default for FilterFactory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FilterFactory {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            filters: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry holding every built-in filter
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        for filter in BuiltinFilter::defaults() {
            // Built-in names are distinct constants
            factory.insert(filter);
        }
        info!(
            "Filter registry initialised with {} filters",
            factory.filters.len()
        );
        factory
    }

    fn insert(&mut self, filter: BuiltinFilter) {
        let name = filter.name().to_string();
        self.order.push(name.clone());
        self.filters.insert(name, filter);
    }

    /// Register a prototype under its name
    ///
    /// # Errors
    /// Returns a duplicate filter error if the name is already registered.
    pub fn register(&mut self, filter: BuiltinFilter) -> Result<()> {
        let name = filter.name();
        if self.filters.contains_key(name) {
            return Err(Error::duplicate_filter(name));
        }
        debug!("Registering filter '{}'", name);
        self.insert(filter);
        Ok(())
    }

    /// Build a fresh filter by name
    ///
    /// # Arguments
    /// * `name` - Registry name of the filter
    /// * `kwargs` - Keyword arguments; `null` or `{}` build the identity filter
    ///
    /// # Examples
    /// ```
    /// # use aero_timeseries::app::services::filters::{Filter, FilterFactory};
    /// # use serde_json::json;
    /// let factory = FilterFactory::with_builtins();
    /// let filter = factory.get("stations", &json!({"exclude": ["station1"]})).unwrap();
    /// assert_eq!(filter.name(), "stations");
    /// assert!(factory.get("nonsense", &json!({})).is_err());
    /// ```
    pub fn get(&self, name: &str, kwargs: &Kwargs) -> Result<BuiltinFilter> {
        let prototype = self
            .filters
            .get(name)
            .ok_or_else(|| Error::unknown_filter(name))?;
        prototype.rebuild(kwargs)
    }

    /// Registered prototypes by name
    pub fn list(&self) -> &BTreeMap<String, BuiltinFilter> {
        &self.filters
    }

    /// Registered names in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
