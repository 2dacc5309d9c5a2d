//! Ordered filter pipelines
//!
//! A [`FilterCollection`] is the declarative form: `(name, kwargs)` pairs as
//! they appear in configuration files. Resolving it against a
//! [`FilterFactory`] yields a [`FilterChain`] of built filters, which is what
//! readers run.
//!
//! Both JSON forms are accepted for a collection:
//!
//! ```json
//! [{"name": "countries", "kwargs": {"include": ["NO"]}}]
//! {"countries": {"include": ["NO"]}}
//! ```
//!
//! The mapping form keeps its key order.

use super::{BuiltinFilter, Filter, FilterFactory, Kwargs};
use crate::app::models::{Data, StationMap};
use crate::app::services::readers::Reader;
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

// =============================================================================
// Declarative Pipeline
// =============================================================================

/// One declared filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub name: String,
    #[serde(default)]
    pub kwargs: Kwargs,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, kwargs: Kwargs) -> Self {
        Self {
            name: name.into(),
            kwargs,
        }
    }
}

/// Ordered sequence of declared filters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterCollection {
    filters: Vec<FilterSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionRepr {
    List(Vec<FilterSpec>),
    Mapping(serde_json::Map<String, Kwargs>),
}

impl<'de> Deserialize<'de> for FilterCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let filters = match CollectionRepr::deserialize(deserializer)? {
            CollectionRepr::List(filters) => filters,
            CollectionRepr::Mapping(map) => map
                .into_iter()
                .map(|(name, kwargs)| FilterSpec::new(name, kwargs))
                .collect(),
        };
        Ok(Self { filters })
    }
}

impl FilterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record already built filters by name and current arguments
    pub fn from_filters(filters: impl IntoIterator<Item = BuiltinFilter>) -> Self {
        Self {
            filters: filters
                .into_iter()
                .map(|filter| FilterSpec::new(filter.name(), filter.init_kwargs()))
                .collect(),
        }
    }

    /// Append a filter declaration
    pub fn push(&mut self, name: impl Into<String>, kwargs: Kwargs) {
        self.filters.push(FilterSpec::new(name, kwargs));
    }

    /// Append a filter declaration, builder style
    pub fn with(mut self, name: impl Into<String>, kwargs: Kwargs) -> Self {
        self.push(name, kwargs);
        self
    }

    pub fn entries(&self) -> &[FilterSpec] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Build every declared filter, in order
    pub fn resolve(&self, factory: &FilterFactory) -> Result<FilterChain> {
        let filters = self
            .filters
            .iter()
            .map(|spec| factory.get(&spec.name, &spec.kwargs))
            .collect::<Result<Vec<_>>>()?;
        Ok(FilterChain::new(filters))
    }

    /// Fetch `variable` from `reader` and run it through this pipeline
    ///
    /// Whether `variable` itself survives the variable filters is not
    /// checked; use [`FilterChain::run`] to inspect the filtered variables.
    pub fn filter(
        &self,
        factory: &FilterFactory,
        reader: &dyn Reader,
        variable: &str,
    ) -> Result<Data> {
        let chain = self.resolve(factory)?;
        let data = reader.data(variable)?;
        let stations = reader.stations()?;
        let variables = reader.variables()?;
        Ok(chain.run(data, stations, variables)?.data)
    }
}

// =============================================================================
// Resolved Pipeline
// =============================================================================

/// Result of running a [`FilterChain`]
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub data: Data,
    pub stations: StationMap,
    pub variables: Vec<String>,
}

/// Built filters applied in order
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<BuiltinFilter>,
}

impl FilterChain {
    pub fn new(filters: Vec<BuiltinFilter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[BuiltinFilter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Declarative form of this chain
    pub fn to_collection(&self) -> FilterCollection {
        FilterCollection::from_filters(self.filters.iter().cloned())
    }

    pub fn filter_variables(&self, variables: Vec<String>) -> Vec<String> {
        self.filters
            .iter()
            .fold(variables, |variables, filter| filter.filter_variables(variables))
    }

    pub fn filter_stations(&self, stations: StationMap) -> StationMap {
        self.filters
            .iter()
            .fold(stations, |stations, filter| filter.filter_stations(stations))
    }

    /// Map a filtered variable name back to the reader's name, last filter first
    pub fn reader_variable(&self, variable: &str) -> String {
        self.filters
            .iter()
            .rev()
            .fold(variable.to_string(), |variable, filter| {
                filter.reader_variable(&variable)
            })
    }

    /// Apply every filter in order
    ///
    /// Each filter first reduces the running variable list, then the running
    /// station map, then the data, which sees the context already reduced by
    /// this and all earlier filters.
    pub fn run(
        &self,
        mut data: Data,
        mut stations: StationMap,
        mut variables: Vec<String>,
    ) -> Result<FilterOutcome> {
        for filter in &self.filters {
            let rows_before = data.len();
            variables = filter.filter_variables(variables);
            stations = filter.filter_stations(stations);
            data = filter.filter_data(data, &stations, &variables)?;
            debug!(
                "Filter '{}' kept {}/{} rows, {} stations, {} variables",
                filter.name(),
                data.len(),
                rows_before,
                stations.len(),
                variables.len()
            );
        }

        Ok(FilterOutcome {
            data,
            stations,
            variables,
        })
    }
}

impl From<Vec<BuiltinFilter>> for FilterChain {
    fn from(filters: Vec<BuiltinFilter>) -> Self {
        Self::new(filters)
    }
}
