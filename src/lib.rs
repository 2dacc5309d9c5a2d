//! Atmospheric Timeseries Library
//!
//! A Rust library of pluggable readers and filters for atmospheric-observation
//! timeseries: measurements of one variable at many stations, each valid over
//! a time interval.
//!
//! This library provides tools for:
//! - A common record model ([`Data`], [`Station`], [`Flag`]) for all backends
//! - Filters by station, country, bounding box, time range, flag and variable
//! - Declarative filter pipelines resolved against an explicit registry
//! - Readers that apply pipelines transparently and close on scope exit
//! - Conversion of tables to and from polars DataFrames
//!
//! ## Example
//!
//! ```rust
//! use aero_timeseries::{Data, DataRow, MemoryReader, Reader, Station};
//! use aero_timeseries::app::services::filters::{FilterCollection, FilterFactory};
//! use aero_timeseries::app::services::readers::FilteredReader;
//! use chrono::NaiveDate;
//! use serde_json::json;
//!
//! # fn example() -> aero_timeseries::Result<()> {
//! let start = NaiveDate::from_ymd_opt(1997, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let mut data = Data::new("SOx", "Gg");
//! data.append(DataRow::new(1.0, "NO0042", 78.9, 11.9, 474.0, start, start))?;
//!
//! let backend = MemoryReader::new()
//!     .with_station(Station::new("NO0042", 78.9, 11.9, 474.0).with_country("NO"))
//!     .with_data(data)?;
//!
//! let filters = FilterCollection::new().with("countries", json!({"exclude": ["NO"]}));
//! let reader = FilteredReader::from_collection(backend, &filters, &FilterFactory::default())?;
//! assert!(reader.data("SOx")?.is_empty());
//! assert!(reader.stations()?.is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod dataframe;
        pub mod filters;
        pub mod readers;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Data, DataColumns, DataRow, Flag, RowIndex, Station, StationMap, station_map};
pub use app::services::filters::{
    BuiltinFilter, Filter, FilterChain, FilterCollection, FilterFactory, Kwargs,
};
pub use app::services::readers::{
    Engine, EngineRegistry, MemoryReader, Reader, ScopedReader, with_reader,
};
pub use config::PipelineConfig;
pub use error::{Error, Result};
