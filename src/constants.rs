//! Application constants for the timeseries framework
//!
//! Column names, record limits, datetime formats and the names under which
//! the built-in filters register themselves.

// =============================================================================
// Record Model
// =============================================================================

/// Maximum station identifier length, in characters
pub const MAX_STATION_ID_LEN: usize = 64;

/// Datetime format used by filter arguments and exclude files
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical column names of a [`crate::Data`] table
pub mod columns {
    pub const VALUES: &str = "values";
    pub const STATIONS: &str = "stations";
    pub const LATITUDES: &str = "latitudes";
    pub const LONGITUDES: &str = "longitudes";
    pub const ALTITUDES: &str = "altitudes";
    pub const START_TIMES: &str = "start_times";
    pub const END_TIMES: &str = "end_times";
    pub const FLAGS: &str = "flags";
    pub const STANDARD_DEVIATIONS: &str = "standard_deviations";

    /// All columns in schema order
    pub const ALL: &[&str] = &[
        VALUES,
        STATIONS,
        LATITUDES,
        LONGITUDES,
        ALTITUDES,
        START_TIMES,
        END_TIMES,
        FLAGS,
        STANDARD_DEVIATIONS,
    ];
}

// =============================================================================
// Filter Registry
// =============================================================================

/// Registry names of the built-in filters
pub mod filter_names {
    pub const VARIABLES: &str = "variables";
    pub const STATIONS: &str = "stations";
    pub const COUNTRIES: &str = "countries";
    pub const BOUNDING_BOXES: &str = "bounding_boxes";
    pub const TIME_BOUNDS: &str = "time_bounds";
    pub const TIME_VARIABLE_STATION: &str = "time_variable_station";
    pub const FLAGS: &str = "flags";

    /// Built-in filters in registration order
    pub const BUILTIN: &[&str] = &[
        VARIABLES,
        STATIONS,
        COUNTRIES,
        BOUNDING_BOXES,
        TIME_BOUNDS,
        TIME_VARIABLE_STATION,
        FLAGS,
    ];
}

/// Latitude limits in degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Longitude limits in degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Comment marker in exclude files
pub const EXCLUDE_FILE_COMMENT: u8 = b'#';

// =============================================================================
// Logging
// =============================================================================

/// Default log level when none is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log target prefix used by the CLI's env filter
pub const LOG_TARGET: &str = "aero_timeseries";
