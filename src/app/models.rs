//! Data models for atmospheric-observation timeseries
//!
//! This module contains the record model shared by every reader and filter:
//! the per-variable observation table ([`Data`]), station metadata
//! ([`Station`]), measurement flags ([`Flag`]) and the row selection type
//! ([`RowIndex`]) used to project tables.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod data;
pub mod index;
pub mod station;

pub use data::{Data, DataColumns, DataRow};
pub use index::RowIndex;
pub use station::{Station, StationMap, station_map};

// =============================================================================
// Measurement Flags
// =============================================================================

/// Flag of a measurement
///
/// All flags are small integer codes; a [`Data`] table stores the raw code so
/// backends may carry codes this enum does not name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum Flag {
    /// Measurement is valid
    #[default]
    Valid = 0,

    /// Measurement is invalid
    Invalid = 1,

    /// Measurement is below the detection threshold
    BelowThreshold = 2,
}

impl Flag {
    /// All defined flags
    pub const ALL: [Flag; 3] = [Flag::Valid, Flag::Invalid, Flag::BelowThreshold];

    /// Integer code stored in the flags column
    pub fn code(self) -> i16 {
        self as i16
    }

    /// Human-readable description of this flag
    pub fn description(self) -> &'static str {
        match self {
            Flag::Valid => "valid",
            Flag::Invalid => "invalid",
            Flag::BelowThreshold => "below threshold",
        }
    }
}

impl TryFrom<i16> for Flag {
    type Error = Error;

    fn try_from(value: i16) -> Result<Self> {
        Flag::ALL
            .into_iter()
            .find(|flag| flag.code() == value)
            .ok_or_else(|| {
                Error::data_integrity(format!(
                    "Invalid flag value {}: must be 0, 1 or 2",
                    value
                ))
            })
    }
}

impl From<Flag> for i16 {
    fn from(flag: Flag) -> Self {
        flag.code()
    }
}

impl FromStr for Flag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "VALID" => Ok(Flag::Valid),
            "INVALID" => Ok(Flag::Invalid),
            "BELOW_THRESHOLD" => Ok(Flag::BelowThreshold),
            _ => {
                let code = trimmed.parse::<i16>().map_err(|_| {
                    Error::data_integrity(format!("Invalid flag value '{}'", s))
                })?;
                Flag::try_from(code)
            }
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
