//! Conversion between [`Data`] tables and polars DataFrames
//!
//! Column names are the canonical [`columns`] names. Times are stored as
//! `Datetime(ms)` without time zone and flags as `Int16`.

use crate::app::models::{Data, DataColumns};
use crate::constants::columns;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

fn to_millis(times: &[NaiveDateTime]) -> Vec<i64> {
    times.iter().map(|t| t.and_utc().timestamp_millis()).collect()
}

fn datetime_column(name: &str, times: &[NaiveDateTime]) -> Result<Column> {
    let series = Series::new(name.into(), to_millis(times))
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .map_err(|e| Error::polars(format!("cannot build '{}' column", name), e))?;
    Ok(series.into_column())
}

/// Convert a table into a DataFrame with one column per data column
pub fn to_dataframe(data: &Data) -> Result<DataFrame> {
    let columns = vec![
        Series::new(columns::VALUES.into(), data.values()).into_column(),
        Series::new(columns::STATIONS.into(), data.stations()).into_column(),
        Series::new(columns::LATITUDES.into(), data.latitudes()).into_column(),
        Series::new(columns::LONGITUDES.into(), data.longitudes()).into_column(),
        Series::new(columns::ALTITUDES.into(), data.altitudes()).into_column(),
        datetime_column(columns::START_TIMES, data.start_times())?,
        datetime_column(columns::END_TIMES, data.end_times())?,
        Series::new(columns::FLAGS.into(), data.flags()).into_column(),
        Series::new(columns::STANDARD_DEVIATIONS.into(), data.standard_deviations()).into_column(),
    ];

    DataFrame::new(columns).map_err(|e| Error::polars("cannot build DataFrame", e))
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| Error::missing_column(name))
}

fn cast(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Column> {
    column(df, name)?
        .cast(dtype)
        .map_err(|e| Error::polars(format!("cannot cast '{}' to {}", name, dtype), e))
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let cast = cast(df, name, &DataType::Float64)?;
    let values = cast.f64().map_err(|e| Error::polars(name, e))?;
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let cast = cast(df, name, &DataType::String)?;
    let values = cast.str().map_err(|e| Error::polars(name, e))?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(str::to_string).ok_or_else(|| {
                Error::data_integrity(format!("null in column '{}' at row {}", name, row))
            })
        })
        .collect()
}

fn datetime_values(df: &DataFrame, name: &str) -> Result<Vec<NaiveDateTime>> {
    let cast = cast(df, name, &DataType::Datetime(TimeUnit::Milliseconds, None))?
        .cast(&DataType::Int64)
        .map_err(|e| Error::polars(name, e))?;
    let millis = cast.i64().map_err(|e| Error::polars(name, e))?;

    millis
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .and_then(DateTime::from_timestamp_millis)
                .map(|t| t.naive_utc())
                .ok_or_else(|| {
                    Error::data_integrity(format!(
                        "missing or invalid time in column '{}' at row {}",
                        name, row
                    ))
                })
        })
        .collect()
}

fn flag_column(df: &DataFrame, name: &str) -> Result<Vec<i16>> {
    let cast = cast(df, name, &DataType::Int16)?;
    let flags = cast.i16().map_err(|e| Error::polars(name, e))?;
    flags
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                Error::data_integrity(format!("null flag at row {}", row))
            })
        })
        .collect()
}

/// Build a table from a DataFrame holding every canonical column
///
/// # Errors
///
/// Returns a missing column error for absent columns and a data integrity
/// error for null stations, times or flags. Null floats become `NaN`.
pub fn from_dataframe(
    variable: impl Into<String>,
    units: impl Into<String>,
    df: &DataFrame,
) -> Result<Data> {
    for name in columns::ALL {
        column(df, name)?;
    }

    let table = DataColumns {
        values: float_column(df, columns::VALUES)?,
        stations: string_column(df, columns::STATIONS)?,
        latitudes: float_column(df, columns::LATITUDES)?,
        longitudes: float_column(df, columns::LONGITUDES)?,
        altitudes: float_column(df, columns::ALTITUDES)?,
        start_times: datetime_values(df, columns::START_TIMES)?,
        end_times: datetime_values(df, columns::END_TIMES)?,
        flags: flag_column(df, columns::FLAGS)?,
        standard_deviations: float_column(df, columns::STANDARD_DEVIATIONS)?,
    };

    Data::from_columns(variable, units, table)
}
