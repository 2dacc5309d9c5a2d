//! Exclusion of time windows for single variables at single stations
//!
//! Exclusions come from the filter arguments or from an exclude file. The
//! file is comma separated without header, one exclusion per line:
//!
//! ```text
//! # start_time, end_time, variable, station
//! 1997-01-11 00:00:00, 1997-01-12 23:59:59, SOx, station2
//! ```

use super::time_bounds::parse_datetime;
use super::{Configurable, DataIndexFilter, Filter, Kwargs, to_kwargs};
use crate::app::models::{Data, RowIndex, StationMap};
use crate::constants::{EXCLUDE_FILE_COMMENT, filter_names};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Exclusion as `(start_time, end_time, variable, station)`
pub type ExcludeEntry = (String, String, String, String);

/// Arguments of [`TimeVariableStationFilter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeVariableStationArgs {
    pub exclude: Vec<ExcludeEntry>,

    /// Exclude file whose entries are appended to `exclude`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_from_csvfile: Option<String>,
}

/// Read exclusions from an exclude file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, and a configuration
/// error naming the line for rows with fewer than four fields or timestamps
/// that do not parse.
pub fn read_exclude_file(path: &Path) -> Result<Vec<ExcludeEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(EXCLUDE_FILE_COMMENT))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| match e.into_kind() {
            csv::ErrorKind::Io(io) => Error::file_open(path, io),
            other => Error::csv(
                path.display().to_string(),
                format!("cannot read exclude file: {:?}", other),
                None,
            ),
        })?;

    let file = path.display().to_string();
    let mut entries = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| Error::csv(&file, "malformed exclude file", Some(e)))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < 4 {
            return Err(Error::configuration(format!(
                "{}:{}: expected 4 fields (start_time, end_time, variable, station), found {}",
                file,
                line,
                record.len()
            )));
        }

        window_bounds(&record[0], &record[1])
            .map_err(|e| Error::configuration(format!("{}:{}: {}", file, line, e)))?;

        entries.push((
            record[0].to_string(),
            record[1].to_string(),
            record[2].to_string(),
            record[3].to_string(),
        ));
    }

    debug!("Read {} exclusions from {}", entries.len(), file);
    Ok(entries)
}

/// Parse an exclusion window, rejecting one that ends before it starts
fn window_bounds(start: &str, end: &str) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let (s, e) = (parse_datetime(start)?, parse_datetime(end)?);
    if s > e {
        return Err(Error::time_bounds(format!(
            "exclusion start {} after end {}",
            start, end
        )));
    }
    Ok((s, e))
}

/// Removes rows of a variable at a station inside exclusion windows
///
/// A row is removed when its measurement interval overlaps the window
/// (`row_start < window_end && row_end > window_start`).
#[derive(Debug, Clone, Default)]
pub struct TimeVariableStationFilter {
    exclude: Vec<ExcludeEntry>,
    windows: HashMap<(String, String), Vec<(NaiveDateTime, NaiveDateTime)>>,
}

impl TimeVariableStationFilter {
    /// True if the row interval overlaps an exclusion for this variable and station
    pub fn is_excluded(
        &self,
        variable: &str,
        station: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> bool {
        self.windows
            .get(&(variable.to_string(), station.to_string()))
            .is_some_and(|windows| windows.iter().any(|&(s, e)| start < e && end > s))
    }

    /// All exclusions, including those read from a file
    pub fn exclusions(&self) -> &[ExcludeEntry] {
        &self.exclude
    }
}

impl Configurable for TimeVariableStationFilter {
    type Args = TimeVariableStationArgs;
    const NAME: &'static str = filter_names::TIME_VARIABLE_STATION;

    fn from_args(args: Self::Args) -> Result<Self> {
        let mut exclude = args.exclude;
        if let Some(file) = &args.exclude_from_csvfile {
            exclude.extend(read_exclude_file(Path::new(file))?);
        }

        let mut windows: HashMap<(String, String), Vec<(NaiveDateTime, NaiveDateTime)>> =
            HashMap::new();
        for (start, end, variable, station) in &exclude {
            let window = window_bounds(start, end)?;
            windows
                .entry((variable.clone(), station.clone()))
                .or_default()
                .push(window);
        }

        Ok(Self { exclude, windows })
    }

    fn args(&self) -> Self::Args {
        TimeVariableStationArgs {
            exclude: self.exclude.clone(),
            exclude_from_csvfile: None,
        }
    }
}

impl DataIndexFilter for TimeVariableStationFilter {
    fn filter_data_idx(
        &self,
        data: &Data,
        _stations: &StationMap,
        _variables: &[String],
    ) -> RowIndex {
        let variable = data.variable();
        let per_station: HashMap<&str, &[(NaiveDateTime, NaiveDateTime)]> = self
            .windows
            .iter()
            .filter(|((v, _), _)| v == variable)
            .map(|((_, station), windows)| (station.as_str(), windows.as_slice()))
            .collect();

        if per_station.is_empty() {
            return RowIndex::all(data.len());
        }

        let stations = data.stations();
        let starts = data.start_times();
        let ends = data.end_times();
        RowIndex::from_fn(data.len(), |i| {
            per_station
                .get(stations[i].as_str())
                .is_none_or(|windows| {
                    !windows
                        .iter()
                        .any(|&(s, e)| starts[i] < e && ends[i] > s)
                })
        })
    }
}

impl Filter for TimeVariableStationFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init_kwargs(&self) -> Kwargs {
        to_kwargs(&self.args())
    }

    fn filter_data(&self, data: Data, stations: &StationMap, variables: &[String]) -> Result<Data> {
        self.filter_data_by_index(data, stations, variables)
    }
}
