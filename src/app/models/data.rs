//! Observation table for one variable
//!
//! [`Data`] is the record every reader returns and every filter transforms: a
//! dense column table with a fixed schema (see [`crate::constants::columns`]).
//! All columns always have the same length. Rows are added whole, either one
//! at a time with [`Data::append`] or in bulk, and filters never shrink a
//! table in place: [`Data::slice`] returns a new, independently owned table.

use super::index::RowIndex;
use super::Flag;
use crate::constants::{MAX_STATION_ID_LEN, columns};
use crate::{Error, Result};
use chrono::{NaiveDateTime, Timelike};
use std::fmt;

// =============================================================================
// Row Structure
// =============================================================================

/// One observation row, used to append to a [`Data`] table
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub value: f64,
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub flag: i16,
    /// `NaN` when no standard deviation is available
    pub standard_deviation: f64,
}

impl DataRow {
    /// Create a valid row without standard deviation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        value: f64,
        station: impl Into<String>,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            value,
            station: station.into(),
            latitude,
            longitude,
            altitude,
            start_time,
            end_time,
            flag: Flag::Valid.code(),
            standard_deviation: f64::NAN,
        }
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flag = flag.code();
        self
    }

    /// Set a raw flag code, including codes [`Flag`] does not name
    pub fn with_flag_code(mut self, code: i16) -> Self {
        self.flag = code;
        self
    }

    pub fn with_standard_deviation(mut self, standard_deviation: f64) -> Self {
        self.standard_deviation = standard_deviation;
        self
    }
}

// =============================================================================
// Column Storage
// =============================================================================

/// Column storage of a [`Data`] table
///
/// Used to hand a pre-built table to [`Data::from_columns`], which checks
/// that every column matches the length of `values`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataColumns {
    pub values: Vec<f64>,
    pub stations: Vec<String>,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub altitudes: Vec<f64>,
    pub start_times: Vec<NaiveDateTime>,
    pub end_times: Vec<NaiveDateTime>,
    pub flags: Vec<i16>,
    pub standard_deviations: Vec<f64>,
}

impl DataColumns {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            stations: Vec::with_capacity(capacity),
            latitudes: Vec::with_capacity(capacity),
            longitudes: Vec::with_capacity(capacity),
            altitudes: Vec::with_capacity(capacity),
            start_times: Vec::with_capacity(capacity),
            end_times: Vec::with_capacity(capacity),
            flags: Vec::with_capacity(capacity),
            standard_deviations: Vec::with_capacity(capacity),
        }
    }

    /// Check that every column has as many rows as `values`
    fn validate(&self) -> Result<()> {
        let expected = self.values.len();
        let lengths = [
            (columns::STATIONS, self.stations.len()),
            (columns::LATITUDES, self.latitudes.len()),
            (columns::LONGITUDES, self.longitudes.len()),
            (columns::ALTITUDES, self.altitudes.len()),
            (columns::START_TIMES, self.start_times.len()),
            (columns::END_TIMES, self.end_times.len()),
            (columns::FLAGS, self.flags.len()),
            (columns::STANDARD_DEVIATIONS, self.standard_deviations.len()),
        ];

        for (column, found) in lengths {
            if found != expected {
                return Err(Error::column_length_mismatch(column, expected, found));
            }
        }

        for station in &self.stations {
            check_station_id(station)?;
        }

        Ok(())
    }

    fn push(&mut self, row: DataRow) {
        self.values.push(row.value);
        self.stations.push(row.station);
        self.latitudes.push(row.latitude);
        self.longitudes.push(row.longitude);
        self.altitudes.push(row.altitude);
        self.start_times.push(truncate_to_seconds(row.start_time));
        self.end_times.push(truncate_to_seconds(row.end_time));
        self.flags.push(row.flag);
        self.standard_deviations.push(row.standard_deviation);
    }

    fn extend_from(&mut self, other: &DataColumns) {
        self.values.extend_from_slice(&other.values);
        self.stations.extend_from_slice(&other.stations);
        self.latitudes.extend_from_slice(&other.latitudes);
        self.longitudes.extend_from_slice(&other.longitudes);
        self.altitudes.extend_from_slice(&other.altitudes);
        self.start_times.extend_from_slice(&other.start_times);
        self.end_times.extend_from_slice(&other.end_times);
        self.flags.extend_from_slice(&other.flags);
        self.standard_deviations
            .extend_from_slice(&other.standard_deviations);
    }

    /// Copy the rows at `positions`, in that order
    fn take(&self, positions: &[usize]) -> Self {
        Self {
            values: pick(&self.values, positions),
            stations: pick(&self.stations, positions),
            latitudes: pick(&self.latitudes, positions),
            longitudes: pick(&self.longitudes, positions),
            altitudes: pick(&self.altitudes, positions),
            start_times: pick(&self.start_times, positions),
            end_times: pick(&self.end_times, positions),
            flags: pick(&self.flags, positions),
            standard_deviations: pick(&self.standard_deviations, positions),
        }
    }
}

fn pick<T: Clone>(column: &[T], positions: &[usize]) -> Vec<T> {
    positions.iter().map(|&i| column[i].clone()).collect()
}

fn truncate_to_seconds(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(0).unwrap_or(time)
}

fn check_station_id(station: &str) -> Result<()> {
    if station.chars().count() > MAX_STATION_ID_LEN {
        return Err(Error::station_id_too_long(station, MAX_STATION_ID_LEN));
    }
    Ok(())
}

// =============================================================================
// Data Table
// =============================================================================

/// Observations of one variable, as returned by a reader
#[derive(Debug, Clone)]
pub struct Data {
    variable: String,
    units: String,
    columns: DataColumns,
}

impl Data {
    /// Create an empty table
    pub fn new(variable: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            units: units.into(),
            columns: DataColumns::default(),
        }
    }

    /// Create an empty table with room for `capacity` rows
    pub fn with_capacity(
        variable: impl Into<String>,
        units: impl Into<String>,
        capacity: usize,
    ) -> Self {
        Self {
            variable: variable.into(),
            units: units.into(),
            columns: DataColumns::with_capacity(capacity),
        }
    }

    /// Create a table from pre-built columns
    ///
    /// # Errors
    ///
    /// Returns a column length error if any column disagrees with `values`,
    /// or a station id error if an identifier exceeds the length limit.
    pub fn from_columns(
        variable: impl Into<String>,
        units: impl Into<String>,
        mut columns: DataColumns,
    ) -> Result<Self> {
        columns.validate()?;
        for time in columns
            .start_times
            .iter_mut()
            .chain(columns.end_times.iter_mut())
        {
            *time = truncate_to_seconds(*time);
        }

        Ok(Self {
            variable: variable.into(),
            units: units.into(),
            columns,
        })
    }

    /// Append one row
    ///
    /// # Errors
    ///
    /// Returns a station id error if the row's station exceeds the length
    /// limit; the table is unchanged in that case.
    pub fn append(&mut self, row: DataRow) -> Result<()> {
        check_station_id(&row.station)?;
        self.columns.push(row);
        Ok(())
    }

    /// Append every row of another table
    ///
    /// Variable and units of `other` are ignored.
    pub fn append_data(&mut self, other: &Data) {
        self.columns.extend_from(&other.columns);
    }

    /// Append several rows
    ///
    /// # Errors
    ///
    /// Every row is checked before any is added, so the table is unchanged
    /// when one of them is invalid.
    pub fn append_rows(&mut self, rows: impl IntoIterator<Item = DataRow>) -> Result<()> {
        let rows: Vec<DataRow> = rows.into_iter().collect();
        for row in &rows {
            check_station_id(&row.station)?;
        }
        for row in rows {
            self.columns.push(row);
        }
        Ok(())
    }

    /// Copy of this table restricted to `index`
    ///
    /// # Errors
    ///
    /// A mask must have exactly one entry per row, and every position must be
    /// inside the table.
    pub fn slice(&self, index: &RowIndex) -> Result<Data> {
        let len = self.len();
        let positions: Vec<usize> = match index {
            RowIndex::Mask(mask) => {
                if mask.len() != len {
                    return Err(Error::column_length_mismatch("index mask", len, mask.len()));
                }
                mask.iter()
                    .enumerate()
                    .filter_map(|(i, keep)| keep.then_some(i))
                    .collect()
            }
            RowIndex::Positions(positions) => {
                if let Some(&outside) = positions.iter().find(|&&i| i >= len) {
                    return Err(Error::index_out_of_bounds(outside, len));
                }
                positions.clone()
            }
        };

        Ok(Data {
            variable: self.variable.clone(),
            units: self.units.clone(),
            columns: self.columns.take(&positions),
        })
    }

    /// Relabel the variable; row content is untouched
    ///
    /// Only variable-renaming collaborators may call this.
    pub(crate) fn set_variable(&mut self, variable: impl Into<String>) {
        self.variable = variable.into();
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Units in CF notation, shared by all values
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.values.is_empty()
    }

    /// Names of all data columns, excluding the variable and units metadata
    pub fn keys(&self) -> &'static [&'static str] {
        columns::ALL
    }

    pub fn values(&self) -> &[f64] {
        &self.columns.values
    }

    pub fn stations(&self) -> &[String] {
        &self.columns.stations
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.columns.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.columns.longitudes
    }

    pub fn altitudes(&self) -> &[f64] {
        &self.columns.altitudes
    }

    pub fn start_times(&self) -> &[NaiveDateTime] {
        &self.columns.start_times
    }

    pub fn end_times(&self) -> &[NaiveDateTime] {
        &self.columns.end_times
    }

    pub fn flags(&self) -> &[i16] {
        &self.columns.flags
    }

    pub fn standard_deviations(&self) -> &[f64] {
        &self.columns.standard_deviations
    }

    /// Borrow the column storage
    pub fn columns(&self) -> &DataColumns {
        &self.columns
    }

    /// Take the column storage, dropping variable and units
    pub fn into_columns(self) -> DataColumns {
        self.columns
    }

    /// Row at `index`, if inside the table
    pub fn row(&self, index: usize) -> Option<DataRow> {
        if index >= self.len() {
            return None;
        }
        let c = &self.columns;
        Some(DataRow {
            value: c.values[index],
            station: c.stations[index].clone(),
            latitude: c.latitudes[index],
            longitude: c.longitudes[index],
            altitude: c.altitudes[index],
            start_time: c.start_times[index],
            end_time: c.end_times[index],
            flag: c.flags[index],
            standard_deviation: c.standard_deviations[index],
        })
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = DataRow> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} rows", self.variable, self.units, self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn time(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1997, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn create_test_data(rows: u32) -> Data {
        let mut data = Data::new("SOx", "Gg");
        for day in 1..=rows {
            let station = if day % 2 == 0 { "station2" } else { "station1" };
            data.append(DataRow::new(
                day as f64,
                station,
                60.0,
                10.0,
                100.0,
                time(day),
                time(day) + Duration::days(1),
            ))
            .unwrap();
        }
        data
    }

    #[test]
    fn test_empty_data() {
        let data = Data::new("NOx", "Mg");
        assert!(data.is_empty());
        assert_eq!(data.len(), 0);
        assert_eq!(data.variable(), "NOx");
        assert_eq!(data.units(), "Mg");
        assert_eq!(data.keys().len(), 9);
        assert!(data.keys().contains(&"end_times"));
    }

    #[test]
    fn test_append_defaults() {
        let data = create_test_data(1);
        let row = data.row(0).unwrap();
        assert_eq!(row.flag, Flag::Valid.code());
        assert!(row.standard_deviation.is_nan());
        assert_eq!(data.end_times()[0], time(2));
    }

    #[test]
    fn test_append_rejects_long_station_id() {
        let mut data = create_test_data(2);
        let long_name = "x".repeat(MAX_STATION_ID_LEN + 1);
        let result = data.append(DataRow::new(1.0, long_name, 0.0, 0.0, 0.0, time(1), time(2)));

        assert!(matches!(result, Err(Error::StationIdTooLong { .. })));
        assert_eq!(data.len(), 2);

        let exact = "y".repeat(MAX_STATION_ID_LEN);
        assert!(
            data.append(DataRow::new(1.0, exact, 0.0, 0.0, 0.0, time(1), time(2)))
                .is_ok()
        );
    }

    #[test]
    fn test_append_truncates_subsecond_times() {
        let mut data = Data::new("SOx", "Gg");
        let start = time(1) + Duration::milliseconds(750);
        data.append(DataRow::new(1.0, "s", 0.0, 0.0, 0.0, start, start))
            .unwrap();
        assert_eq!(data.start_times()[0], time(1));
    }

    #[test]
    fn test_append_data_doubles() {
        let mut data = create_test_data(5);
        for _ in 0..3 {
            let copy = data.clone();
            data.append_data(&copy);
        }
        assert_eq!(data.len(), 40);
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let mut columns = create_test_data(3).into_columns();
        columns.flags.pop();

        let result = Data::from_columns("SOx", "Gg", columns);
        match result {
            Err(Error::ColumnLengthMismatch {
                column,
                expected,
                found,
            }) => {
                assert_eq!(column, "flags");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_columns_valid() {
        let columns = create_test_data(4).into_columns();
        let data = Data::from_columns("NOx", "Mg", columns).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.variable(), "NOx");
    }

    #[test]
    fn test_slice_by_mask() {
        let data = create_test_data(4);
        let sliced = data
            .slice(&RowIndex::from_mask(vec![true, false, false, true]))
            .unwrap();

        assert_eq!(sliced.values(), &[1.0, 4.0]);
        assert_eq!(sliced.stations(), &["station1".to_string(), "station2".to_string()]);
        assert_eq!(sliced.variable(), "SOx");
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_slice_by_positions() {
        let data = create_test_data(4);
        let sliced = data.slice(&RowIndex::from_positions(vec![3, 0])).unwrap();
        assert_eq!(sliced.values(), &[4.0, 1.0]);
    }

    #[test]
    fn test_slice_rejects_bad_index() {
        let data = create_test_data(3);
        assert!(matches!(
            data.slice(&RowIndex::from_mask(vec![true])),
            Err(Error::ColumnLengthMismatch { .. })
        ));
        assert!(matches!(
            data.slice(&RowIndex::from_positions(vec![0, 3])),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_slice_to_empty() {
        let data = create_test_data(3);
        let empty = data.slice(&RowIndex::none(3)).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.units(), "Gg");
    }

    #[test]
    fn test_set_variable_keeps_rows() {
        let mut data = create_test_data(3);
        data.set_variable("oxidised_sulphur");
        assert_eq!(data.variable(), "oxidised_sulphur");
        assert_eq!(data.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_display_and_rows() {
        let data = create_test_data(5);
        assert_eq!(data.to_string(), "SOx, Gg, 5 rows");
        assert_eq!(data.rows().count(), 5);
    }

    #[test]
    fn test_append_rows_all_or_nothing() {
        let mut data = create_test_data(2);
        let rows = vec![
            DataRow::new(3.0, "station3", 60.0, 10.0, 100.0, time(3), time(4)),
            DataRow::new(4.0, "x".repeat(65), 60.0, 10.0, 100.0, time(4), time(5)),
        ];

        let result = data.append_rows(rows);
        assert!(matches!(result, Err(Error::StationIdTooLong { .. })));
        assert_eq!(data.len(), 2);
        assert_eq!(data.stations(), &["station1", "station2"]);

        let valid = DataRow::new(3.0, "station3", 60.0, 10.0, 100.0, time(3), time(4));
        data.append_rows(vec![valid]).unwrap();
        assert_eq!(data.len(), 3);
    }
}
