//! Time range filter
//!
//! Ranges come in three families, each testing a different part of a row's
//! measurement interval:
//!
//! - `start_*` tests the start time only
//! - `startend_*` tests the whole interval
//! - `end_*` tests the end time only
//!
//! A family keeps a row when the tested part lies inside one of its include
//! ranges (or it has none) and inside none of its exclude ranges. A row is
//! kept when every family keeps it.

use super::{Configurable, DataIndexFilter, Filter, Kwargs, to_kwargs};
use crate::app::models::{Data, RowIndex, StationMap};
use crate::constants::{DATETIME_FORMAT, filter_names};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Range as a pair of `"YYYY-MM-DD HH:MM:SS"` strings
pub type TimeRange = (String, String);

/// Parse a timestamp in the filter argument format
pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
        .map_err(|e| Error::datetime_parsing(value, e))
}

/// Arguments of [`TimeBoundsFilter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeBoundsArgs {
    pub start_include: Vec<TimeRange>,
    pub start_exclude: Vec<TimeRange>,
    pub startend_include: Vec<TimeRange>,
    pub startend_exclude: Vec<TimeRange>,
    pub end_include: Vec<TimeRange>,
    pub end_exclude: Vec<TimeRange>,
}

impl TimeBoundsArgs {
    pub fn with_start_include(mut self, start: &str, end: &str) -> Self {
        self.start_include.push((start.to_string(), end.to_string()));
        self
    }

    pub fn with_start_exclude(mut self, start: &str, end: &str) -> Self {
        self.start_exclude.push((start.to_string(), end.to_string()));
        self
    }

    pub fn with_startend_include(mut self, start: &str, end: &str) -> Self {
        self.startend_include.push((start.to_string(), end.to_string()));
        self
    }

    pub fn with_startend_exclude(mut self, start: &str, end: &str) -> Self {
        self.startend_exclude.push((start.to_string(), end.to_string()));
        self
    }

    pub fn with_end_include(mut self, start: &str, end: &str) -> Self {
        self.end_include.push((start.to_string(), end.to_string()));
        self
    }

    pub fn with_end_exclude(mut self, start: &str, end: &str) -> Self {
        self.end_exclude.push((start.to_string(), end.to_string()));
        self
    }
}

type Bounds = (NaiveDateTime, NaiveDateTime);

fn parse_ranges(ranges: &[TimeRange]) -> Result<Vec<Bounds>> {
    ranges
        .iter()
        .map(|(start, end)| {
            let s = parse_datetime(start)?;
            let e = parse_datetime(end)?;
            if s > e {
                return Err(Error::time_bounds(format!(
                    "start {} after end {}",
                    start, end
                )));
            }
            Ok((s, e))
        })
        .collect()
}

/// Which endpoints of a row a family tests
#[derive(Debug, Clone, Copy)]
enum Family {
    Start,
    StartEnd,
    End,
}

#[derive(Debug, Clone)]
struct FamilyRanges {
    family: Family,
    include: Vec<Bounds>,
    exclude: Vec<Bounds>,
}

impl FamilyRanges {
    fn new(family: Family, include: &[TimeRange], exclude: &[TimeRange]) -> Result<Self> {
        Ok(Self {
            family,
            include: parse_ranges(include)?,
            exclude: parse_ranges(exclude)?,
        })
    }

    fn keeps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let (t1, t2) = match self.family {
            Family::Start => (start, start),
            Family::StartEnd => (start, end),
            Family::End => (end, end),
        };

        let included =
            self.include.is_empty() || self.include.iter().any(|&(s, e)| s <= t1 && t2 <= e);
        included && !self.exclude.iter().any(|&(s, e)| !(t1 < s || e < t2))
    }
}

/// Keeps rows by their measurement interval
#[derive(Debug, Clone)]
pub struct TimeBoundsFilter {
    args: TimeBoundsArgs,
    families: [FamilyRanges; 3],
}

impl Default for TimeBoundsFilter {
    fn default() -> Self {
        let empty = |family| FamilyRanges {
            family,
            include: Vec::new(),
            exclude: Vec::new(),
        };
        Self {
            args: TimeBoundsArgs::default(),
            families: [
                empty(Family::Start),
                empty(Family::StartEnd),
                empty(Family::End),
            ],
        }
    }
}

impl TimeBoundsFilter {
    /// True if a row with this interval passes all three families
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.families.iter().all(|family| family.keeps(start, end))
    }

    /// Earliest start and latest end over all include ranges
    ///
    /// # Errors
    ///
    /// Returns a time bounds error when no include range is configured.
    pub fn envelope(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let mut ranges = self.families.iter().flat_map(|f| f.include.iter().copied());
        let first = ranges
            .next()
            .ok_or_else(|| Error::time_bounds("no include range to build an envelope from"))?;

        Ok(ranges.fold(first, |(min_start, max_end), (s, e)| {
            (min_start.min(s), max_end.max(e))
        }))
    }
}

impl Configurable for TimeBoundsFilter {
    type Args = TimeBoundsArgs;
    const NAME: &'static str = filter_names::TIME_BOUNDS;

    fn from_args(args: Self::Args) -> Result<Self> {
        let families = [
            FamilyRanges::new(Family::Start, &args.start_include, &args.start_exclude)?,
            FamilyRanges::new(Family::StartEnd, &args.startend_include, &args.startend_exclude)?,
            FamilyRanges::new(Family::End, &args.end_include, &args.end_exclude)?,
        ];
        Ok(Self { args, families })
    }

    fn args(&self) -> Self::Args {
        self.args.clone()
    }
}

impl DataIndexFilter for TimeBoundsFilter {
    fn filter_data_idx(
        &self,
        data: &Data,
        _stations: &StationMap,
        _variables: &[String],
    ) -> RowIndex {
        let starts = data.start_times();
        let ends = data.end_times();
        RowIndex::from_fn(data.len(), |i| self.contains(starts[i], ends[i]))
    }
}

impl Filter for TimeBoundsFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init_kwargs(&self) -> Kwargs {
        to_kwargs(&self.args)
    }

    fn filter_data(&self, data: Data, stations: &StationMap, variables: &[String]) -> Result<Data> {
        self.filter_data_by_index(data, stations, variables)
    }
}
