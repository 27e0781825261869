use log::{debug, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod detail;
pub mod engine;
pub mod loader;
pub mod scale;
pub mod state;
pub mod utils;

use engine::{recompute, Dimensions, RenderPlan};
use utils::{parse_grouped_f64, parse_grouped_u32};

/// One tournament edition.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub year: u16,
    pub location: String,
    pub winner: String,
    pub team_count: u32,
    pub match_count: u32,
    pub goal_count: u32,
    pub average_goals: f64,
    pub average_attendance: u32,
}

/// Numeric field plotted on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Metric {
    Teams,
    Matches,
    Goals,
    AverageGoals,
    AverageAttendance,
}

impl Metric {
    /// Dropdown order.
    pub const ALL: [Metric; 5] = [
        Metric::Goals,
        Metric::AverageGoals,
        Metric::Matches,
        Metric::Teams,
        Metric::AverageAttendance,
    ];

    /// Column key, also used as the `<option>` value.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Teams => "TEAMS",
            Metric::Matches => "MATCHES",
            Metric::Goals => "GOALS",
            Metric::AverageGoals => "AVERAGE_GOALS",
            Metric::AverageAttendance => "AVERAGE_ATTENDANCE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Teams => "Teams",
            Metric::Matches => "Matches",
            Metric::Goals => "Goals",
            Metric::AverageGoals => "Average Goals",
            Metric::AverageAttendance => "Average Attendance",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::Teams => f64::from(record.team_count),
            Metric::Matches => f64::from(record.match_count),
            Metric::Goals => f64::from(record.goal_count),
            Metric::AverageGoals => record.average_goals,
            Metric::AverageAttendance => f64::from(record.average_attendance),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A metric key outside the fixed set. The selector's options come from
/// `Metric::ALL`, so seeing this is a wiring bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown metric key: {:?}", self.0)
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Errors raised while obtaining or parsing the dataset.
#[derive(Debug)]
pub enum DataError {
    /// The one-time fetch failed (network, HTTP status, or body decode).
    Fetch(String),
    Csv(csv::Error),
    InvalidNumber {
        field: &'static str,
        value: String,
    },
    InvalidYear(String),
    DuplicateYear(u16),
    Empty,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Fetch(msg) => write!(f, "Failed to load data: {}", msg),
            DataError::Csv(err) => write!(f, "Malformed CSV: {}", err),
            DataError::InvalidNumber { field, value } => {
                write!(f, "Invalid number in {}: {:?}", field, value)
            }
            DataError::InvalidYear(value) => write!(f, "Invalid year: {:?}", value),
            DataError::DuplicateYear(year) => write!(f, "Year {} appears more than once", year),
            DataError::Empty => write!(f, "Dataset contains no tournaments"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err)
    }
}

/// Inclusive year interval. `lo <= hi` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct YearRange {
    lo: u16,
    hi: u16,
}

impl YearRange {
    /// Reversed bounds are swapped.
    pub fn new(a: u16, b: u16) -> Self {
        YearRange {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn lo(&self) -> u16 {
        self.lo
    }

    pub fn hi(&self) -> u16 {
        self.hi
    }

    #[inline]
    pub fn contains(&self, year: u16) -> bool {
        (self.lo..=self.hi).contains(&year)
    }

    /// Overlap with `bounds`, or `None` when the two ranges share no year.
    pub fn intersect(&self, bounds: YearRange) -> Option<YearRange> {
        let lo = self.lo.max(bounds.lo);
        let hi = self.hi.min(bounds.hi);
        (lo <= hi).then_some(YearRange { lo, hi })
    }

    /// Move the lower end to `year`, stopping at the upper end.
    pub fn with_lo(&self, year: u16) -> YearRange {
        YearRange {
            lo: year.min(self.hi),
            hi: self.hi,
        }
    }

    /// Move the upper end to `year`, stopping at the lower end.
    pub fn with_hi(&self, year: u16) -> YearRange {
        YearRange {
            lo: self.lo,
            hi: year.max(self.lo),
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// The loaded dataset: sorted ascending by year, unique by year, never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    records: Rc<Vec<Record>>,
}

impl RecordStore {
    pub fn new(mut records: Vec<Record>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }
        records.sort_by_key(|r| r.year);
        let mut seen = HashSet::with_capacity(records.len());
        for r in &records {
            if !seen.insert(r.year) {
                return Err(DataError::DuplicateYear(r.year));
            }
        }
        Ok(RecordStore {
            records: Rc::new(records),
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full year span of the dataset.
    pub fn year_bounds(&self) -> YearRange {
        // Construction guarantees at least one record.
        let first = self.records.first().map(|r| r.year).unwrap_or_default();
        let last = self.records.last().map(|r| r.year).unwrap_or_default();
        YearRange::new(first, last)
    }

    pub fn get(&self, year: u16) -> Option<&Record> {
        self.records
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn filter_range(&self, range: YearRange) -> Vec<&Record> {
        filter_range(&self.records, range)
    }
}

/// Records with `lo <= year <= hi`, in input order.
pub fn filter_range(records: &[Record], range: YearRange) -> Vec<&Record> {
    records.iter().filter(|r| range.contains(r.year)).collect()
}

#[derive(serde::Deserialize)]
struct RawRow {
    #[serde(rename = "YEAR")]
    year: String,
    #[serde(rename = "LOCATION")]
    location: String,
    #[serde(rename = "WINNER")]
    winner: String,
    #[serde(rename = "TEAMS")]
    teams: String,
    #[serde(rename = "MATCHES")]
    matches: String,
    #[serde(rename = "GOALS")]
    goals: String,
    #[serde(rename = "AVERAGE_GOALS")]
    average_goals: String,
    #[serde(rename = "AVERAGE_ATTENDANCE")]
    average_attendance: String,
}

impl RawRow {
    fn into_record(self) -> Result<Record, DataError> {
        let year = self
            .year
            .trim()
            .parse::<u16>()
            .map_err(|_| DataError::InvalidYear(self.year.clone()))?;
        Ok(Record {
            year,
            location: self.location.trim().to_string(),
            winner: self.winner.trim().to_string(),
            team_count: parse_grouped_u32(&self.teams, "TEAMS")?,
            match_count: parse_grouped_u32(&self.matches, "MATCHES")?,
            goal_count: parse_grouped_u32(&self.goals, "GOALS")?,
            average_goals: parse_grouped_f64(&self.average_goals, "AVERAGE_GOALS")?,
            average_attendance: parse_grouped_u32(
                &self.average_attendance,
                "AVERAGE_ATTENDANCE",
            )?,
        })
    }
}

/// Parse the tournament table (header row required) into a sorted store.
pub fn read_records_from_csv_string(csv_content: &str) -> Result<RecordStore, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<RawRow>().enumerate() {
        let record = row?.into_record().map_err(|err| {
            warn!("Row {}: {}", i + 1, err);
            err
        })?;
        debug!("Parsed {} ({})", record.year, record.location);
        records.push(record);
    }

    let store = RecordStore::new(records)?;
    info!(
        "Successfully loaded {} tournaments spanning {}",
        store.len(),
        store.year_bounds()
    );
    Ok(store)
}

/// Parse `csv` and lay out `[lo, hi]` for `metric_key` at the default chart
/// size. Errors come back as display strings for the JS side.
pub fn plan_from_csv(csv: &str, lo: u16, hi: u16, metric_key: &str) -> Result<RenderPlan, String> {
    let store = read_records_from_csv_string(csv).map_err(|e| e.to_string())?;
    let metric = metric_key.parse::<Metric>().map_err(|e| e.to_string())?;
    Ok(recompute(
        store.records(),
        YearRange::new(lo, hi),
        metric,
        Dimensions::default(),
        None,
    ))
}

/// Exported to JavaScript when the library is built as a `cdylib`
/// (`wasm-pack build`), so plain-JS pages can reuse the engine.
///
/// # Returns
/// A serialized `RenderPlan`, or a serialized error message string
#[wasm_bindgen]
pub fn compute_render_plan(csv: &str, lo: u16, hi: u16, metric_key: &str) -> JsValue {
    let result = match plan_from_csv(csv, lo, hi, metric_key) {
        Ok(plan) => serde_wasm_bindgen::to_value(&plan),
        Err(msg) => {
            warn!("compute_render_plan failed: {}", msg);
            serde_wasm_bindgen::to_value(&msg)
        }
    };
    result.unwrap_or(JsValue::NULL)
}
