use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

use crate::csv_reader::{self, CsvData};
use crate::series::{Series, SeriesPoint};
use crate::source::DataSource;

pub const DATE_COLUMN: &str = "date";

/// The five performance metrics tracked per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnField {
    Inception,
    OneDay,
    OneWeek,
    OneMonth,
    OneYear,
}

impl ReturnField {
    pub const ALL: [ReturnField; 5] = [
        ReturnField::Inception,
        ReturnField::OneDay,
        ReturnField::OneWeek,
        ReturnField::OneMonth,
        ReturnField::OneYear,
    ];

    /// Header of the source column, also used as the legend label.
    pub fn column(self) -> &'static str {
        match self {
            ReturnField::Inception => "inception_return",
            ReturnField::OneDay => "one_day_return",
            ReturnField::OneWeek => "one_week_return",
            ReturnField::OneMonth => "one_month_return",
            ReturnField::OneYear => "one_year_return",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            ReturnField::Inception => "inception",
            ReturnField::OneDay => "one_day",
            ReturnField::OneWeek => "one_week",
            ReturnField::OneMonth => "one_month",
            ReturnField::OneYear => "one_year",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ReturnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for ReturnField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ReturnField::ALL
            .into_iter()
            .find(|field| {
                field.column().eq_ignore_ascii_case(wanted)
                    || field.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                anyhow!(
                    "Unknown return field '{}'. Expected one of: {}",
                    wanted,
                    ReturnField::ALL.map(ReturnField::column).join(", ")
                )
            })
    }
}

/// One dated row of returns; `None` marks a value that was not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub returns: [Option<f64>; 5],
}

impl Record {
    pub fn new(date: NaiveDate) -> Self {
        Record { date, returns: [None; 5] }
    }

    pub fn with(mut self, field: ReturnField, value: f64) -> Self {
        self.returns[field.index()] = Some(value);
        self
    }

    pub fn get(&self, field: ReturnField) -> Option<f64> {
        self.returns[field.index()]
    }

    pub fn has_any_return(&self) -> bool {
        self.returns.iter().any(Option::is_some)
    }
}

/// Cleaned, read-only return history in source row order.
///
/// Every record holds at least one return value; rows with none are dropped
/// at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn from_records(records: Vec<Record>) -> Self {
        let records = records.into_iter().filter(Record::has_any_return).collect();
        Table { records }
    }

    pub fn from_csv(data: &CsvData) -> Result<Self> {
        let (_, raw_dates) = csv_reader::extract_column_as_string(data, DATE_COLUMN)
            .context("Return data has no date column")?;

        let mut dates = Vec::with_capacity(raw_dates.len());
        for (row_idx, raw) in raw_dates.iter().enumerate() {
            let date = parse_date(raw).with_context(|| format!("Invalid date at row {}", row_idx + 1))?;
            dates.push(date);
        }

        let mut records: Vec<Record> = dates.into_iter().map(Record::new).collect();
        for field in ReturnField::ALL {
            let (_, values) = csv_reader::extract_numeric_column(data, field.column())
                .with_context(|| format!("Return data has no {} column", field))?;
            for (record, value) in records.iter_mut().zip(values) {
                record.returns[field.index()] = value;
            }
        }

        let total = records.len();
        let table = Table::from_records(records);
        tracing::info!(
            retained = table.len(),
            purged = total - table.len(),
            "Prepared return table"
        );

        Ok(table)
    }

    /// Fetch and prepare the table in one go.
    pub async fn load(source: &DataSource) -> Result<Self> {
        tracing::info!(%source, "Loading return data");
        let content = source.fetch().await?;
        let data = csv_reader::read_csv_from_str(&content)
            .with_context(|| format!("Failed to parse CSV from {}", source))?;
        Table::from_csv(&data)
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

    /// Points of one field, skipping rows where it is absent.
    pub fn series(&self, field: ReturnField) -> Series {
        let points = self
            .records
            .iter()
            .filter_map(|record| {
                record
                    .get(field)
                    .map(|value| SeriesPoint { date: record.date, value })
            })
            .collect();
        Series { field, points }
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a calendar date, dropping any time-of-day component.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("Empty date");
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.date_naive());
    }

    Err(anyhow!("Failed to parse '{}' as a date", raw))
}
