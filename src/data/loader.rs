//! Dataset loading with the polars CSV reader.
//!
//! The source table is read once at startup into an immutable [`Dataset`].
//! The aggregated relation and the distinct year/continent lists are derived
//! in the same pass and never change afterwards.

use crate::constants::{
    COL_CONTINENT, COL_COUNTRY, COL_GDP_PERCAP, COL_LIFE_EXP, COL_POP, COL_YEAR,
    SCHEMA_INFER_ROWS,
};
use crate::data::aggregate::aggregate;
use crate::data::error::{DataError, DataResult};
use crate::types::{AggregatedRecord, Record};
use once_cell::sync::OnceCell;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Process-wide dataset, installed once by the binary
static DATASET: OnceCell<Dataset> = OnceCell::new();

/// The immutable in-memory relation plus its derived tables
#[derive(Debug)]
pub struct Dataset {
    records: Vec<Record>,
    aggregated: Vec<AggregatedRecord>,
    years: Vec<i64>,
    continents: Vec<String>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Load a CSV file. Columns are located by header name.
    pub fn load(path: &Path) -> DataResult<Self> {
        let start = std::time::Instant::now();

        if !path.exists() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(SCHEMA_INFER_ROWS))
            .finish()?
            .collect()?;

        let records = records_from_frame(&df)?;
        let mut dataset = Self::from_records(records)?;
        dataset.source = Some(path.to_path_buf());

        tracing::info!(
            "Loaded {} with {} rows ({} countries-years, {} continents) in {:?}",
            path.display(),
            dataset.records.len(),
            dataset.aggregated.len(),
            dataset.continents.len(),
            start.elapsed()
        );

        Ok(dataset)
    }

    /// Build a dataset from already-parsed records
    pub fn from_records(records: Vec<Record>) -> DataResult<Self> {
        if records.is_empty() {
            return Err(DataError::EmptyFile);
        }

        let aggregated = aggregate(&records);

        let mut years: Vec<i64> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        let mut continents: Vec<String> = Vec::new();
        for record in &records {
            if !continents.contains(&record.continent) {
                continents.push(record.continent.clone());
            }
        }

        Ok(Self {
            records,
            aggregated,
            years,
            continents,
            source: None,
        })
    }

    /// Raw relation in source row order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Aggregated relation, sorted by (country, year)
    pub fn aggregated(&self) -> &[AggregatedRecord] {
        &self.aggregated
    }

    /// Distinct years, ascending
    pub fn distinct_years(&self) -> &[i64] {
        &self.years
    }

    /// Distinct continents in order of first appearance
    pub fn distinct_continents(&self) -> &[String] {
        &self.continents
    }

    pub fn has_continent(&self, continent: &str) -> bool {
        self.continents.iter().any(|c| c == continent)
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// File the dataset was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Install the process-wide dataset. Fails if one is already installed.
pub fn install(dataset: Dataset) -> DataResult<&'static Dataset> {
    DATASET
        .set(dataset)
        .map_err(|_| DataError::AlreadyInstalled)?;
    DATASET.get().ok_or(DataError::AlreadyInstalled)
}

/// Convert the collected frame into typed records, row by row
fn records_from_frame(df: &DataFrame) -> DataResult<Vec<Record>> {
    let country = required_column(df, COL_COUNTRY)?;
    let continent = required_column(df, COL_CONTINENT)?;
    let year = required_column(df, COL_YEAR)?;
    let pop = required_column(df, COL_POP)?;
    let life_exp = required_column(df, COL_LIFE_EXP)?;
    let gdp = required_column(df, COL_GDP_PERCAP)?;

    if df.height() == 0 {
        return Err(DataError::EmptyFile);
    }

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        records.push(Record {
            country: text_at(country, row, COL_COUNTRY)?,
            continent: text_at(continent, row, COL_CONTINENT)?,
            year: year_at(year, row)?,
            population: number_at(pop, row, COL_POP)?,
            life_expectancy: number_at(life_exp, row, COL_LIFE_EXP)?,
            gdp_per_capita: number_at(gdp, row, COL_GDP_PERCAP)?,
        });
    }

    Ok(records)
}

fn required_column<'a>(df: &'a DataFrame, name: &'static str) -> DataResult<&'a Column> {
    df.column(name).map_err(|_| DataError::MissingColumn(name))
}

fn cell<'a>(column: &'a Column, row: usize, name: &'static str) -> DataResult<AnyValue<'a>> {
    column.get(row).map_err(|e| DataError::InvalidValue {
        row,
        column: name,
        reason: e.to_string(),
    })
}

fn text_at(column: &Column, row: usize, name: &'static str) -> DataResult<String> {
    match cell(column, row, name)? {
        AnyValue::String(s) => Ok(s.to_string()),
        AnyValue::StringOwned(s) => {
            let s_str: &str = &s;
            Ok(s_str.to_string())
        }
        AnyValue::Null => Err(DataError::InvalidValue {
            row,
            column: name,
            reason: "missing value".to_string(),
        }),
        other => Ok(format!("{}", other)),
    }
}

fn number_at(column: &Column, row: usize, name: &'static str) -> DataResult<f64> {
    let value = cell(column, row, name)?;
    any_to_f64(&value).ok_or_else(|| DataError::InvalidValue {
        row,
        column: name,
        reason: format!("expected a number, found {}", value),
    })
}

fn year_at(column: &Column, row: usize) -> DataResult<i64> {
    let value = cell(column, row, COL_YEAR)?;
    match any_to_f64(&value) {
        Some(y) if y.fract() == 0.0 => Ok(y as i64),
        _ => Err(DataError::InvalidValue {
            row,
            column: COL_YEAR,
            reason: format!("expected an integer year, found {}", value),
        }),
    }
}

/// Numeric view of a polars cell
fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(*v as f64),
        AnyValue::Int16(v) => Some(*v as f64),
        AnyValue::Int32(v) => Some(*v as f64),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(*v as f64),
        AnyValue::UInt16(v) => Some(*v as f64),
        AnyValue::UInt32(v) => Some(*v as f64),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(*v as f64),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
