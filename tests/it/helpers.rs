//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestDatasetBuilder` - Builder pattern for creating test datasets
//! - `sample_dataset()` - A small fixed dataset over three continents
//! - `bundled_data_path()` - Path of the CSV shipped with the crate

use countryboard::data::Dataset;
use countryboard::types::Record;
use std::path::PathBuf;

// ============================================================================
// TestDatasetBuilder - Builder pattern for creating test datasets
// ============================================================================

/// Builder for creating test datasets row by row.
///
/// # Example
/// ```ignore
/// let dataset = TestDatasetBuilder::new()
///     .with_row("Afghanistan", "Asia", 1952, 8425333.0, 28.801, 779.4453145)
///     .with_country_series("Bahrain", "Asia", &[1952, 1957])
///     .build();
/// ```
#[derive(Default)]
pub struct TestDatasetBuilder {
    records: Vec<Record>,
}

impl TestDatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one raw row.
    pub fn with_row(
        mut self,
        country: &str,
        continent: &str,
        year: i64,
        population: f64,
        life_expectancy: f64,
        gdp_per_capita: f64,
    ) -> Self {
        self.records.push(Record::new(
            country,
            continent,
            year,
            population,
            life_expectancy,
            gdp_per_capita,
        ));
        self
    }

    /// Append one row per year with measures that grow with the year.
    pub fn with_country_series(mut self, country: &str, continent: &str, years: &[i64]) -> Self {
        for (i, year) in years.iter().enumerate() {
            let step = (i + 1) as f64;
            self.records.push(Record::new(
                country,
                continent,
                *year,
                1000.0 * step,
                40.0 + step,
                500.0 * step,
            ));
        }
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn build(self) -> Dataset {
        Dataset::from_records(self.records).expect("test dataset must not be empty")
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Years of the five-year survey
pub const SURVEY_YEARS: [i64; 12] = [
    1952, 1957, 1962, 1967, 1972, 1977, 1982, 1987, 1992, 1997, 2002, 2007,
];

/// Three Asian, one European and one Oceanian country across all survey years.
///
/// Asia rows appear in the order Afghanistan, Bahrain, Bangladesh.
pub fn sample_dataset() -> Dataset {
    TestDatasetBuilder::new()
        .with_country_series("Afghanistan", "Asia", &SURVEY_YEARS)
        .with_country_series("Albania", "Europe", &SURVEY_YEARS)
        .with_country_series("Bahrain", "Asia", &SURVEY_YEARS)
        .with_country_series("Bangladesh", "Asia", &SURVEY_YEARS)
        .with_country_series("Australia", "Oceania", &SURVEY_YEARS)
        .build()
}

/// The CSV shipped in `data/`
pub fn bundled_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("gapminderDataFiveYear.csv")
}

/// Load the bundled CSV
pub fn bundled_dataset() -> Dataset {
    Dataset::load(&bundled_data_path()).expect("bundled dataset must load")
}
