//! Core types for the country dashboard.
//!
//! This module defines the record types of the raw and aggregated relations,
//! the selectable measures, and the year range used by every filter.

use crate::constants::{GDP_COLOR, LIFE_EXP_COLOR, POPULATION_COLOR};
use serde::{Deserialize, Serialize};

// ============================================================================
// Records
// ============================================================================

/// One row of the raw relation, as loaded from the source table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub continent: String,
    pub year: i64,
    pub population: f64,
    pub life_expectancy: f64,
    pub gdp_per_capita: f64,
}

impl Record {
    pub fn new(
        country: impl Into<String>,
        continent: impl Into<String>,
        year: i64,
        population: f64,
        life_expectancy: f64,
        gdp_per_capita: f64,
    ) -> Self {
        Self {
            country: country.into(),
            continent: continent.into(),
            year,
            population,
            life_expectancy,
            gdp_per_capita,
        }
    }
}

/// One row per unique (country, year, continent) with the measures summed
/// over every raw row sharing that key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub country: String,
    pub continent: String,
    pub year: i64,
    pub population: f64,
    pub life_expectancy: f64,
    pub gdp_per_capita: f64,
}

/// Read access shared by raw and aggregated rows, so filters and the
/// aggregation engine work over either relation.
pub trait Observation {
    fn country(&self) -> &str;
    fn continent(&self) -> &str;
    fn year(&self) -> i64;
    fn measure(&self, measure: Measure) -> f64;
}

impl Observation for Record {
    fn country(&self) -> &str {
        &self.country
    }

    fn continent(&self) -> &str {
        &self.continent
    }

    fn year(&self) -> i64 {
        self.year
    }

    fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Population => self.population,
            Measure::LifeExpectancy => self.life_expectancy,
            Measure::GdpPerCapita => self.gdp_per_capita,
        }
    }
}

impl Observation for AggregatedRecord {
    fn country(&self) -> &str {
        &self.country
    }

    fn continent(&self) -> &str {
        &self.continent
    }

    fn year(&self) -> i64 {
        self.year
    }

    fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Population => self.population,
            Measure::LifeExpectancy => self.life_expectancy,
            Measure::GdpPerCapita => self.gdp_per_capita,
        }
    }
}

// ============================================================================
// Measures
// ============================================================================

/// Numeric quantity selectable for charting and ranking
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Population,
    #[default]
    LifeExpectancy,
    #[serde(alias = "gdp_Per_cap")]
    GdpPerCapita,
}

impl Measure {
    /// Label used on radio options, summary lines and axis titles
    pub fn label(&self) -> &'static str {
        match self {
            Measure::Population => "Population",
            Measure::LifeExpectancy => "Life Expectancy",
            Measure::GdpPerCapita => "gdpPercap",
        }
    }

    /// Wire value (matches the serde representation)
    pub fn value(&self) -> &'static str {
        match self {
            Measure::Population => "population",
            Measure::LifeExpectancy => "life_expectancy",
            Measure::GdpPerCapita => "gdp_per_capita",
        }
    }

    /// Lower-case name used inside summary panel titles
    pub fn title_name(&self) -> &'static str {
        match self {
            Measure::Population => "population",
            Measure::LifeExpectancy => "life expectancy",
            Measure::GdpPerCapita => "gdpPercap",
        }
    }

    /// Name used at the start of chart titles
    pub fn chart_title(&self) -> &'static str {
        match self {
            Measure::Population => "Population",
            Measure::LifeExpectancy => "Life expectancy",
            Measure::GdpPerCapita => "gdpPercap",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Measure::Population => POPULATION_COLOR,
            Measure::LifeExpectancy => LIFE_EXP_COLOR,
            Measure::GdpPerCapita => GDP_COLOR,
        }
    }

    /// Order of the summary panels
    pub fn all() -> &'static [Measure] {
        &[
            Measure::Population,
            Measure::LifeExpectancy,
            Measure::GdpPerCapita,
        ]
    }

    /// Order of the measure radio options
    pub fn radio_order() -> &'static [Measure] {
        &[
            Measure::LifeExpectancy,
            Measure::Population,
            Measure::GdpPerCapita,
        ]
    }
}

// ============================================================================
// Year Range
// ============================================================================

/// Inclusive year interval
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i64,
    pub max: i64,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive reversed
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, year: i64) -> bool {
        self.min <= year && year <= self.max
    }

    /// Initial slider value: the 4th-smallest and 2nd-largest distinct year.
    ///
    /// `years` must be ascending. Short year lists clamp the indices, and a
    /// clamp that would cross the bounds falls back to the full span.
    pub fn initial(years: &[i64]) -> Option<Self> {
        use crate::constants::{INITIAL_YEAR_MAX_FROM_END, INITIAL_YEAR_MIN_INDEX};

        let first = *years.first()?;
        let last = *years.last()?;
        let lo_idx = INITIAL_YEAR_MIN_INDEX.min(years.len() - 1);
        let hi_idx = years.len().saturating_sub(INITIAL_YEAR_MAX_FROM_END);
        if lo_idx > hi_idx {
            return Some(Self {
                min: first,
                max: last,
            });
        }
        Some(Self {
            min: years[lo_idx],
            max: years[hi_idx],
        })
    }
}
