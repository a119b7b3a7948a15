//! Filter, selection and series queries over the loaded relations.
//!
//! Every query is a pure function of its inputs. Empty results are valid
//! values: callers render empty views instead of failing.

use crate::data::error::SelectionError;
use crate::types::{AggregatedRecord, Measure, Observation, Record, YearRange};

/// Typed row predicate: continent match, optional country match, and
/// inclusive year range, joined by conjunction.
#[derive(Clone, Copy, Debug)]
pub struct RowFilter<'a> {
    pub continent: &'a str,
    pub country: Option<&'a str>,
    pub years: YearRange,
}

impl<'a> RowFilter<'a> {
    pub fn new(continent: &'a str, years: YearRange) -> Self {
        Self {
            continent,
            country: None,
            years,
        }
    }

    pub fn with_country(mut self, country: &'a str) -> Self {
        self.country = Some(country);
        self
    }

    pub fn matches<R: Observation>(&self, row: &R) -> bool {
        row.continent() == self.continent
            && self.country.is_none_or(|c| row.country() == c)
            && self.years.contains(row.year())
    }
}

/// Distinct countries of `continent`, in order of first appearance in `raw`.
pub fn country_options_for(raw: &[Record], continent: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for record in raw.iter().filter(|r| r.continent == continent) {
        if !options.iter().any(|c| c == &record.country) {
            options.push(record.country.clone());
        }
    }
    options
}

/// First option, or `EmptySelection` when there are none.
pub fn default_country_for<'o>(
    options: &'o [String],
    continent: &str,
) -> Result<&'o str, SelectionError> {
    options
        .first()
        .map(String::as_str)
        .ok_or_else(|| SelectionError::EmptySelection {
            continent: continent.to_string(),
        })
}

/// Row of `agg` with the largest `measure` among rows of `continent` within
/// `years`.
///
/// Ties resolve to the first row in the aggregated order, (country, year)
/// ascending. NaN values never win. `None` means nothing matched.
pub fn top_by<'a>(
    agg: &'a [AggregatedRecord],
    continent: &str,
    years: YearRange,
    measure: Measure,
) -> Option<&'a AggregatedRecord> {
    let filter = RowFilter::new(continent, years);
    let mut best: Option<&AggregatedRecord> = None;

    for row in agg.iter().filter(|r| filter.matches(*r)) {
        let value = row.measure(measure);
        if value.is_nan() {
            continue;
        }
        match best {
            Some(current) if value <= current.measure(measure) => {}
            _ => best = Some(row),
        }
    }

    best
}

/// Time series of `measure` for one country, ordered by year ascending.
pub fn series_for(
    agg: &[AggregatedRecord],
    continent: &str,
    country: &str,
    years: YearRange,
    measure: Measure,
) -> Vec<(i64, f64)> {
    let filter = RowFilter::new(continent, years).with_country(country);
    let mut series: Vec<(i64, f64)> = agg
        .iter()
        .filter(|r| filter.matches(*r))
        .map(|r| (r.year, r.measure(measure)))
        .collect();
    series.sort_by_key(|(year, _)| *year);
    series
}

/// Raw rows for the table view, preserving the raw relation's order.
pub fn filter_rows<'a>(
    raw: &'a [Record],
    continent: &str,
    country: &str,
    years: YearRange,
) -> Vec<&'a Record> {
    let filter = RowFilter::new(continent, years).with_country(country);
    raw.iter().filter(|r| filter.matches(*r)).collect()
}
