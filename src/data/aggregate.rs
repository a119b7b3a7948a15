//! Aggregation engine
//!
//! Groups a relation by (country, year, continent) and sums the three
//! measures. Grouping happens here rather than in the view builders so the
//! aggregated relation can be computed once at load time.

use crate::types::{AggregatedRecord, Measure, Observation};
use std::collections::BTreeMap;

/// Running sums for one (country, year, continent) group
#[derive(Default)]
struct Sums {
    population: f64,
    life_expectancy: f64,
    gdp_per_capita: f64,
}

/// Group `rows` by (country, year, continent) and sum each measure.
///
/// Output is sorted by (country, year) ascending, with continent breaking any
/// remaining tie, so the result is deterministic for a fixed input. Input
/// whose keys are already unique comes back with the same values.
pub fn aggregate<R: Observation>(rows: &[R]) -> Vec<AggregatedRecord> {
    let mut groups: BTreeMap<(&str, i64, &str), Sums> = BTreeMap::new();

    for row in rows {
        let sums = groups
            .entry((row.country(), row.year(), row.continent()))
            .or_default();
        sums.population += row.measure(Measure::Population);
        sums.life_expectancy += row.measure(Measure::LifeExpectancy);
        sums.gdp_per_capita += row.measure(Measure::GdpPerCapita);
    }

    groups
        .into_iter()
        .map(|((country, year, continent), sums)| AggregatedRecord {
            country: country.to_string(),
            continent: continent.to_string(),
            year,
            population: sums.population,
            life_expectancy: sums.life_expectancy,
            gdp_per_capita: sums.gdp_per_capita,
        })
        .collect()
}
