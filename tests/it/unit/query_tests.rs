//! Unit tests for country options, top-by selection, series and row filters.

use crate::helpers::{SURVEY_YEARS, TestDatasetBuilder, bundled_dataset, sample_dataset};
use countryboard::data::{
    RowFilter, country_options_for, default_country_for, filter_rows, series_for, top_by,
};
use countryboard::types::{Measure, Observation, YearRange};
use std::collections::BTreeSet;

// ============================================================================
// Country Options
// ============================================================================

#[test]
fn test_country_options_match_observed_countries() {
    let dataset = sample_dataset();
    for continent in dataset.distinct_continents() {
        let options = country_options_for(dataset.records(), continent);

        let observed: BTreeSet<&str> = dataset
            .records()
            .iter()
            .filter(|r| &r.continent == continent)
            .map(|r| r.country.as_str())
            .collect();
        let offered: BTreeSet<&str> = options.iter().map(String::as_str).collect();

        assert_eq!(offered, observed);
        assert_eq!(offered.len(), options.len(), "options must be distinct");
    }
}

#[test]
fn test_default_country_is_first_in_row_order() {
    let dataset = sample_dataset();
    let options = country_options_for(dataset.records(), "Asia");
    assert_eq!(options, vec!["Afghanistan", "Bahrain", "Bangladesh"]);
    assert_eq!(default_country_for(&options, "Asia"), Ok("Afghanistan"));
}

#[test]
fn test_unknown_continent_has_no_options() {
    let dataset = sample_dataset();
    let options = country_options_for(dataset.records(), "Antarctica");
    assert!(options.is_empty());
    assert!(default_country_for(&options, "Antarctica").is_err());
}

// ============================================================================
// Top-By
// ============================================================================

#[test]
fn test_top_by_returns_maximum_in_range() {
    let dataset = sample_dataset();
    let agg = dataset.aggregated();

    for measure in Measure::all() {
        for (lo, hi) in [(1952, 2007), (1967, 2002), (1977, 1977)] {
            let years = YearRange::new(lo, hi);
            let top = top_by(agg, "Asia", years, *measure).expect("Asia has rows in range");

            assert_eq!(top.continent, "Asia");
            assert!(years.contains(top.year));
            let best = agg
                .iter()
                .filter(|r| r.continent == "Asia" && years.contains(r.year))
                .map(|r| r.measure(*measure))
                .fold(f64::MIN, f64::max);
            assert_eq!(top.measure(*measure), best);
        }
    }
}

#[test]
fn test_top_by_tie_resolves_to_first_country() {
    // Every Asian country has the same generated series, so each year ties
    let dataset = sample_dataset();
    let top = top_by(
        dataset.aggregated(),
        "Asia",
        YearRange::new(1952, 2007),
        Measure::Population,
    )
    .unwrap();
    assert_eq!(top.country, "Afghanistan");
    assert_eq!(top.year, 2007);
}

#[test]
fn test_top_by_not_found_outside_years() {
    let dataset = sample_dataset();
    let top = top_by(
        dataset.aggregated(),
        "Asia",
        YearRange::new(2010, 2020),
        Measure::GdpPerCapita,
    );
    assert!(top.is_none());
}

#[test]
fn test_top_by_bundled_asia_initial_range() {
    let dataset = bundled_dataset();
    let agg = dataset.aggregated();
    let years = YearRange::new(1967, 2002);

    let pop = top_by(agg, "Asia", years, Measure::Population).unwrap();
    assert_eq!((pop.country.as_str(), pop.year), ("Bangladesh", 2002));
    assert_eq!(pop.population, 135656790.0);

    let life = top_by(agg, "Asia", years, Measure::LifeExpectancy).unwrap();
    assert_eq!((life.country.as_str(), life.year), ("Bahrain", 2002));

    let gdp = top_by(agg, "Asia", years, Measure::GdpPerCapita).unwrap();
    assert_eq!((gdp.country.as_str(), gdp.year), ("Bahrain", 2002));
}

// ============================================================================
// Series
// ============================================================================

#[test]
fn test_series_sorted_and_within_range() {
    let dataset = sample_dataset();
    let years = YearRange::new(1962, 1992);
    let series = series_for(
        dataset.aggregated(),
        "Asia",
        "Bahrain",
        years,
        Measure::GdpPerCapita,
    );

    assert_eq!(series.len(), 7);
    assert!(series.windows(2).all(|w| w[0].0 < w[1].0));
    assert!(series.iter().all(|(year, _)| years.contains(*year)));
}

#[test]
fn test_series_afghanistan_life_expectancy() {
    let dataset = TestDatasetBuilder::new()
        .with_row("Afghanistan", "Asia", 1957, 9240934.0, 30.332, 820.8530)
        .with_row("Afghanistan", "Asia", 1952, 8425333.0, 28.801, 779.4453)
        .build();
    let series = series_for(
        dataset.aggregated(),
        "Asia",
        "Afghanistan",
        YearRange::new(1952, 1957),
        Measure::LifeExpectancy,
    );
    assert_eq!(series, vec![(1952, 28.801), (1957, 30.332)]);
}

#[test]
fn test_series_unknown_country_is_empty() {
    let dataset = sample_dataset();
    let series = series_for(
        dataset.aggregated(),
        "Asia",
        "Mars",
        YearRange::new(1952, 2007),
        Measure::Population,
    );
    assert!(series.is_empty());
}

// ============================================================================
// Row Filter
// ============================================================================

#[test]
fn test_filter_rows_matches_every_predicate() {
    let dataset = sample_dataset();
    let years = YearRange::new(1957, 1972);
    let rows = filter_rows(dataset.records(), "Europe", "Albania", years);

    let row_years: Vec<i64> = rows.iter().map(|r| r.year).collect();
    assert_eq!(row_years, vec![1957, 1962, 1967, 1972]);
    assert!(rows.iter().all(|r| r.country == "Albania" && r.continent == "Europe"));
}

#[test]
fn test_filter_rows_country_on_wrong_continent_is_empty() {
    let dataset = sample_dataset();
    let rows = filter_rows(
        dataset.records(),
        "Asia",
        "Albania",
        YearRange::new(SURVEY_YEARS[0], SURVEY_YEARS[11]),
    );
    assert!(rows.is_empty());
}

#[test]
fn test_filter_rows_excluding_all_years_is_empty() {
    let dataset = sample_dataset();
    let rows = filter_rows(
        dataset.records(),
        "Asia",
        "Afghanistan",
        YearRange::new(1900, 1950),
    );
    assert!(rows.is_empty());
}

#[test]
fn test_row_filter_without_country_matches_continent() {
    let dataset = sample_dataset();
    let filter = RowFilter::new("Oceania", YearRange::new(1952, 1952));
    let matched: Vec<&str> = dataset
        .records()
        .iter()
        .filter(|r| filter.matches(*r))
        .map(|r| r.country.as_str())
        .collect();
    assert_eq!(matched, vec!["Australia"]);
}
