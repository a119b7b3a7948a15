//! Unit tests for loading the source table.

use crate::helpers::{bundled_data_path, bundled_dataset};
use countryboard::data::{DataError, Dataset};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_csv_with_reordered_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        "continent,country,year,gdpPercap,lifeExp,pop\n\
         Asia,Afghanistan,1952,779.4453145,28.801,8425333\n\
         Asia,Afghanistan,1957,820.8530296,30.332,9240934\n\
         Europe,Albania,1952,1601.056136,55.23,1282697\n",
    )
    .unwrap();

    let dataset = Dataset::load(&path).unwrap();

    assert_eq!(dataset.row_count(), 3);
    assert_eq!(dataset.distinct_years(), &[1952, 1957]);
    assert_eq!(dataset.distinct_continents(), &["Asia", "Europe"]);
    assert_eq!(dataset.source(), Some(path.as_path()));

    let first = &dataset.records()[0];
    assert_eq!(first.country, "Afghanistan");
    assert_eq!(first.year, 1952);
    assert_eq!(first.population, 8425333.0);
    assert_eq!(first.life_expectancy, 28.801);
    assert_eq!(first.gdp_per_capita, 779.4453145);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let result = Dataset::load(&dir.path().join("absent.csv"));
    assert!(matches!(result, Err(DataError::NotFound(_))));
}

#[test]
fn test_missing_column_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        "country,year,pop,continent,lifeExp\nAfghanistan,1952,8425333,Asia,28.801\n",
    )
    .unwrap();

    let result = Dataset::load(&path);
    assert!(matches!(result, Err(DataError::MissingColumn("gdpPercap"))));
}

#[test]
fn test_header_only_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, "country,year,pop,continent,lifeExp,gdpPercap\n").unwrap();

    assert!(Dataset::load(&path).is_err());
}

fn load_rows(rows: &str) -> Result<Dataset, DataError> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        format!("country,year,pop,continent,lifeExp,gdpPercap\n{}", rows),
    )
    .unwrap();
    Dataset::load(&path)
}

#[test]
fn test_non_numeric_measure_is_invalid() {
    let result = load_rows("A,1952,abc,Asia,1.0,2.0\n");
    assert!(matches!(
        result,
        Err(DataError::InvalidValue {
            row: 0,
            column: "pop",
            ..
        })
    ));
}

#[test]
fn test_fractional_year_is_invalid() {
    let result = load_rows("A,1952,10,Asia,1.0,2.0\nB,1952.5,20,Asia,1.0,2.0\n");
    assert!(matches!(
        result,
        Err(DataError::InvalidValue {
            row: 1,
            column: "year",
            ..
        })
    ));
}

#[test]
fn test_empty_measure_cell_is_invalid() {
    let result = load_rows("A,1952,10,Asia,1.0,2.0\nB,1957,,Asia,1.0,2.0\n");
    assert!(matches!(
        result,
        Err(DataError::InvalidValue {
            row: 1,
            column: "pop",
            ..
        })
    ));
}

#[test]
fn test_bundled_dataset_loads() {
    let dataset = bundled_dataset();

    assert_eq!(dataset.source(), Some(bundled_data_path().as_path()));
    assert_eq!(dataset.row_count(), 132);
    assert_eq!(dataset.distinct_years().len(), 12);
    assert_eq!(dataset.distinct_years()[0], 1952);
    assert_eq!(
        dataset.distinct_continents(),
        &["Asia", "Europe", "Africa", "Americas", "Oceania"]
    );
    // Keys are already unique, so aggregation keeps every row
    assert_eq!(dataset.aggregated().len(), dataset.row_count());
}

#[test]
fn test_bundled_dataset_multi_word_country() {
    let dataset = bundled_dataset();
    assert!(
        dataset
            .records()
            .iter()
            .any(|r| r.country == "New Zealand" && r.continent == "Oceania")
    );
}
