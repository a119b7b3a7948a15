//! View payloads handed to the rendering layer.
//!
//! This module turns query results into serializable payloads: dropdown
//! options, summary panels, the line chart specification and the table.
//! Formatting happens here rather than in the page so every client renders
//! the same text.

use crate::constants::TABLE_COLUMNS;
use crate::dashboard::state::ControlState;
use crate::data::Dataset;
use crate::types::{AggregatedRecord, Measure, Observation, Record, YearRange};
use serde::{Deserialize, Serialize};

/// A selectable `{label, value}` entry for dropdowns and radio groups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn same(value: &str) -> Self {
        Self {
            label: value.to_string(),
            value: value.to_string(),
        }
    }
}

/// One labeled line of a summary panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

/// Top-country summary for one measure. No title and no lines means no data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryPanel {
    pub measure: Measure,
    pub title: Option<String>,
    pub lines: Vec<SummaryLine>,
}

impl SummaryPanel {
    pub fn empty(measure: Measure) -> Self {
        Self {
            measure,
            title: None,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Line chart specification for one measure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub series_label: String,
    pub color: String,
    pub x: Vec<i64>,
    pub y: Vec<f64>,
    /// Per-point label format in the chart library's template syntax
    pub text_template: String,
    pub hover_text: Vec<String>,
    pub x_axis_title: String,
    pub y_axis_title: String,
}

/// Column header of the table view
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    pub id: String,
}

/// One table row, keyed by the source column names
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub country: String,
    pub year: i64,
    pub pop: f64,
    pub continent: String,
    #[serde(rename = "lifeExp")]
    pub life_exp: f64,
    #[serde(rename = "gdpPercap")]
    pub gdp_percap: f64,
}

impl From<&Record> for TableRow {
    fn from(record: &Record) -> Self {
        Self {
            country: record.country.clone(),
            year: record.year,
            pop: record.population,
            continent: record.continent.clone(),
            life_exp: record.life_expectancy,
            gdp_percap: record.gdp_per_capita,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TablePayload {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

/// Year range slider bounds, marks and current value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearSlider {
    pub min: i64,
    pub max: i64,
    pub marks: Vec<i64>,
    pub value: YearRange,
}

/// Static controls sent once per session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub continent_options: Vec<SelectOption>,
    pub measure_options: Vec<SelectOption>,
    pub years: YearSlider,
}

// ============================================================================
// Builders
// ============================================================================

pub fn continent_options(dataset: &Dataset) -> Vec<SelectOption> {
    dataset
        .distinct_continents()
        .iter()
        .map(|c| SelectOption::same(c))
        .collect()
}

pub fn country_select_options(countries: &[String]) -> Vec<SelectOption> {
    countries.iter().map(|c| SelectOption::same(c)).collect()
}

pub fn measure_options() -> Vec<SelectOption> {
    Measure::radio_order()
        .iter()
        .map(|m| SelectOption {
            label: m.label().to_string(),
            value: m.value().to_string(),
        })
        .collect()
}

pub fn year_slider(dataset: &Dataset, value: YearRange) -> YearSlider {
    let marks = dataset.distinct_years().to_vec();
    YearSlider {
        min: marks.first().copied().unwrap_or(value.min),
        max: marks.last().copied().unwrap_or(value.max),
        marks,
        value,
    }
}

/// Summary panel for the top row of `measure`, or an empty panel
pub fn summary_panel(top: Option<&AggregatedRecord>, measure: Measure) -> SummaryPanel {
    let Some(row) = top else {
        return SummaryPanel::empty(measure);
    };

    SummaryPanel {
        measure,
        title: Some(format!(
            "Top country by {} in {}",
            measure.title_name(),
            row.continent
        )),
        lines: vec![
            SummaryLine {
                label: "Year".to_string(),
                value: row.year.to_string(),
            },
            SummaryLine {
                label: "Country".to_string(),
                value: row.country.clone(),
            },
            SummaryLine {
                label: measure.label().to_string(),
                value: format_thousands(row.measure(measure), 0),
            },
        ],
    }
}

/// Chart for the series of the selected country. An empty series yields a
/// chart with no points.
pub fn chart_spec(series: &[(i64, f64)], state: &ControlState) -> ChartSpec {
    let measure = state.measure;
    let country = state.country.as_deref().unwrap_or_default();

    let hover_text = series
        .iter()
        .map(|(year, value)| {
            format!(
                "<b>Country</b>: {}<br><b>Year</b>: {}<br><b>Continent</b>: {}<br><b>{}</b>: {}<br>",
                country,
                year,
                state.continent,
                measure.label(),
                format_thousands(*value, hover_decimals(measure)),
            )
        })
        .collect();

    ChartSpec {
        title: format!(
            "{} {} to {}",
            measure.chart_title(),
            state.year_min,
            state.year_max
        ),
        series_label: measure.label().to_string(),
        color: measure.color().to_string(),
        x: series.iter().map(|(year, _)| *year).collect(),
        y: series.iter().map(|(_, value)| *value).collect(),
        text_template: text_template(measure).to_string(),
        hover_text,
        x_axis_title: "Years".to_string(),
        y_axis_title: measure.label().to_string(),
    }
}

pub fn table_payload(rows: &[&Record]) -> TablePayload {
    TablePayload {
        columns: TABLE_COLUMNS
            .iter()
            .map(|name| TableColumn {
                name: name.to_string(),
                id: name.to_string(),
            })
            .collect(),
        rows: rows.iter().map(|r| TableRow::from(*r)).collect(),
    }
}

fn text_template(measure: Measure) -> &'static str {
    match measure {
        Measure::LifeExpectancy => "%{text:.0f}",
        Measure::Population => "%{text:,.2s}",
        Measure::GdpPerCapita => "%{text:,.0f}",
    }
}

fn hover_decimals(measure: Measure) -> usize {
    match measure {
        Measure::LifeExpectancy => 3,
        Measure::Population => 0,
        Measure::GdpPerCapita => 6,
    }
}

// ============================================================================
// Number Formatting
// ============================================================================

/// Format with a fixed number of decimals and comma thousands separators
/// (e.g. `1234567.891, 2` -> `"1,234,567.89"`).
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative =
        value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
