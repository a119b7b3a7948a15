//! Control state, user events and the views they invalidate.

use crate::types::{Measure, YearRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Current user-selected filter and view configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub continent: String,
    /// Unset only when the continent has no countries
    pub country: Option<String>,
    pub year_min: i64,
    pub year_max: i64,
    pub measure: Measure,
}

impl ControlState {
    pub fn years(&self) -> YearRange {
        YearRange {
            min: self.year_min,
            max: self.year_max,
        }
    }
}

/// Discrete user input events
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SelectContinent { continent: String },
    SelectCountry { country: String },
    SelectYearRange { min: i64, max: i64 },
    SelectMeasure { measure: Measure },
}

impl Event {
    /// Views whose inputs this event changes
    pub fn invalidates(&self) -> ViewSet {
        let views: &[View] = match self {
            Event::SelectContinent { .. } => &[
                View::CountryOptions,
                View::Summaries,
                View::Chart,
                View::Table,
            ],
            Event::SelectCountry { .. } => &[View::Chart, View::Table],
            Event::SelectYearRange { .. } => &[View::Summaries, View::Chart, View::Table],
            Event::SelectMeasure { .. } => &[View::Chart],
        };
        views.iter().copied().collect()
    }
}

/// A derived output of the dashboard
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Country dropdown options (and the country value they reset)
    CountryOptions,
    /// The three top-by summary panels
    Summaries,
    /// Line chart of the selected measure
    Chart,
    /// Raw-row table
    Table,
}

impl View {
    pub fn all() -> &'static [View] {
        &[View::CountryOptions, View::Summaries, View::Chart, View::Table]
    }
}

/// Set of views to recompute after an event
pub type ViewSet = BTreeSet<View>;
