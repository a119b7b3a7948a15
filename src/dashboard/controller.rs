//! Reactive controller - applies user events to the control state and
//! recomputes exactly the views those events invalidate.

use crate::constants::DEFAULT_CONTINENT;
use crate::dashboard::state::{ControlState, Event, View, ViewSet};
use crate::dashboard::views::{
    self, ChartSpec, Layout, SelectOption, SummaryPanel, TablePayload,
};
use crate::data::{
    Dataset, SelectionError, country_options_for, default_country_for, filter_rows, series_for,
    top_by,
};
use crate::types::{Measure, YearRange};
use serde::Serialize;

/// Recomputed views after an event. Views that were not invalidated are
/// left out of the payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewUpdate {
    pub state: ControlState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_options: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Vec<SummaryPanel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TablePayload>,
}

impl ViewUpdate {
    /// Views present in this update
    pub fn views(&self) -> ViewSet {
        let mut views = ViewSet::new();
        if self.country_options.is_some() {
            views.insert(View::CountryOptions);
        }
        if self.summaries.is_some() {
            views.insert(View::Summaries);
        }
        if self.chart.is_some() {
            views.insert(View::Chart);
        }
        if self.table.is_some() {
            views.insert(View::Table);
        }
        views
    }
}

/// Per-session controller over the shared, immutable dataset
#[derive(Debug)]
pub struct Controller<'a> {
    dataset: &'a Dataset,
    state: ControlState,
    country_options: Vec<String>,
}

impl<'a> Controller<'a> {
    /// Start a session on `continent` with the initial year range, the
    /// default measure and the continent's first country.
    pub fn new(dataset: &'a Dataset, continent: &str) -> Self {
        let years = YearRange::initial(dataset.distinct_years()).unwrap_or(YearRange {
            min: 0,
            max: 0,
        });

        let mut controller = Self {
            dataset,
            state: ControlState {
                continent: continent.to_string(),
                country: None,
                year_min: years.min,
                year_max: years.max,
                measure: Measure::default(),
            },
            country_options: Vec::new(),
        };
        controller.resolve_country_options();
        controller
    }

    /// Controller on the default continent, falling back to the first
    /// continent present in the dataset.
    pub fn with_defaults(dataset: &'a Dataset) -> Self {
        let continent = if dataset.has_continent(DEFAULT_CONTINENT) {
            DEFAULT_CONTINENT
        } else {
            dataset
                .distinct_continents()
                .first()
                .map(String::as_str)
                .unwrap_or(DEFAULT_CONTINENT)
        };
        Self::new(dataset, continent)
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn country_options(&self) -> &[String] {
        &self.country_options
    }

    /// Apply an event to the control state.
    ///
    /// Returns the invalidated views. Invalid selections leave the state
    /// unchanged and return an error.
    pub fn apply(&mut self, event: &Event) -> Result<ViewSet, SelectionError> {
        match event {
            Event::SelectContinent { continent } => {
                self.state.continent = continent.clone();
                self.resolve_country_options();
            }
            Event::SelectCountry { country } => {
                if !self.country_options.iter().any(|c| c == country) {
                    return Err(SelectionError::InvalidCountry {
                        country: country.clone(),
                        continent: self.state.continent.clone(),
                    });
                }
                self.state.country = Some(country.clone());
            }
            Event::SelectYearRange { min, max } => {
                let years = self.dataset.distinct_years();
                for year in [min, max] {
                    if !years.contains(year) {
                        return Err(SelectionError::InvalidYear(*year));
                    }
                }
                let range = YearRange::new(*min, *max);
                self.state.year_min = range.min;
                self.state.year_max = range.max;
            }
            Event::SelectMeasure { measure } => {
                self.state.measure = *measure;
            }
        }

        Ok(event.invalidates())
    }

    /// Apply an event and recompute the views it invalidates. Rejected events
    /// produce an update with no views.
    pub fn handle(&mut self, event: &Event) -> ViewUpdate {
        match self.apply(event) {
            Ok(views) => {
                tracing::debug!(?event, ?views, "Applied event");
                self.render(&views)
            }
            Err(e) => {
                tracing::debug!("Ignored event {:?}: {}", event, e);
                self.render(&ViewSet::new())
            }
        }
    }

    /// Render every view
    pub fn render_all(&self) -> ViewUpdate {
        self.render(&View::all().iter().copied().collect())
    }

    /// Render the requested views from the current state
    pub fn render(&self, views: &ViewSet) -> ViewUpdate {
        ViewUpdate {
            state: self.state.clone(),
            country_options: views
                .contains(&View::CountryOptions)
                .then(|| views::country_select_options(&self.country_options)),
            summaries: views.contains(&View::Summaries).then(|| self.summaries()),
            chart: views.contains(&View::Chart).then(|| self.chart()),
            table: views.contains(&View::Table).then(|| self.table()),
        }
    }

    /// Static controls for a new session
    pub fn layout(&self) -> Layout {
        Layout {
            continent_options: views::continent_options(self.dataset),
            measure_options: views::measure_options(),
            years: views::year_slider(self.dataset, self.state.years()),
        }
    }

    pub fn summaries(&self) -> Vec<SummaryPanel> {
        let agg = self.dataset.aggregated();
        Measure::all()
            .iter()
            .map(|&measure| {
                let top = top_by(agg, &self.state.continent, self.state.years(), measure);
                views::summary_panel(top, measure)
            })
            .collect()
    }

    pub fn chart(&self) -> ChartSpec {
        let series = match &self.state.country {
            Some(country) => series_for(
                self.dataset.aggregated(),
                &self.state.continent,
                country,
                self.state.years(),
                self.state.measure,
            ),
            None => Vec::new(),
        };
        views::chart_spec(&series, &self.state)
    }

    pub fn table(&self) -> TablePayload {
        let rows = match &self.state.country {
            Some(country) => filter_rows(
                self.dataset.records(),
                &self.state.continent,
                country,
                self.state.years(),
            ),
            None => Vec::new(),
        };
        views::table_payload(&rows)
    }

    /// Recompute the continent's country options and reset the country to
    /// the first of them.
    fn resolve_country_options(&mut self) {
        self.country_options = country_options_for(self.dataset.records(), &self.state.continent);
        self.state.country = match default_country_for(&self.country_options, &self.state.continent)
        {
            Ok(country) => Some(country.to_string()),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        };
    }
}
