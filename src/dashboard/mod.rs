//! Dashboard module - per-session control state and view recomputation.
//!
//! This module is organized into several submodules:
//! - `state` - ControlState, user events and the view dependency table
//! - `controller` - applies events and renders the invalidated views
//! - `views` - serializable payloads for the rendering layer

mod controller;
mod state;
pub mod views;

pub use controller::{Controller, ViewUpdate};
pub use state::{ControlState, Event, View, ViewSet};
pub use views::{
    ChartSpec, Layout, SelectOption, SummaryLine, SummaryPanel, TableColumn, TablePayload,
    TableRow, YearSlider,
};
