//! Country-year dashboard: loads a demographic/economic table once, derives
//! summary, chart and table views from per-session control state, and serves
//! them to a browser page over a local HTTP API.

pub mod constants;
pub mod dashboard;
pub mod data;
pub mod server;
pub mod settings;
pub mod types;
