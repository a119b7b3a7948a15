//! Data loading and query module
//!
//! This module owns the immutable dataset and the pure functions that derive
//! every dashboard view from it:
//! - `loader`: reads the source table once and caches the aggregated relation
//! - `aggregate`: groups by (country, year, continent) and sums measures
//! - `query`: country options, top-by selection, series extraction, row filter
//!
//! ## Error Handling
//!
//! Loading returns `DataResult<T>` with the `DataError` type; any error there
//! is fatal at startup. Selection problems surface as `SelectionError` and are
//! recoverable: the controller renders empty views instead.

mod aggregate;
mod error;
mod loader;
mod query;

pub use aggregate::*;
pub use error::*;
pub use loader::*;
pub use query::*;
