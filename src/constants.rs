//! Application-wide constants.
//!
//! Centralizes defaults and presentation values so the dashboard pieces
//! agree on them.

// ============================================================================
// Data Loading
// ============================================================================

/// Dataset location used when no setting overrides it (relative to the working directory)
pub const DEFAULT_DATA_PATH: &str = "data/gapminderDataFiveYear.csv";

/// Number of rows polars samples when inferring column types
pub const SCHEMA_INFER_ROWS: usize = 1000;

/// Source column holding the country name
pub const COL_COUNTRY: &str = "country";
/// Source column holding the continent name
pub const COL_CONTINENT: &str = "continent";
/// Source column holding the observation year
pub const COL_YEAR: &str = "year";
/// Source column holding the population
pub const COL_POP: &str = "pop";
/// Source column holding the life expectancy
pub const COL_LIFE_EXP: &str = "lifeExp";
/// Source column holding the GDP per capita
pub const COL_GDP_PERCAP: &str = "gdpPercap";

/// Column order of the table view
pub const TABLE_COLUMNS: [&str; 6] = [
    COL_COUNTRY,
    COL_YEAR,
    COL_POP,
    COL_CONTINENT,
    COL_LIFE_EXP,
    COL_GDP_PERCAP,
];

// ============================================================================
// Control Defaults
// ============================================================================

/// Continent selected when a session starts
pub const DEFAULT_CONTINENT: &str = "Asia";

/// Index (into the ascending distinct years) of the initial lower year bound
pub const INITIAL_YEAR_MIN_INDEX: usize = 3;

/// Offset from the end of the distinct years of the initial upper year bound
pub const INITIAL_YEAR_MAX_FROM_END: usize = 2;

// ============================================================================
// Server
// ============================================================================

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8050";

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "countryboard=info";

/// How long the accept loop waits before re-checking the shutdown flag
pub const ACCEPT_POLL_MS: u64 = 100;

/// Live sessions kept before the least recently used one is evicted
pub const MAX_SESSIONS: usize = 256;

/// Largest request body the API will read
pub const MAX_REQUEST_BODY_BYTES: u64 = 64 * 1024;

// ============================================================================
// Colors (hex values)
// ============================================================================

/// Line color for the life expectancy chart
pub const LIFE_EXP_COLOR: &str = "#38D56F";

/// Line color for the population chart
pub const POPULATION_COLOR: &str = "#9A38D5";

/// Line color for the GDP per capita chart
pub const GDP_COLOR: &str = "#FFA07A";
