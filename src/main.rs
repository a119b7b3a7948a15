use anyhow::{Context, Result};
use countryboard::data::{self, Dataset};
use countryboard::server::{Api, DashboardServer};
use countryboard::settings::{Settings, settings_path};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let loaded = match settings_path() {
        Some(path) => Settings::load_from(&path),
        None => Ok(Settings::default()),
    };
    let (settings, settings_error) = match loaded {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    let settings = settings.with_overrides(|key| std::env::var(key).ok());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(e) = settings_error {
        tracing::warn!("{}; using defaults", e);
    }

    let dataset = Dataset::load(&settings.data_path).with_context(|| {
        format!("failed to load dataset from {}", settings.data_path.display())
    })?;
    let dataset = data::install(dataset).context("failed to install dataset")?;

    let api = Api::new(dataset, settings.default_continent.clone());
    let server = DashboardServer::bind(&settings.bind_address)?;
    match server.local_addr() {
        Some(addr) => tracing::info!("Dashboard available at http://{}/", addr),
        None => tracing::info!("Dashboard listening on {}", settings.bind_address),
    }

    server.run(&api);
    Ok(())
}
