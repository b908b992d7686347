//! Place directory entry point: load settings, seed the store, report.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use place_directory::config::DirectorySettings;
use place_directory::startup::bootstrap;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DirectorySettings::load().wrap_err("failed to load directory settings")?;
    let directory = bootstrap(&settings, Arc::new(DefaultClock))
        .await
        .wrap_err("failed to bootstrap the directory")?;

    let categories = directory
        .api
        .categories()
        .into_result()
        .map(|options| options.len())
        .unwrap_or_default();
    info!(
        admin = %directory.admin.username(),
        packages = directory.package_count,
        categories,
        advertisement_default_days = settings.advertisement_default_days,
        "place directory ready"
    );
    Ok(())
}
