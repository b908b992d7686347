//! Directory settings loaded via OrthoConfig.

use std::path::PathBuf;

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Upper bound accepted for `advertisement_default_days`: ten years.
pub const MAX_ADVERTISEMENT_DEFAULT_DAYS: u32 = 3_660;

/// Configuration for the directory engine and its bootstrap seeding.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    /// Campaign length in days when an advertisement omits its end date.
    #[ortho_config(default = 30)]
    pub advertisement_default_days: u32,
    /// Name of the administrator ensured at startup.
    pub admin_username: Option<String>,
    /// Optional JSON file of packages loaded into the catalogue at startup.
    pub catalogue_path: Option<PathBuf>,
}

impl DirectorySettings {
    /// Return the configured administrator name, falling back to the default.
    pub fn admin_username(&self) -> &str {
        self.admin_username
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    /// Default advertisement campaign length.
    pub fn advertisement_default_duration(&self) -> Duration {
        Duration::days(i64::from(self.advertisement_default_days))
    }
}
