//! Bootstrap: wire the services over the in-memory store and seed it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use chrono::Duration;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::config::{DirectorySettings, MAX_ADVERTISEMENT_DEFAULT_DAYS};
use crate::domain::ports::{PackageCatalogueError, UserAdminCommand};
use crate::domain::{
    AdvertisementService, EntitlementService, Package, PlaceService, SubscriptionService, User,
    UserValidationError, Username,
};
use crate::inbound::{DirectoryApi, DirectoryPorts};
use crate::outbound::{MemoryStore, RepositoryIdentityProvider};

/// Errors returned while bootstrapping the directory.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The package catalogue file could not be read.
    #[error("failed to read package catalogue at {path}: {source}")]
    CatalogueRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The package catalogue file is not a valid package list.
    #[error("failed to parse package catalogue at {path}: {source}")]
    CatalogueParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("package catalogue could not be loaded: {0}")]
    Catalogue(#[from] PackageCatalogueError),
    #[error("invalid administrator username: {0}")]
    AdminUsername(#[from] UserValidationError),
    #[error("advertisement default duration must be at least one day")]
    ZeroAdvertisementDuration,
    #[error("advertisement default duration of {days} days exceeds the {max} day limit")]
    AdvertisementDurationTooLong { days: u32, max: u32 },
    #[error("administrator seeding failed: {0}")]
    Seeding(#[from] crate::domain::Error),
}

/// A seeded directory ready to serve requests.
pub struct Directory {
    pub api: DirectoryApi,
    pub store: Arc<MemoryStore>,
    pub admin: User,
    pub package_count: usize,
}

/// Wire every service over `store` and return the facade.
pub fn build_directory(
    store: Arc<MemoryStore>,
    clock: Arc<dyn Clock>,
    advertisement_default_duration: Duration,
) -> DirectoryApi {
    let entitlements = Arc::new(EntitlementService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&clock),
    ));
    let places = Arc::new(PlaceService::new(Arc::clone(&store), Arc::clone(&clock)));
    let subscriptions = Arc::new(SubscriptionService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&clock),
    ));
    let advertisements = Arc::new(AdvertisementService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        clock,
        advertisement_default_duration,
    ));

    DirectoryApi::new(DirectoryPorts {
        identity: Arc::new(RepositoryIdentityProvider::new(store)),
        entitlements: entitlements.clone(),
        user_admin: entitlements,
        places: places.clone(),
        places_query: places,
        subscriptions: subscriptions.clone(),
        subscriptions_query: subscriptions,
        advertisements: advertisements.clone(),
        advertisements_query: advertisements,
    })
}

/// Build the directory and apply the configured seeds.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use place_directory::config::DirectorySettings;
/// use place_directory::startup::bootstrap;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = DirectorySettings {
///     advertisement_default_days: 30,
///     admin_username: None,
///     catalogue_path: None,
/// };
/// let directory = bootstrap(&settings, Arc::new(DefaultClock)).await?;
/// assert_eq!(directory.admin.username().as_ref(), "admin");
/// # Ok(())
/// # }
/// ```
pub async fn bootstrap(
    settings: &DirectorySettings,
    clock: Arc<dyn Clock>,
) -> Result<Directory, StartupError> {
    if settings.advertisement_default_days == 0 {
        return Err(StartupError::ZeroAdvertisementDuration);
    }
    if settings.advertisement_default_days > MAX_ADVERTISEMENT_DEFAULT_DAYS {
        return Err(StartupError::AdvertisementDurationTooLong {
            days: settings.advertisement_default_days,
            max: MAX_ADVERTISEMENT_DEFAULT_DAYS,
        });
    }
    let admin_username = Username::new(settings.admin_username())?;

    let store = Arc::new(MemoryStore::new());
    let package_count = match settings.catalogue_path.as_deref() {
        Some(path) => {
            let packages = load_catalogue(path)?;
            let count = store.load_packages(packages)?;
            info!(path = %path.display(), packages = count, "package catalogue loaded");
            count
        }
        None => {
            info!(reason = "no catalogue path", "package catalogue left empty");
            0
        }
    };

    let admin_service =
        EntitlementService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&clock));
    let admin = admin_service.seed_admin(admin_username).await?;

    let api = build_directory(
        Arc::clone(&store),
        clock,
        settings.advertisement_default_duration(),
    );
    Ok(Directory {
        api,
        store,
        admin,
        package_count,
    })
}

fn load_catalogue(path: &Path) -> Result<Vec<Package>, StartupError> {
    let read_error = |source| StartupError::CatalogueRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "catalogue path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    serde_json::from_slice(&payload).map_err(|source| StartupError::CatalogueParse {
        path: path.to_path_buf(),
        source,
    })
}
