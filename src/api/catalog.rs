use crate::cache::CatalogCache;
use crate::error::AppError;
use std::path::Path;
use tracing::{debug, info, warn};

use super::models::ChampionCatalogEntry;

pub const CATALOG_MAX_AGE_MINS: u64 = 60;

/// Champion catalog as used for one run. Empty means "no champion art".
#[derive(Debug, Clone)]
pub struct Catalog {
    pub version: String,
    pub entries: Vec<ChampionCatalogEntry>,
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog {
            version: "latest".to_string(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<CatalogCache> for Catalog {
    fn from(cache: CatalogCache) -> Self {
        Catalog {
            version: cache.version,
            entries: cache.champions,
        }
    }
}

/// Load the catalog from the disk cache when fresh, otherwise fetch it.
///
/// A failed fetch never propagates: a stale cache is used if one exists,
/// else the empty catalog.
pub fn load_catalog<F>(cache_path: &Path, max_age_mins: u64, refresh: bool, fetch: F) -> Catalog
where
    F: FnOnce() -> Result<(Vec<ChampionCatalogEntry>, String), AppError>,
{
    let cached = CatalogCache::load(cache_path).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable catalog cache");
        None
    });

    if !refresh {
        if let Some(cache) = cached.as_ref().filter(|c| !c.is_stale(max_age_mins)) {
            debug!(version = %cache.version, "catalog cache hit");
            return cache.clone().into();
        }
    }

    match fetch() {
        Ok((entries, version)) => {
            let snapshot = CatalogCache::new(version, entries);
            if let Err(e) = snapshot.save(cache_path) {
                warn!(error = %e, "could not persist catalog cache");
            }
            snapshot.into()
        }
        Err(e) => {
            warn!(error = %e, "champion catalog fetch failed");
            match cached {
                Some(stale) => {
                    info!(version = %stale.version, "falling back to stale catalog cache");
                    stale.into()
                }
                None => Catalog::empty(),
            }
        }
    }
}
