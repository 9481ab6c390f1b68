use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use crate::api::models::ChampionCatalogEntry;
use crate::error::AppError;

/// In-memory memoization of read-only results, each entry valid for `max_age`.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, (V, DateTime<Utc>)>,
    max_age: Duration,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(max_age: Duration) -> Self {
        TtlCache {
            entries: HashMap::new(),
            max_age,
        }
    }

    pub fn get(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        self.entries
            .get(key)
            .filter(|(_, stored_at)| now.signed_duration_since(*stored_at) < self.max_age)
            .map(|(value, _)| value.clone())
    }

    pub fn insert(&mut self, key: K, value: V, now: DateTime<Utc>) {
        self.entries.insert(key, (value, now));
    }

    /// Return the cached value for `key`, or compute and store it if absent or expired.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        now: DateTime<Utc>,
        fetch: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key, now) {
            return Ok(value);
        }

        let value = fetch()?;
        self.insert(key, value.clone(), now);
        Ok(value)
    }
}

/// Champion catalog snapshot persisted between runs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogCache {
    pub version: String,
    pub fetched_at: DateTime<Utc>,
    pub champions: Vec<ChampionCatalogEntry>,
}

impl CatalogCache {
    pub fn new(version: String, champions: Vec<ChampionCatalogEntry>) -> Self {
        CatalogCache {
            version,
            fetched_at: Utc::now(),
            champions,
        }
    }

    pub fn get_cache_path() -> PathBuf {
        let cache_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scrim_stats");

        cache_dir.join("catalog.json")
    }

    /// `Ok(None)` when no cache has been written yet.
    pub fn load(path: &Path) -> Result<Option<Self>, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map(Some).map_err(|e| {
                AppError::JsonError(format!("Failed to parse catalog cache: {}", e))
            }),
            Err(_) => {
                debug!(path = %path.display(), "no catalog cache on disk");
                Ok(None)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AppError::JsonError(format!("Failed to serialize catalog cache: {}", e))
        })?;

        fs::write(path, json)?;

        Ok(())
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let now = Utc::now();
        let age = now.signed_duration_since(self.fetched_at);
        age.num_minutes() >= max_age_mins as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_entry_expires() {
        let start = Utc::now();
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::seconds(300));
        cache.insert("games", 7, start);

        assert_eq!(cache.get(&"games", start + Duration::seconds(299)), Some(7));
        assert_eq!(cache.get(&"games", start + Duration::seconds(300)), None);
        assert_eq!(cache.get(&"players", start), None);
    }

    #[test]
    fn get_or_try_insert_memoizes_until_expiry() {
        let start = Utc::now();
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::seconds(60));
        let mut calls = 0;

        for offset in [0, 10, 59] {
            let value = cache
                .get_or_try_insert_with("games", start + Duration::seconds(offset), || {
                    calls += 1;
                    Ok::<_, AppError>(calls)
                })
                .unwrap();
            assert_eq!(value, 1);
        }

        let value = cache
            .get_or_try_insert_with("games", start + Duration::seconds(61), || {
                calls += 1;
                Ok::<_, AppError>(calls)
            })
            .unwrap();
        assert_eq!(value, 2);
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let now = Utc::now();
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::seconds(60));

        let err = cache.get_or_try_insert_with("games", now, || {
            Err(AppError::HttpError("down".to_string()))
        });
        assert!(err.is_err());
        assert_eq!(cache.get(&"games", now), None);
    }

    #[test]
    fn catalog_cache_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        assert!(CatalogCache::load(&path).unwrap().is_none());

        let cache = CatalogCache::new(
            "14.24.1".to_string(),
            vec![ChampionCatalogEntry::new("Ahri", "Ahri")],
        );
        cache.save(&path).unwrap();

        let loaded = CatalogCache::load(&path).unwrap().unwrap();
        assert_eq!(loaded.version, "14.24.1");
        assert_eq!(loaded.champions, cache.champions);
        assert!(!loaded.is_stale(60));
    }

    #[test]
    fn old_catalog_is_stale() {
        let mut cache = CatalogCache::new("14.1.1".to_string(), Vec::new());
        cache.fetched_at = Utc::now() - Duration::minutes(90);
        assert!(cache.is_stale(60));
    }
}
