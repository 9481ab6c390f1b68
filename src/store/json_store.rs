use crate::cache::TtlCache;
use crate::error::AppError;
use chrono::{Duration, Utc};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::models::{MatchRecord, PlayerSummaryRecord};
use super::DataStore;

const GAMES_FILE: &str = "games.json";
const PLAYERS_FILE: &str = "players.json";

/// Reads `games.json` and `players.json` exported from the document store.
///
/// Both a JSON array (`mongoexport --jsonArray`) and one document per line are accepted.
pub struct JsonDataStore {
    dir: PathBuf,
}

impl JsonDataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDataStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, AppError> {
        let path = self.dir.join(file);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(AppError::IoError(e)),
        };

        parse_documents(&content)
            .map_err(|e| AppError::JsonError(format!("{}: {}", path.display(), e)))
    }
}

fn parse_documents<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, serde_json::Error> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }

    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str)
        .collect()
}

impl DataStore for JsonDataStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
        let mut matches: Vec<MatchRecord> = self.read_collection(GAMES_FILE)?;
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(count = matches.len(), "loaded matches");
        Ok(matches)
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn list_players(&self) -> Result<Vec<PlayerSummaryRecord>, AppError> {
        let players: Vec<PlayerSummaryRecord> = self.read_collection(PLAYERS_FILE)?;
        debug!(count = players.len(), "loaded players");
        Ok(players)
    }
}

pub const DEFAULT_READ_TTL_SECS: i64 = 300;

/// Memoizes both reads of an inner store for a bounded interval.
pub struct CachedStore<S> {
    inner: S,
    matches: RefCell<TtlCache<&'static str, Vec<MatchRecord>>>,
    players: RefCell<TtlCache<&'static str, Vec<PlayerSummaryRecord>>>,
}

impl<S: DataStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        CachedStore {
            inner,
            matches: RefCell::new(TtlCache::new(ttl)),
            players: RefCell::new(TtlCache::new(ttl)),
        }
    }
}

impl<S: DataStore> DataStore for CachedStore<S> {
    fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
        self.matches
            .borrow_mut()
            .get_or_try_insert_with(GAMES_FILE, Utc::now(), || self.inner.list_matches())
    }

    fn list_players(&self) -> Result<Vec<PlayerSummaryRecord>, AppError> {
        self.players
            .borrow_mut()
            .get_or_try_insert_with(PLAYERS_FILE, Utc::now(), || self.inner.list_players())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn missing_files_are_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDataStore::new(dir.path());
        assert!(store.list_matches().unwrap().is_empty());
        assert!(store.list_players().unwrap().is_empty());
    }

    #[test]
    fn matches_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(GAMES_FILE),
            r#"[
                {"_id": {"$oid": "a"}, "date": "2025-02-01", "win": true},
                {"_id": {"$oid": "b"}, "date": "2025-03-15", "win": false},
                {"_id": {"$oid": "c"}, "date": "2025-01-20", "win": true}
            ]"#,
        )
        .unwrap();

        let store = JsonDataStore::new(dir.path());
        let ids: Vec<_> = store
            .list_matches()
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn reads_line_delimited_export() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PLAYERS_FILE),
            "{\"name\": \"Marth\", \"games_played\": 14}\n\n{\"name\": \"Goliah\"}\n",
        )
        .unwrap();

        let players = JsonDataStore::new(dir.path()).list_players().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].games_played, 14);
        assert_eq!(players[1].games_played, 0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(GAMES_FILE), "[{\"date\": ").unwrap();
        assert!(matches!(
            JsonDataStore::new(dir.path()).list_matches(),
            Err(AppError::JsonError(_))
        ));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(GAMES_FILE), [0x5b, 0xff, 0xfe, 0x5d]).unwrap();
        assert!(matches!(
            JsonDataStore::new(dir.path()).list_matches(),
            Err(AppError::IoError(_))
        ));
    }

    #[test]
    fn directory_in_place_of_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(PLAYERS_FILE)).unwrap();
        assert!(matches!(
            JsonDataStore::new(dir.path()).list_players(),
            Err(AppError::IoError(_))
        ));
    }

    struct CountingStore {
        reads: Cell<u32>,
    }

    impl DataStore for CountingStore {
        fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
            self.reads.set(self.reads.get() + 1);
            Ok(vec![MatchRecord::default()])
        }

        fn list_players(&self) -> Result<Vec<PlayerSummaryRecord>, AppError> {
            self.reads.set(self.reads.get() + 1);
            Ok(Vec::new())
        }
    }

    #[test]
    fn cached_store_memoizes_reads() {
        let store = CachedStore::new(
            CountingStore { reads: Cell::new(0) },
            Duration::seconds(DEFAULT_READ_TTL_SECS),
        );

        store.list_matches().unwrap();
        store.list_matches().unwrap();
        store.list_players().unwrap();
        assert_eq!(store.inner.reads.get(), 2);
    }
}
