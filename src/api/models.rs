use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Data Dragon champion.json response
#[derive(Debug, Deserialize)]
pub struct DataDragonChampions {
    // BTreeMap keeps enumeration order stable (sorted by champion id)
    pub data: BTreeMap<String, ChampionInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChampionInfo {
    pub id: String,
    pub name: String,
}

/// Canonical id (used in asset URLs) plus display name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChampionCatalogEntry {
    pub id: String,
    pub name: String,
}

impl ChampionCatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ChampionCatalogEntry {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<ChampionInfo> for ChampionCatalogEntry {
    fn from(info: ChampionInfo) -> Self {
        ChampionCatalogEntry::new(info.id, info.name)
    }
}

impl DataDragonChampions {
    pub fn into_catalog(self) -> Vec<ChampionCatalogEntry> {
        self.data.into_values().map(ChampionCatalogEntry::from).collect()
    }
}
