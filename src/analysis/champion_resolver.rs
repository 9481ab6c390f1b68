use crate::api::models::ChampionCatalogEntry;
use std::collections::HashMap;

// Display names whose common alias no longer normalizes to the catalog name.
const ALIASES: [(&str, &str); 2] = [("Wukong", "monkeyking"), ("Nunu & Willump", "nunu")];

fn normalize(name: &str) -> String {
    name.to_lowercase().replace([' ', '\''], "")
}

/// Maps champion names as typed in match data to Data Dragon ids.
///
/// Tiers, first hit wins:
/// 1. exact display name
/// 2. normalized name (lowercase, no spaces or apostrophes) plus known aliases
/// 3. case-insensitive containment either way; shortest display name wins,
///    then catalog order
/// 4. input that is already a canonical id
pub struct ChampionResolver<'a> {
    catalog: &'a [ChampionCatalogEntry],
    normalized: HashMap<String, usize>,
}

impl<'a> ChampionResolver<'a> {
    pub fn new(catalog: &'a [ChampionCatalogEntry]) -> Self {
        let mut normalized = HashMap::new();
        for (idx, entry) in catalog.iter().enumerate() {
            normalized.entry(normalize(&entry.name)).or_insert(idx);

            for (name, alias) in ALIASES {
                if entry.name == name {
                    normalized.entry(alias.to_string()).or_insert(idx);
                }
            }
        }

        ChampionResolver {
            catalog,
            normalized,
        }
    }

    pub fn resolve(&self, champion_name: &str) -> Option<&'a str> {
        let catalog: &'a [ChampionCatalogEntry] = self.catalog;
        if champion_name.is_empty() {
            return None;
        }

        if let Some(entry) = catalog.iter().find(|c| c.name == champion_name) {
            return Some(entry.id.as_str());
        }

        if let Some(&idx) = self.normalized.get(&normalize(champion_name)) {
            return Some(catalog[idx].id.as_str());
        }

        let needle = champion_name.to_lowercase();
        let fuzzy = catalog
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                let name = c.name.to_lowercase();
                name.contains(&needle) || needle.contains(&name)
            })
            .min_by_key(|(idx, c)| (c.name.chars().count(), *idx));
        if let Some((_, entry)) = fuzzy {
            return Some(entry.id.as_str());
        }

        catalog
            .iter()
            .find(|c| c.id == champion_name)
            .map(|c| c.id.as_str())
    }
}
