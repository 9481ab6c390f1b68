use crate::api::endpoints;
use crate::config::Config;
use crate::error::AppError;
use crate::roster::Roster;
use crate::store::models::{FinalBuild, MatchRecord, Side};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::debug;

const MISSING_SEQUENCE: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl FromStr for Outcome {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WIN" | "W" => Ok(Outcome::Win),
            "LOSS" | "L" => Ok(Outcome::Loss),
            other => Err(AppError::ConfigError(format!(
                "Unknown result '{}', expected WIN or LOSS",
                other
            ))),
        }
    }
}

/// Optional narrowing applied to the scrim list. Every set field must match.
#[derive(Debug, Clone, Default)]
pub struct ScrimFilter {
    /// Inclusive bounds, compared as strings against the match date.
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub result: Option<Outcome>,
    pub side: Option<Side>,
    pub opponent: Option<String>,
    pub allied_champion: Option<String>,
    pub enemy_champion: Option<String>,
}

impl ScrimFilter {
    pub fn matches(&self, m: &MatchRecord, roster: &Roster) -> bool {
        if let Some(from) = &self.date_from {
            if m.date.as_str() < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.date_to {
            if m.date.as_str() > to.as_str() {
                return false;
            }
        }
        if let Some(result) = self.result {
            if (result == Outcome::Win) != m.win {
                return false;
            }
        }
        if let Some(side) = self.side {
            if m.side != side {
                return false;
            }
        }
        if let Some(opponent) = &self.opponent {
            if m.opponent_name() != opponent.as_str() {
                return false;
            }
        }

        if self.allied_champion.is_none() && self.enemy_champion.is_none() {
            return true;
        }
        let (allied, enemy) = picked_champions(m, roster);
        let allied_ok = self
            .allied_champion
            .as_ref()
            .map_or(true, |c| allied.contains(c.as_str()));
        let enemy_ok = self
            .enemy_champion
            .as_ref()
            .map_or(true, |c| enemy.contains(c.as_str()));
        allied_ok && enemy_ok
    }

    /// Matches passing the filter, order preserved.
    pub fn apply<'a>(&self, matches: &'a [MatchRecord], roster: &Roster) -> Vec<&'a MatchRecord> {
        let kept: Vec<&MatchRecord> = matches.iter().filter(|m| self.matches(m, roster)).collect();
        debug!(total = matches.len(), kept = kept.len(), "scrim filter applied");
        kept
    }
}

fn is_allied_build(m: &MatchRecord, player: &str, build: &FinalBuild, roster: &Roster) -> bool {
    roster.contains(player) && m.is_home_build(build)
}

/// Champions played by roster players on the home team, and by the other team.
fn picked_champions<'a>(
    m: &'a MatchRecord,
    roster: &Roster,
) -> (BTreeSet<&'a str>, BTreeSet<&'a str>) {
    let mut allied = BTreeSet::new();
    let mut enemy = BTreeSet::new();

    for (player, build) in m.final_items.iter().filter(|(_, b)| !b.champion.is_empty()) {
        if is_allied_build(m, player, build, roster) {
            allied.insert(build.champion.as_str());
        } else if !m.is_home_build(build) {
            enemy.insert(build.champion.as_str());
        }
    }
    (allied, enemy)
}

/// Sorted, de-duplicated choices for the allied and enemy champion filters.
pub fn champion_options(matches: &[MatchRecord], roster: &Roster) -> (Vec<String>, Vec<String>) {
    let mut allied = BTreeSet::new();
    let mut enemy = BTreeSet::new();
    for m in matches {
        let (a, e) = picked_champions(m, roster);
        allied.extend(a);
        enemy.extend(e);
    }
    (
        allied.into_iter().map(String::from).collect(),
        enemy.into_iter().map(String::from).collect(),
    )
}

pub fn opponent_options(matches: &[MatchRecord]) -> Vec<String> {
    matches
        .iter()
        .map(|m| m.opponent_name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn find_match<'a>(matches: &'a [MatchRecord], id: &str) -> Result<&'a MatchRecord, AppError> {
    matches
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::MatchNotFound(id.to_string()))
}

/// Blue/red slot for a draft sequence number.
pub fn pick_label(sequence: u32) -> String {
    match sequence {
        1 => "B1".to_string(),
        2 => "R1".to_string(),
        3 => "R2".to_string(),
        4 => "B2".to_string(),
        5 => "B3".to_string(),
        6 => "R3".to_string(),
        7 => "R4".to_string(),
        8 => "B4".to_string(),
        9 => "B5".to_string(),
        10 => "R5".to_string(),
        n => format!("Pick {}", n),
    }
}

#[derive(Debug, Clone)]
pub struct DraftPick {
    pub sequence: u32,
    pub label: String,
    pub team: String,
    pub champion: String,
    pub home: bool,
}

/// Draft picks in pick order; empty when the match has no draft.
pub fn draft_picks(m: &MatchRecord, config: &Config) -> Vec<DraftPick> {
    let Some(draft) = &m.draft else {
        return Vec::new();
    };

    let mut picks: Vec<DraftPick> = draft
        .pick_order
        .iter()
        .map(|p| {
            let sequence = p.sequence_number.unwrap_or(MISSING_SEQUENCE);
            DraftPick {
                sequence,
                label: pick_label(sequence),
                team: p.team.clone(),
                champion: p.champion.clone(),
                home: config.is_home_team_label(&p.team),
            }
        })
        .collect();
    picks.sort_by_key(|p| p.sequence);
    picks
}

#[derive(Debug, Clone)]
pub struct ScoreboardRow {
    pub player: String,
    pub champion: String,
    pub kda: String,
    pub item_icons: Vec<String>,
    pub trinket_icon: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    pub home: Vec<ScoreboardRow>,
    pub opponent: Vec<ScoreboardRow>,
}

/// Final builds split by team id, with item icon URLs for `version`.
pub fn scoreboard(m: &MatchRecord, version: &str) -> Scoreboard {
    let mut board = Scoreboard::default();

    for (player, build) in &m.final_items {
        let row = ScoreboardRow {
            player: player.clone(),
            champion: build.champion.clone(),
            kda: m
                .player_data
                .get(player)
                .map(|s| s.kda.clone())
                .unwrap_or_else(|| "0/0/0".to_string()),
            item_icons: build
                .item_ids()
                .map(|id| endpoints::item_icon_url(version, id))
                .collect(),
            trinket_icon: build
                .trinket_id()
                .map(|id| endpoints::item_icon_url(version, id)),
        };

        if m.is_home_build(build) {
            board.home.push(row);
        } else {
            board.opponent.push(row);
        }
    }
    board
}

#[derive(Debug, Clone)]
pub struct PerformanceRow {
    pub player: String,
    pub kda: String,
    pub gold_15min: f64,
    pub cs_15min: f64,
    pub gold_diff_15min: f64,
    pub cs_diff_15min: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PerformanceSplit {
    pub roster: Vec<PerformanceRow>,
    pub others: Vec<PerformanceRow>,
}

pub fn player_performance(m: &MatchRecord, roster: &Roster) -> PerformanceSplit {
    let mut split = PerformanceSplit::default();
    for (player, stats) in &m.player_data {
        let row = PerformanceRow {
            player: player.clone(),
            kda: stats.kda.clone(),
            gold_15min: stats.gold_15min,
            cs_15min: stats.cs_15min,
            gold_diff_15min: stats.gold_diff_15min,
            cs_diff_15min: stats.cs_diff_15min,
        };
        if roster.contains(player) {
            split.roster.push(row);
        } else {
            split.others.push(row);
        }
    }
    split
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstBloodTeam {
    Us,
    Opponent,
}

/// None when the match has no first blood recorded.
pub fn first_blood(m: &MatchRecord, config: &Config) -> Option<FirstBloodTeam> {
    let team = m.first_blood.team.as_deref().filter(|t| !t.is_empty())?;
    if team == config.team_tag {
        Some(FirstBloodTeam::Us)
    } else {
        Some(FirstBloodTeam::Opponent)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObjectiveLine {
    pub dragons: u32,
    pub barons: u32,
}

/// Home then enemy dragon and baron kills. None without side or objective data.
pub fn objective_lines(m: &MatchRecord) -> Option<(ObjectiveLine, ObjectiveLine)> {
    let home = m.home_objectives()?;
    let enemy = m.enemy_objectives()?;
    Some((
        ObjectiveLine {
            dragons: home.dragon.kills,
            barons: home.baron.kills,
        },
        ObjectiveLine {
            dragons: enemy.dragon.kills,
            barons: enemy.baron.kills,
        },
    ))
}

/// Everything the detail view shows for one match.
#[derive(Debug, Clone)]
pub struct MatchDetail<'a> {
    pub record: &'a MatchRecord,
    pub first_blood: Option<FirstBloodTeam>,
    pub objectives: Option<(ObjectiveLine, ObjectiveLine)>,
    pub draft: Vec<DraftPick>,
    pub scoreboard: Scoreboard,
    pub performance: PerformanceSplit,
}

impl<'a> MatchDetail<'a> {
    pub fn build(record: &'a MatchRecord, config: &Config, version: &str) -> Self {
        MatchDetail {
            record,
            first_blood: first_blood(record, config),
            objectives: objective_lines(record),
            draft: draft_picks(record, config),
            scoreboard: scoreboard(record, version),
            performance: player_performance(record, &config.roster),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::*;
    use serde_json::json;

    fn history() -> Vec<MatchRecord> {
        let a = with_pick(
            with_pick(scrim("a", "2025-02-01", true, "blue"), "Marth", "Jinx", HOME),
            "EnemyBot",
            "Kalista",
            AWAY,
        );
        let mut b = with_pick(
            with_pick(scrim("b", "2025-02-15", false, "red"), "Marth", "Ezreal", HOME),
            "EnemyBot",
            "Jinx",
            AWAY,
        );
        b["opponent_team"]["name"] = json!("Vitality Bee");
        let c = with_pick(
            with_pick(scrim("c", "2025-03-01", true, "red"), "Stand-in", "Varus", HOME),
            "EnemyMid",
            "",
            AWAY,
        );
        records(vec![a, b, c])
    }

    fn ids(kept: &[&MatchRecord]) -> Vec<String> {
        kept.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let matches = history();
        let kept = ScrimFilter::default().apply(&matches, &Roster::default());
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn basic_filters() {
        let matches = history();
        let roster = Roster::default();

        let wins = ScrimFilter {
            result: Some(Outcome::Win),
            ..Default::default()
        };
        assert_eq!(ids(&wins.apply(&matches, &roster)), vec!["a", "c"]);

        let red = ScrimFilter {
            side: Some(Side::Red),
            ..Default::default()
        };
        assert_eq!(ids(&red.apply(&matches, &roster)), vec!["b", "c"]);

        let vitality = ScrimFilter {
            opponent: Some("Vitality Bee".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&vitality.apply(&matches, &roster)), vec!["b"]);

        let february = ScrimFilter {
            date_from: Some("2025-02-01".to_string()),
            date_to: Some("2025-02-15".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&february.apply(&matches, &roster)), vec!["a", "b"]);
    }

    #[test]
    fn champion_filters_respect_team_side() {
        let matches = history();
        let roster = Roster::default();

        // Jinx is ours in a, theirs in b
        let allied_jinx = ScrimFilter {
            allied_champion: Some("Jinx".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&allied_jinx.apply(&matches, &roster)), vec!["a"]);

        let enemy_jinx = ScrimFilter {
            enemy_champion: Some("Jinx".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&enemy_jinx.apply(&matches, &roster)), vec!["b"]);

        // non-roster home picks are not allied
        let allied_varus = ScrimFilter {
            allied_champion: Some("Varus".to_string()),
            ..Default::default()
        };
        assert!(allied_varus.apply(&matches, &roster).is_empty());
    }

    #[test]
    fn champion_options_are_sorted_and_skip_blanks() {
        let (allied, enemy) = champion_options(&history(), &Roster::default());
        assert_eq!(allied, vec!["Ezreal", "Jinx"]);
        assert_eq!(enemy, vec!["Jinx", "Kalista"]);
        assert_eq!(
            opponent_options(&history()),
            vec!["Karmine Academy", "Vitality Bee"]
        );
    }

    #[test]
    fn outcome_parsing() {
        assert_eq!("win".parse::<Outcome>().unwrap(), Outcome::Win);
        assert_eq!("LOSS".parse::<Outcome>().unwrap(), Outcome::Loss);
        assert!("draw".parse::<Outcome>().is_err());
    }

    #[test]
    fn unknown_match_id() {
        let matches = history();
        assert_eq!(find_match(&matches, "b").unwrap().opponent_name(), "Vitality Bee");
        assert!(matches!(
            find_match(&matches, "zzz"),
            Err(AppError::MatchNotFound(id)) if id == "zzz"
        ));
    }

    #[test]
    fn pick_labels() {
        let labels: Vec<_> = (1..=10).map(pick_label).collect();
        assert_eq!(
            labels,
            vec!["B1", "R1", "R2", "B2", "B3", "R3", "R4", "B4", "B5", "R5"]
        );
        assert_eq!(pick_label(11), "Pick 11");
        assert_eq!(pick_label(99), "Pick 99");
    }

    #[test]
    fn draft_is_sorted_with_missing_numbers_last() {
        let mut doc = scrim("d", "2025-03-01", true, "blue");
        doc["draft"] = json!({"pick_order": [
            {"sequence_number": 2, "team": "Karmine Academy", "champion": "Rumble"},
            {"team": "GMB", "champion": "Ornn"},
            {"sequence_number": 1, "team": "GMBLERS Esports", "champion": "Azir"}
        ]});
        let picks = draft_picks(&record(doc), &Config::default());

        let order: Vec<_> = picks.iter().map(|p| (p.label.as_str(), p.home)).collect();
        assert_eq!(order, vec![("B1", true), ("R1", false), ("Pick 99", true)]);

        let no_draft = record(scrim("e", "2025-03-01", true, "blue"));
        assert!(draft_picks(&no_draft, &Config::default()).is_empty());
    }

    #[test]
    fn scoreboard_splits_builds_and_drops_empty_trinket() {
        let mut doc = with_pick(scrim("s", "2025-03-01", true, "blue"), "Marth", "Jinx", HOME);
        doc["final_items"]["EnemyBot"] = json!({
            "champion": "Kalista",
            "items": [3006, 0, 3153],
            "trinket": 0,
            "team_id": AWAY
        });
        doc["player_data"]["Marth"] = json!({"kda": "7/1/4"});

        let board = scoreboard(&record(doc), "14.24.1");
        assert_eq!(board.home.len(), 1);
        assert_eq!(board.home[0].kda, "7/1/4");
        assert_eq!(
            board.home[0].trinket_icon.as_deref(),
            Some("https://ddragon.leagueoflegends.com/cdn/14.24.1/img/item/3340.png")
        );

        let enemy = &board.opponent[0];
        assert_eq!(enemy.kda, "0/0/0");
        assert_eq!(enemy.item_icons.len(), 2);
        assert!(enemy.trinket_icon.is_none());
    }

    #[test]
    fn performance_splits_roster_case_insensitively() {
        let mut doc = scrim("p", "2025-03-01", true, "blue");
        doc["player_data"] = json!({
            "marth": {"kda": "2/2/2", "gold_15min": 5100},
            "EnemyBot": {"kda": "1/3/0"}
        });
        let split = player_performance(&record(doc), &Roster::default());
        assert_eq!(split.roster.len(), 1);
        assert_eq!(split.roster[0].gold_15min, 5100.0);
        assert_eq!(split.others[0].player, "EnemyBot");
    }

    #[test]
    fn first_blood_and_objectives() {
        let config = Config::default();

        let mut doc = scrim("f", "2025-03-01", true, "red");
        doc["first_blood"] = json!({"team": "GMB"});
        doc["objectives"] = json!({
            "blue_team": {"objectives": {"dragon": {"kills": 1}, "baron": {"kills": 0}}},
            "red_team": {"objectives": {"dragon": {"kills": 3}, "baron": {"kills": 1}}}
        });
        let m = record(doc);
        assert_eq!(first_blood(&m, &config), Some(FirstBloodTeam::Us));

        let (home, enemy) = objective_lines(&m).unwrap();
        assert_eq!(home, ObjectiveLine { dragons: 3, barons: 1 });
        assert_eq!(enemy, ObjectiveLine { dragons: 1, barons: 0 });

        let mut theirs = scrim("g", "2025-03-01", true, "red");
        theirs["first_blood"] = json!({"team": "Karmine Academy"});
        assert_eq!(first_blood(&record(theirs), &config), Some(FirstBloodTeam::Opponent));

        let none = record(scrim("h", "2025-03-01", true, "red"));
        assert_eq!(first_blood(&none, &config), None);
        assert!(objective_lines(&none).is_none());
    }

    #[test]
    fn detail_collects_every_section() {
        let mut doc = with_pick(scrim("x", "2025-03-01", false, "blue"), "iwanan", "Azir", HOME);
        doc["player_data"]["iwanan"] = json!({"kda": "3/2/5"});
        let m = record(doc);

        let detail = MatchDetail::build(&m, &Config::default(), "14.24.1");
        assert_eq!(detail.record.result_label(), "LOSS");
        assert!(detail.draft.is_empty());
        assert_eq!(detail.scoreboard.home[0].champion, "Azir");
        assert_eq!(detail.performance.roster[0].kda, "3/2/5");
        assert!(detail.first_blood.is_none());
    }
}
