use serde::Deserialize;
use std::collections::BTreeMap;

use super::de;

// Scrim document as exported from the GMB_Games collection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchRecord {
    #[serde(rename = "_id", deserialize_with = "de::document_id")]
    pub id: String,
    #[serde(deserialize_with = "de::or_default")]
    pub date: String,
    #[serde(deserialize_with = "de::or_default")]
    pub opponent_team: OpponentTeam,
    #[serde(deserialize_with = "de::truthy")]
    pub win: bool,
    #[serde(rename = "gmb_side", deserialize_with = "de::or_default")]
    pub side: Side,
    #[serde(rename = "game_duration", deserialize_with = "de::or_default")]
    pub duration: String,
    #[serde(rename = "gmb_team_id", deserialize_with = "de::team_id")]
    pub team_id: Option<i64>,
    #[serde(deserialize_with = "de::or_default")]
    pub final_items: BTreeMap<String, FinalBuild>,
    #[serde(deserialize_with = "de::or_default")]
    pub player_data: BTreeMap<String, PlayerGameStats>,
    #[serde(deserialize_with = "de::or_default")]
    pub player_positions: BTreeMap<String, String>,
    #[serde(deserialize_with = "de::or_default")]
    pub objectives: Objectives,
    #[serde(deserialize_with = "de::or_default")]
    pub first_blood: FirstBlood,
    #[serde(deserialize_with = "de::or_default")]
    pub draft: Option<Draft>,
}

impl Default for MatchRecord {
    fn default() -> Self {
        MatchRecord {
            id: String::new(),
            date: String::new(),
            opponent_team: OpponentTeam::default(),
            win: false,
            side: Side::Unknown,
            duration: "0:00".to_string(),
            team_id: None,
            final_items: BTreeMap::new(),
            player_data: BTreeMap::new(),
            player_positions: BTreeMap::new(),
            objectives: Objectives::default(),
            first_blood: FirstBlood::default(),
            draft: None,
        }
    }
}

impl MatchRecord {
    pub fn opponent_name(&self) -> &str {
        if self.opponent_team.name.is_empty() {
            "Unknown"
        } else {
            &self.opponent_team.name
        }
    }

    pub fn duration(&self) -> &str {
        if self.duration.is_empty() {
            "0:00"
        } else {
            &self.duration
        }
    }

    pub fn result_label(&self) -> &'static str {
        if self.win {
            "WIN"
        } else {
            "LOSS"
        }
    }

    /// Objective counters for the home team's side, if recorded.
    pub fn home_objectives(&self) -> Option<&ObjectiveCounters> {
        match self.side {
            Side::Blue => self.objectives.blue_team.as_ref()?.objectives.as_ref(),
            Side::Red => self.objectives.red_team.as_ref()?.objectives.as_ref(),
            Side::Unknown => None,
        }
    }

    pub fn enemy_objectives(&self) -> Option<&ObjectiveCounters> {
        match self.side {
            Side::Blue => self.objectives.red_team.as_ref()?.objectives.as_ref(),
            Side::Red => self.objectives.blue_team.as_ref()?.objectives.as_ref(),
            Side::Unknown => None,
        }
    }

    /// Whether a final-build entry belongs to the home team.
    pub fn is_home_build(&self, build: &FinalBuild) -> bool {
        build.team_id == self.team_id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpponentTeam {
    #[serde(deserialize_with = "de::or_default")]
    pub name: String,
}

impl Default for OpponentTeam {
    fn default() -> Self {
        OpponentTeam {
            name: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Side {
    Blue,
    Red,
    #[default]
    Unknown,
}

impl From<String> for Side {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "blue" => Side::Blue,
            "red" => Side::Red,
            _ => Side::Unknown,
        }
    }
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Blue => "BLUE",
            Side::Red => "RED",
            Side::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FinalBuild {
    #[serde(deserialize_with = "de::or_default")]
    pub champion: String,
    #[serde(deserialize_with = "de::or_default")]
    pub items: Vec<u32>,
    #[serde(deserialize_with = "de::or_default")]
    pub trinket: u32,
    #[serde(deserialize_with = "de::team_id")]
    pub team_id: Option<i64>,
}

const ITEM_SLOTS: usize = 6;

impl FinalBuild {
    /// Filled item slots, ignoring empty (0) ids.
    pub fn item_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items
            .iter()
            .take(ITEM_SLOTS)
            .copied()
            .filter(|id| *id > 0)
    }

    pub fn trinket_id(&self) -> Option<u32> {
        (self.trinket > 0).then_some(self.trinket)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerGameStats {
    #[serde(deserialize_with = "de::or_default")]
    pub kda: String,
    #[serde(deserialize_with = "de::or_default")]
    pub gold_15min: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub cs_15min: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub gold_diff_15min: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub cs_diff_15min: f64,
}

impl Default for PlayerGameStats {
    fn default() -> Self {
        PlayerGameStats {
            kda: "0/0/0".to_string(),
            gold_15min: 0.0,
            cs_15min: 0.0,
            gold_diff_15min: 0.0,
            cs_diff_15min: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Objectives {
    #[serde(deserialize_with = "de::or_default")]
    pub blue_team: Option<TeamObjectives>,
    #[serde(deserialize_with = "de::or_default")]
    pub red_team: Option<TeamObjectives>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamObjectives {
    #[serde(deserialize_with = "de::or_default")]
    pub objectives: Option<ObjectiveCounters>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObjectiveCounters {
    #[serde(deserialize_with = "de::or_default")]
    pub dragon: ObjectiveStat,
    #[serde(deserialize_with = "de::or_default")]
    pub baron: ObjectiveStat,
    #[serde(rename = "riftHerald", deserialize_with = "de::or_default")]
    pub rift_herald: ObjectiveStat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ObjectiveStat {
    #[serde(deserialize_with = "de::or_default")]
    pub kills: u32,
    #[serde(deserialize_with = "de::truthy")]
    pub first: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FirstBlood {
    #[serde(deserialize_with = "de::or_default")]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Draft {
    #[serde(deserialize_with = "de::or_default")]
    pub pick_order: Vec<Pick>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pick {
    #[serde(deserialize_with = "de::or_default")]
    pub sequence_number: Option<u32>,
    #[serde(deserialize_with = "de::or_default")]
    pub team: String,
    #[serde(deserialize_with = "de::or_default")]
    pub champion: String,
}

// Season averages from the GMB_Players collection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSummaryRecord {
    #[serde(deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(deserialize_with = "de::or_default")]
    pub games_played: u32,
    #[serde(deserialize_with = "de::or_default")]
    pub avg_player_data: AveragePlayerData,
    #[serde(deserialize_with = "de::or_default")]
    pub avg_control_wards: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub avg_challenges: Option<ChallengeAverages>,
}

impl Default for PlayerSummaryRecord {
    fn default() -> Self {
        PlayerSummaryRecord {
            name: "Unknown".to_string(),
            games_played: 0,
            avg_player_data: AveragePlayerData::default(),
            avg_control_wards: 0.0,
            avg_challenges: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AveragePlayerData {
    #[serde(deserialize_with = "de::or_default")]
    pub gold_15min: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub cs_15min: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub gold_diff_15min: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub cs_diff_15min: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub kda_kills: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub kda_deaths: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub kda_assists: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub kda_ratio: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub kda: String,
}

impl Default for AveragePlayerData {
    fn default() -> Self {
        AveragePlayerData {
            gold_15min: 0.0,
            cs_15min: 0.0,
            gold_diff_15min: 0.0,
            cs_diff_15min: 0.0,
            kda_kills: 0.0,
            kda_deaths: 0.0,
            kda_assists: 0.0,
            kda_ratio: 0.0,
            kda: "0/0/0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChallengeAverages {
    #[serde(deserialize_with = "de::or_default")]
    pub vision_score: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub damage_per_minute: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub buffs_stolen: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub skill_shots_hit: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub skill_shots_dodged: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub perfect_game: f64,
    #[serde(deserialize_with = "de::or_default")]
    pub turret_plates_taken: f64,
    #[serde(deserialize_with = "de::truthy")]
    pub dance_with_rift_herald: bool,
}

/// Kills/deaths/assists parsed from a `k/d/a` string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kda {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl Kda {
    /// Malformed input parses as 0/0/0.
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<u32> = raw
            .split('/')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .unwrap_or_default();

        match parts.as_slice() {
            [kills, deaths, assists] => Kda {
                kills: *kills,
                deaths: *deaths,
                assists: *assists,
            },
            _ => Kda::default(),
        }
    }

    pub fn ratio(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sparse_document_uses_defaults() {
        let record: MatchRecord = serde_json::from_value(json!({
            "_id": {"$oid": "665f1c2a9b1e8a0012345678"},
            "date": "2025-03-01",
            "win": true
        }))
        .unwrap();

        assert_eq!(record.id, "665f1c2a9b1e8a0012345678");
        assert_eq!(record.opponent_name(), "Unknown");
        assert_eq!(record.duration(), "0:00");
        assert_eq!(record.side, Side::Unknown);
        assert!(record.team_id.is_none());
        assert!(record.final_items.is_empty());
        assert!(record.home_objectives().is_none());
        assert!(record.draft.is_none());
    }

    #[test]
    fn malformed_fields_fall_back_to_zero() {
        let record: MatchRecord = serde_json::from_value(json!({
            "_id": "abc",
            "win": null,
            "gmb_side": "Blue",
            "gmb_team_id": "100",
            "player_data": {
                "Marth": {"kda": "4/1/7", "gold_15min": "lots", "cs_15min": 131.0}
            },
            "objectives": {
                "blue_team": {"objectives": {"dragon": {"kills": 3, "first": 1}, "baron": null}}
            }
        }))
        .unwrap();

        assert!(!record.win);
        assert_eq!(record.side, Side::Blue);
        assert_eq!(record.team_id, Some(100));
        let marth = &record.player_data["Marth"];
        assert_eq!(marth.gold_15min, 0.0);
        assert_eq!(marth.cs_15min, 131.0);

        let home = record.home_objectives().unwrap();
        assert_eq!(home.dragon.kills, 3);
        assert!(home.dragon.first);
        assert_eq!(home.baron.kills, 0);
        assert!(record.enemy_objectives().is_none());
    }

    #[test]
    fn player_stats_default_kda() {
        let stats: PlayerGameStats = serde_json::from_value(json!({"gold_15min": 5400})).unwrap();
        assert_eq!(stats.kda, "0/0/0");
        assert_eq!(stats.gold_15min, 5400.0);
    }

    #[test]
    fn final_build_skips_empty_slots() {
        let build: FinalBuild = serde_json::from_value(json!({
            "champion": "Ahri",
            "items": [3020, 0, 6655, 3089, 0, 3135, 1056],
            "trinket": 3340,
            "team_id": 100
        }))
        .unwrap();

        assert_eq!(build.item_ids().collect::<Vec<_>>(), vec![3020, 6655, 3089, 3135]);
        assert_eq!(build.trinket_id(), Some(3340));
    }

    #[test]
    fn kda_parsing() {
        let kda = Kda::parse("3/0/9");
        assert_eq!(kda, Kda { kills: 3, deaths: 0, assists: 9 });
        assert_eq!(kda.ratio(), 12.0);
        assert_eq!(Kda::parse("2/4/6").ratio(), 2.0);
        assert_eq!(Kda::parse("garbage"), Kda::default());
        assert_eq!(Kda::parse("1/2"), Kda::default());
    }

    #[test]
    fn player_summary_defaults() {
        let player: PlayerSummaryRecord = serde_json::from_value(json!({
            "name": "iwanan",
            "games_played": 12,
            "avg_challenges": {"vision_score": 31.5, "dance_with_rift_herald": 0}
        }))
        .unwrap();

        assert_eq!(player.avg_player_data.kda, "0/0/0");
        let challenges = player.avg_challenges.unwrap();
        assert_eq!(challenges.vision_score, 31.5);
        assert!(!challenges.dance_with_rift_herald);
    }
}
