// Shared match builders for analysis tests.
use crate::store::models::MatchRecord;
use serde_json::{json, Value};

pub const HOME: i64 = 100;
pub const AWAY: i64 = 200;

pub fn scrim(id: &str, date: &str, win: bool, side: &str) -> Value {
    json!({
        "_id": {"$oid": id},
        "date": date,
        "win": win,
        "gmb_side": side,
        "gmb_team_id": HOME,
        "opponent_team": {"name": "Karmine Academy"},
        "game_duration": "31:12"
    })
}

/// Attach a final build for `player` on `team_id`.
pub fn with_pick(mut doc: Value, player: &str, champion: &str, team_id: i64) -> Value {
    doc["final_items"][player] = json!({
        "champion": champion,
        "items": [3020, 6655],
        "trinket": 3340,
        "team_id": team_id
    });
    doc
}

pub fn record(doc: Value) -> MatchRecord {
    serde_json::from_value(doc).unwrap()
}

pub fn records(docs: Vec<Value>) -> Vec<MatchRecord> {
    docs.into_iter().map(record).collect()
}
