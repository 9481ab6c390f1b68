use crate::roster::Roster;
use crate::store::models::{Kda, MatchRecord, PlayerSummaryRecord};

use super::champion_stats::{AggregateStat, StatTally};

/// One row of a player's scrim history.
#[derive(Debug, Clone)]
pub struct PlayerGame {
    pub match_id: String,
    pub date: String,
    pub opponent: String,
    pub win: bool,
    pub result: &'static str,
    pub kda: Kda,
    pub kda_text: String,
    pub gold_15min: f64,
    pub cs_15min: f64,
    pub gold_diff_15min: f64,
    pub cs_diff_15min: f64,
    pub position: String,
}

/// Every match where `player` has recorded stats, newest first.
pub fn player_history(matches: &[MatchRecord], player: &str) -> Vec<PlayerGame> {
    let mut games: Vec<PlayerGame> = matches
        .iter()
        .filter_map(|m| {
            let stats = m.player_data.get(player)?;
            Some(PlayerGame {
                match_id: m.id.clone(),
                date: m.date.clone(),
                opponent: m.opponent_name().to_string(),
                win: m.win,
                result: m.result_label(),
                kda: Kda::parse(&stats.kda),
                kda_text: stats.kda.clone(),
                gold_15min: stats.gold_15min,
                cs_15min: stats.cs_15min,
                gold_diff_15min: stats.gold_diff_15min,
                cs_diff_15min: stats.cs_diff_15min,
                position: m.player_positions.get(player).cloned().unwrap_or_default(),
            })
        })
        .collect();

    games.sort_by(|a, b| b.date.cmp(&a.date));
    games
}

/// Win/loss record per roster player, counted over matches they have stats in.
pub fn player_records(matches: &[MatchRecord], roster: &Roster) -> Vec<AggregateStat> {
    let mut tally = StatTally::new();

    for m in matches {
        for (name, _) in roster.players() {
            let played = m
                .player_data
                .keys()
                .any(|p| p.eq_ignore_ascii_case(name));
            if played {
                tally.record(name, m.win);
            }
        }
    }

    tally.into_sorted()
}

/// Player summaries sorted by name.
pub fn sorted_players(players: &[PlayerSummaryRecord]) -> Vec<&PlayerSummaryRecord> {
    let mut sorted: Vec<&PlayerSummaryRecord> = players.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

pub fn find_player<'a>(
    players: &'a [PlayerSummaryRecord],
    name: &str,
) -> Option<&'a PlayerSummaryRecord> {
    players
        .iter()
        .find(|p| p.name == name)
        .or_else(|| players.iter().find(|p| p.name.eq_ignore_ascii_case(name)))
}
