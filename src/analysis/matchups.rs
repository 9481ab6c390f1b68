use crate::roster::{Role, Roster};
use crate::store::models::MatchRecord;
use std::collections::BTreeMap;
use tracing::debug;

use super::champion_stats::{AggregateStat, StatTally};

pub const DEFAULT_THREAT_MIN_GAMES: usize = 2;
const HIGH_THREAT_WIN_RATE: f64 = 70.0;
const MEDIUM_THREAT_WIN_RATE: f64 = 50.0;
const STRONG_AGAINST_US_WIN_RATE: f64 = 60.0;

/// Champion pools per roster role, plus every champion the opponents played.
#[derive(Debug, Clone, Default)]
pub struct ChampionBreakdown {
    roles: BTreeMap<Role, Vec<AggregateStat>>,
    /// Win/loss from the opponent's perspective.
    pub opponents: Vec<AggregateStat>,
}

impl ChampionBreakdown {
    /// Champion stats for a role; empty when nobody in that role has played.
    pub fn for_role(&self, role: Role) -> &[AggregateStat] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn champion_breakdown(matches: &[MatchRecord], roster: &Roster) -> ChampionBreakdown {
    let mut roles: BTreeMap<Role, StatTally> = BTreeMap::new();
    let mut opponents = StatTally::new();

    for m in matches {
        for (player, build) in &m.final_items {
            let champion = if build.champion.is_empty() {
                "Unknown"
            } else {
                build.champion.as_str()
            };

            if m.is_home_build(build) {
                if let Some(role) = roster.role_of(player) {
                    roles.entry(role).or_default().record(champion, m.win);
                }
            } else {
                opponents.record(champion, !m.win);
            }
        }
    }

    let breakdown = ChampionBreakdown {
        roles: roles
            .into_iter()
            .map(|(role, tally)| (role, tally.into_sorted()))
            .collect(),
        opponents: opponents.into_sorted(),
    };
    debug!(
        roles = breakdown.roles.len(),
        opponent_champions = breakdown.opponents.len(),
        "champion breakdown"
    );
    breakdown
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatLevel {
    High,
    Medium,
    Low,
}

impl ThreatLevel {
    pub fn classify(win_rate: f64) -> Self {
        if win_rate >= HIGH_THREAT_WIN_RATE {
            ThreatLevel::High
        } else if win_rate >= MEDIUM_THREAT_WIN_RATE {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThreatTiers {
    pub high: Vec<AggregateStat>,
    pub medium: Vec<AggregateStat>,
    pub low: Vec<AggregateStat>,
}

/// Bucket opponent champions by their win rate against us.
///
/// Entries below `min_games` are left out of every tier.
pub fn threat_tiers(opponents: &[AggregateStat], min_games: usize) -> ThreatTiers {
    let mut tiers = ThreatTiers::default();
    for stat in opponents.iter().filter(|s| s.games >= min_games) {
        let tier = match ThreatLevel::classify(stat.win_rate) {
            ThreatLevel::High => &mut tiers.high,
            ThreatLevel::Medium => &mut tiers.medium,
            ThreatLevel::Low => &mut tiers.low,
        };
        tier.push(stat.clone());
    }
    tiers
}

#[derive(Debug, Clone)]
pub struct OpponentSummary {
    pub unique_champions: usize,
    pub strong_against_us: usize,
    pub most_played: Option<AggregateStat>,
}

/// `opponents` is expected in display order.
pub fn opponent_summary(opponents: &[AggregateStat]) -> OpponentSummary {
    OpponentSummary {
        unique_champions: opponents.len(),
        strong_against_us: opponents
            .iter()
            .filter(|s| s.win_rate > STRONG_AGAINST_US_WIN_RATE)
            .count(),
        most_played: opponents.first().cloned(),
    }
}
