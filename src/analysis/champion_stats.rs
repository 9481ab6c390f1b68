use std::cmp::Ordering;
use std::collections::HashMap;

/// Games/wins summary for one grouped entity (champion, objective, side...).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStat {
    pub name: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
}

impl AggregateStat {
    /// `wins` is clamped to `games`, so `wins + losses == games` always holds.
    pub fn from_counts(name: impl Into<String>, games: usize, wins: usize) -> Self {
        let wins = wins.min(games);
        AggregateStat {
            name: name.into(),
            games,
            wins,
            losses: games - wins,
            win_rate: win_rate(wins, games),
        }
    }
}

/// Percentage in `[0, 100]`; 0 when there are no games.
pub fn win_rate(wins: usize, games: usize) -> f64 {
    if games == 0 {
        0.0
    } else {
        (wins as f64 / games as f64) * 100.0
    }
}

/// Average per game; 0 when there are no games.
pub fn per_game(total: u64, games: usize) -> f64 {
    if games == 0 {
        0.0
    } else {
        total as f64 / games as f64
    }
}

/// Games descending, then win rate descending, then name.
pub fn display_order(a: &AggregateStat, b: &AggregateStat) -> Ordering {
    b.games
        .cmp(&a.games)
        .then_with(|| b.win_rate.partial_cmp(&a.win_rate).unwrap_or(Ordering::Equal))
        .then_with(|| a.name.cmp(&b.name))
}

#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    games: usize,
    wins: usize,
}

/// Folds outcomes into per-group counters.
#[derive(Debug, Default)]
pub struct StatTally {
    groups: HashMap<String, Counts>,
}

impl StatTally {
    pub fn new() -> Self {
        StatTally::default()
    }

    /// Count one game for `group`, and a win if `won` from that group's perspective.
    pub fn record(&mut self, group: &str, won: bool) {
        let entry = self.groups.entry(group.to_string()).or_default();
        entry.games += 1;
        if won {
            entry.wins += 1;
        }
    }

    pub fn get(&self, group: &str) -> AggregateStat {
        let counts = self.groups.get(group).copied().unwrap_or_default();
        AggregateStat::from_counts(group, counts.games, counts.wins)
    }

    /// All groups in display order.
    pub fn into_sorted(self) -> Vec<AggregateStat> {
        let mut stats: Vec<AggregateStat> = self
            .groups
            .into_iter()
            .map(|(name, c)| AggregateStat::from_counts(name, c.games, c.wins))
            .collect();
        stats.sort_by(display_order);
        stats
    }
}
