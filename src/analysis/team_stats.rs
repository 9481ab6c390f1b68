use crate::store::models::{MatchRecord, ObjectiveCounters, Side};
use tracing::debug;

use super::champion_stats::{per_game, AggregateStat, StatTally};

#[derive(Debug, Clone)]
pub struct TeamRecord {
    pub overall: AggregateStat,
    pub blue: AggregateStat,
    pub red: AggregateStat,
}

pub fn team_record(matches: &[MatchRecord]) -> TeamRecord {
    let mut sides = StatTally::new();
    let mut wins = 0;

    for m in matches {
        if m.win {
            wins += 1;
        }
        match m.side {
            Side::Blue => sides.record("Blue Side", m.win),
            Side::Red => sides.record("Red Side", m.win),
            Side::Unknown => {}
        }
    }

    TeamRecord {
        overall: AggregateStat::from_counts("Overall", matches.len(), wins),
        blue: sides.get("Blue Side"),
        red: sides.get("Red Side"),
    }
}

#[derive(Debug, Clone)]
pub struct ObjectiveControl {
    /// First Dragon, First Herald, First Baron, in that order.
    pub firsts: Vec<AggregateStat>,
    pub avg_dragons: f64,
    pub avg_barons: f64,
}

fn first_dragon(o: &ObjectiveCounters) -> bool {
    o.dragon.first
}

fn first_herald(o: &ObjectiveCounters) -> bool {
    o.rift_herald.first
}

fn first_baron(o: &ObjectiveCounters) -> bool {
    o.baron.first
}

const FIRST_OBJECTIVES: [(&str, fn(&ObjectiveCounters) -> bool); 3] = [
    ("First Dragon", first_dragon),
    ("First Herald", first_herald),
    ("First Baron", first_baron),
];

/// Win rate when the home side secures each first objective.
///
/// Kill averages divide by every match, including ones without objective data.
pub fn objective_control(matches: &[MatchRecord]) -> ObjectiveControl {
    let mut firsts = StatTally::new();
    let mut dragons: u64 = 0;
    let mut barons: u64 = 0;

    for (won, counters) in matches
        .iter()
        .filter_map(|m| m.home_objectives().map(|o| (m.win, o)))
    {
        dragons += counters.dragon.kills as u64;
        barons += counters.baron.kills as u64;

        for (label, took_first) in FIRST_OBJECTIVES {
            if took_first(counters) {
                firsts.record(label, won);
            }
        }
    }

    debug!(dragons, barons, games = matches.len(), "objective totals");

    ObjectiveControl {
        firsts: FIRST_OBJECTIVES
            .iter()
            .map(|(label, _)| firsts.get(label))
            .collect(),
        avg_dragons: per_game(dragons, matches.len()),
        avg_barons: per_game(barons, matches.len()),
    }
}
