pub mod champion_resolver;
pub mod champion_stats;
pub mod matchups;
pub mod player_stats;
pub mod scrims;
pub mod team_stats;

#[cfg(test)]
mod fixtures;
