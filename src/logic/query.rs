//! Read-only views over an accumulated match.

use crate::models::{MatchStats, PlayerStats, StatKey, TeamSide};
use std::cmp::Ordering;

/// Default number of rows returned by [`top_players`].
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Up to `limit` players, highest `key` first. Ties keep first-sighting order.
pub fn top_players(stats: &MatchStats, key: StatKey, limit: usize) -> Vec<&PlayerStats> {
    let mut rows: Vec<&PlayerStats> = stats.players.iter().collect();
    // sort_by is stable
    rows.sort_by(|a, b| {
        b.value(key)
            .partial_cmp(&a.value(key))
            .unwrap_or(Ordering::Equal)
    });
    rows.truncate(limit);
    rows
}

/// Exact-name lookup.
pub fn player_stats<'a>(stats: &'a MatchStats, name: &str) -> Option<&'a PlayerStats> {
    stats.players.get(name)
}

/// Players first seen on `team`, in first-sighting order.
pub fn players_for_team(stats: &MatchStats, team: TeamSide) -> Vec<&PlayerStats> {
    stats.players.iter().filter(|p| p.team == team).collect()
}
