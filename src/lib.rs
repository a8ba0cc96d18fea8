//! Volleyball match statistics: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    accumulate, accumulate_with, derive_metrics, load_feed, normalize, normalize_str,
    player_stats, players_for_team, top_players, write_csv, NameResolver, RawNames,
    RosterResolver, DEFAULT_TOP_LIMIT,
};
pub use models::{
    Action, FeedError, FeedFile, FinalAction, Lineup, MatchData, MatchInfo, MatchStats, Outcome,
    PlayerStats, PlayerTable, Rally, Score, Sides, StatKey, StatKeyError, Substitution, TeamSide,
    Touch,
};
