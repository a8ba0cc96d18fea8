//! Data structures for a volleyball match: touches, rallies, per-player statistics.

mod feed;
mod match_stats;
mod player;
mod rally;
mod touch;

pub use feed::{FeedBody, FeedError, FeedFile, Instance, Instances, Label, RawMatchInfo, RALLY_CODE};
pub use match_stats::{Lineup, MatchStats, Substitution};
pub use player::{PlayerStats, PlayerTable, StatKey, StatKeyError};
pub use rally::{FinalAction, MatchData, MatchInfo, Rally, Score};
pub(crate) use rally::sides_from_info;
pub use touch::{Action, Outcome, Sides, TeamSide, Touch};
