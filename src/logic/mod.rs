//! Match statistics logic: feed normalization, accumulation, derived metrics, queries.

mod accumulate;
mod export;
mod metrics;
mod names;
mod normalize;
mod query;

pub use accumulate::{accumulate, accumulate_with};
pub use export::write_csv;
pub use metrics::derive_metrics;
pub use names::{NameResolver, RawNames, RosterResolver};
pub use normalize::{load_feed, normalize, normalize_str};
pub use query::{player_stats, players_for_team, top_players, DEFAULT_TOP_LIMIT};
