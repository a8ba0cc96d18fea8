//! MatchStats, Substitution and Lineup: the result of one accumulation.

use crate::models::player::PlayerTable;
use crate::models::touch::TeamSide;
use serde::{Deserialize, Serialize};

/// A player change recorded between rallies.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub rally_number: u32,
    pub player_in: String,
    pub player_out: String,
    pub team: TeamSide,
    /// Whether the incoming player served the very next rally.
    pub immediate_serve: bool,
}

/// Six names per side on court.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub home: Vec<String>,
    pub away: Vec<String>,
}

/// Everything derived from one match's rallies.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub players: PlayerTable,
    pub substitutions: Vec<Substitution>,
    pub current_lineup: Lineup,
    /// Touches whose team matched neither side.
    pub unattributed_touches: u32,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }
}
