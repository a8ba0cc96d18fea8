//! Rally, Score and FinalAction, plus the normalized MatchData.

use crate::models::touch::{Sides, TeamSide, Touch};
use serde::{Deserialize, Serialize};

/// Set score as a (home, away) pair.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Parse `"home:away"`. Halves that are missing or not numbers become 0.
    pub fn parse(text: &str) -> Self {
        let mut halves = text.split(':').map(|s| s.trim().parse::<u32>().unwrap_or(0));
        Self {
            home: halves.next().unwrap_or(0),
            away: halves.next().unwrap_or(0),
        }
    }
}

/// The touch that ended a rally, as shown in a play-by-play feed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinalAction {
    /// `Ace`, `"<type> Error"`, `"<type> Kill"` or the raw action type.
    pub kind: String,
    pub player: String,
    #[serde(default)]
    pub number: String,
    pub team: TeamSide,
    /// `"<kind> - <player>"`, or just the kind when the player is unknown.
    pub description: String,
}

/// One continuous point, serve to dead ball.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rally {
    pub rally_number: u32,
    #[serde(default = "default_set")]
    pub set: u32,
    #[serde(default)]
    pub score_before: Score,
    #[serde(default)]
    pub score_after: Score,
    pub team_scored: TeamSide,
    pub touches: Vec<Touch>,
    #[serde(default)]
    pub final_action: Option<FinalAction>,
}

fn default_set() -> u32 {
    1
}

impl Rally {
    /// A bare rally with no score context (set 1, 0:0 -> 0:0).
    pub fn new(rally_number: u32, team_scored: TeamSide, touches: Vec<Touch>) -> Self {
        Self {
            rally_number,
            set: default_set(),
            score_before: Score::default(),
            score_after: Score::default(),
            team_scored,
            touches,
            final_action: None,
        }
    }

    pub fn with_scores(mut self, before: Score, after: Score) -> Self {
        self.score_before = before;
        self.score_after = after;
        self
    }

    /// The side whose score went up by exactly one while the other stayed put.
    pub fn scoring_side_from_scores(&self) -> Option<TeamSide> {
        let (b, a) = (self.score_before, self.score_after);
        let home_up = a.home.checked_sub(b.home) == Some(1) && a.away == b.away;
        let away_up = a.away.checked_sub(b.away) == Some(1) && a.home == b.home;
        match (home_up, away_up) {
            (true, false) => Some(TeamSide::Home),
            (false, true) => Some(TeamSide::Away),
            _ => None,
        }
    }

    /// Player of the first touch (normally the server).
    pub fn server(&self) -> Option<&Touch> {
        self.touches.first()
    }

    pub fn last_touch(&self) -> Option<&Touch> {
        self.touches.last()
    }
}

/// Header data of an export (`MATCH_INFO`).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    pub date: Option<String>,
    pub league: Option<String>,
    pub season: Option<String>,
    pub final_score: Option<Score>,
    pub total_rallies: Option<u32>,
}

/// Normalized match: header plus rallies in match order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchData {
    pub match_info: Option<MatchInfo>,
    pub rallies: Vec<Rally>,
}

impl MatchData {
    /// Team tokens for resolving team names; falls back to `home`/`away`.
    pub fn sides(&self) -> Sides {
        match &self.match_info {
            Some(info) => sides_from_info(info),
            None => Sides::default(),
        }
    }
}

pub(crate) fn sides_from_info(info: &MatchInfo) -> Sides {
    let pick = |name: &str, fallback: &str| {
        if name.trim().is_empty() {
            fallback.to_string()
        } else {
            name.to_string()
        }
    };
    Sides::new(pick(&info.home_team, "home"), pick(&info.away_team, "away"))
}
