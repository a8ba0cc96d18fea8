//! PlayerStats, StatKey and the insertion-ordered PlayerTable.

use crate::models::touch::TeamSide;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::str::FromStr;

/// Per-player counters for one match, plus the percentages derived from them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub team: TeamSide,
    /// Jersey number seen on the player's first touch.
    pub number: String,

    // Points
    pub total_points: u32,
    /// Points scored while the opponent was serving.
    pub break_points: u32,
    /// Points won minus points lost.
    pub point_balance: i32,

    // Serve
    pub serve_all: u32,
    pub serve_error: u32,
    pub serve_ace: u32,
    pub serve_eff: f64,

    // Reception
    pub pass_all: u32,
    pub pass_error: u32,
    pub pass_positive: u32,
    pub pass_perfect: u32,
    pub pass_pos: f64,
    pub pass_perf: f64,

    // Attack
    pub attack_all: u32,
    pub attack_error: u32,
    pub attack_blocked: u32,
    pub attack_score: u32,
    /// Effectiveness: score / all.
    pub attack_skut: f64,
    /// Efficiency: (score - error) / all.
    pub attack_eff: f64,

    // Block
    pub block_score: u32,
    /// Block contacts that kept the ball in play.
    pub block_touch: u32,
    pub block_error: u32,

    // Defence
    pub dig_all: u32,
    pub dig_error: u32,
    pub dig_good: u32,

    // Setting
    pub set_all: u32,
    pub set_to_score: u32,
    pub set_to_error: u32,
}

impl PlayerStats {
    /// Fresh record with every counter at zero.
    pub fn new(name: impl Into<String>, team: TeamSide) -> Self {
        Self {
            name: name.into(),
            team,
            ..Self::default()
        }
    }

    /// Numeric value of one stat column, as `f64` so counters and percentages compare alike.
    pub fn value(&self, key: StatKey) -> f64 {
        use StatKey::*;
        match key {
            TotalPoints => self.total_points.into(),
            BreakPoints => self.break_points.into(),
            PointBalance => self.point_balance.into(),
            ServeAll => self.serve_all.into(),
            ServeError => self.serve_error.into(),
            ServeAce => self.serve_ace.into(),
            ServeEff => self.serve_eff,
            PassAll => self.pass_all.into(),
            PassError => self.pass_error.into(),
            PassPositive => self.pass_positive.into(),
            PassPerfect => self.pass_perfect.into(),
            PassPos => self.pass_pos,
            PassPerf => self.pass_perf,
            AttackAll => self.attack_all.into(),
            AttackError => self.attack_error.into(),
            AttackBlocked => self.attack_blocked.into(),
            AttackScore => self.attack_score.into(),
            AttackSkut => self.attack_skut,
            AttackEff => self.attack_eff,
            BlockScore => self.block_score.into(),
            BlockTouch => self.block_touch.into(),
            BlockError => self.block_error.into(),
            DigAll => self.dig_all.into(),
            DigError => self.dig_error.into(),
            DigGood => self.dig_good.into(),
            SetAll => self.set_all.into(),
            SetToScore => self.set_to_score.into(),
            SetToError => self.set_to_error.into(),
        }
    }
}

/// Names a numeric column of [`PlayerStats`] (for rankings and exports).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StatKey {
    TotalPoints,
    BreakPoints,
    PointBalance,
    ServeAll,
    ServeError,
    ServeAce,
    ServeEff,
    PassAll,
    PassError,
    PassPositive,
    PassPerfect,
    PassPos,
    PassPerf,
    AttackAll,
    AttackError,
    AttackBlocked,
    AttackScore,
    AttackSkut,
    AttackEff,
    BlockScore,
    BlockTouch,
    BlockError,
    DigAll,
    DigError,
    DigGood,
    SetAll,
    SetToScore,
    SetToError,
}

impl StatKey {
    /// Every key, in column order.
    pub const ALL: [StatKey; 28] = [
        StatKey::TotalPoints,
        StatKey::BreakPoints,
        StatKey::PointBalance,
        StatKey::ServeAll,
        StatKey::ServeError,
        StatKey::ServeAce,
        StatKey::ServeEff,
        StatKey::PassAll,
        StatKey::PassError,
        StatKey::PassPositive,
        StatKey::PassPerfect,
        StatKey::PassPos,
        StatKey::PassPerf,
        StatKey::AttackAll,
        StatKey::AttackError,
        StatKey::AttackBlocked,
        StatKey::AttackScore,
        StatKey::AttackSkut,
        StatKey::AttackEff,
        StatKey::BlockScore,
        StatKey::BlockTouch,
        StatKey::BlockError,
        StatKey::DigAll,
        StatKey::DigError,
        StatKey::DigGood,
        StatKey::SetAll,
        StatKey::SetToScore,
        StatKey::SetToError,
    ];

    /// JSON field name of the column (camelCase).
    pub fn as_str(self) -> &'static str {
        use StatKey::*;
        match self {
            TotalPoints => "totalPoints",
            BreakPoints => "breakPoints",
            PointBalance => "pointBalance",
            ServeAll => "serveAll",
            ServeError => "serveError",
            ServeAce => "serveAce",
            ServeEff => "serveEff",
            PassAll => "passAll",
            PassError => "passError",
            PassPositive => "passPositive",
            PassPerfect => "passPerfect",
            PassPos => "passPos",
            PassPerf => "passPerf",
            AttackAll => "attackAll",
            AttackError => "attackError",
            AttackBlocked => "attackBlocked",
            AttackScore => "attackScore",
            AttackSkut => "attackSkut",
            AttackEff => "attackEff",
            BlockScore => "blockScore",
            BlockTouch => "blockTouch",
            BlockError => "blockError",
            DigAll => "digAll",
            DigError => "digError",
            DigGood => "digGood",
            SetAll => "setAll",
            SetToScore => "setToScore",
            SetToError => "setToError",
        }
    }
}

/// A stat name that does not match any [`StatKey`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatKeyError(pub String);

impl std::fmt::Display for StatKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown stat '{}'", self.0)
    }
}

impl std::error::Error for StatKeyError {}

impl FromStr for StatKey {
    type Err = StatKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StatKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| StatKeyError(s.to_string()))
    }
}

/// Name -> PlayerStats map that remembers first-sighting order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerTable {
    rows: Vec<PlayerStats>,
    index: HashMap<String, usize>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerStats> {
        self.index.get(name).map(|&i| &self.rows[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PlayerStats> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.rows[i]),
            None => None,
        }
    }

    /// Record for `name`, created with `team` on first sighting. Returns true in `.1` if it was new.
    pub fn get_or_insert(&mut self, name: &str, team: TeamSide) -> (&mut PlayerStats, bool) {
        let (i, created) = match self.index.get(name) {
            Some(&i) => (i, false),
            None => {
                self.rows.push(PlayerStats::new(name, team));
                let i = self.rows.len() - 1;
                self.index.insert(name.to_string(), i);
                (i, true)
            }
        };
        (&mut self.rows[i], created)
    }

    /// Rows in first-sighting order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlayerStats> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PlayerStats> {
        self.rows.iter_mut()
    }
}

impl<'a> IntoIterator for &'a PlayerTable {
    type Item = &'a PlayerStats;
    type IntoIter = std::slice::Iter<'a, PlayerStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Serialized as a JSON object keyed by player name, in first-sighting order.
impl Serialize for PlayerTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.name, row)?;
        }
        map.end()
    }
}
