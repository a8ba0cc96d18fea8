//! Raw scouting export: flat, label-tagged instances as they come out of the analysis software.

use crate::models::rally::{MatchInfo, Score};
use serde::Deserialize;

/// Code of the per-rally header record; every other code is a touch.
pub const RALLY_CODE: &str = "Rally";

/// Errors that can occur while reading an export.
#[derive(Debug)]
pub enum FeedError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The document is not a valid export.
    Json(serde_json::Error),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Io(e) => write!(f, "Failed to read match export: {}", e),
            FeedError::Json(e) => write!(f, "Invalid match export: {}", e),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Io(e) => Some(e),
            FeedError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(e: std::io::Error) -> Self {
        FeedError::Io(e)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Json(e)
    }
}

/// Top-level export document: `{ "file": { ... } }`.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedFile {
    pub file: FeedBody,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeedBody {
    #[serde(rename = "MATCH_INFO", default)]
    pub match_info: Option<RawMatchInfo>,
    #[serde(rename = "ALL_INSTANCES", default)]
    pub all_instances: Instances,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Instances {
    #[serde(default)]
    pub instance: Vec<Instance>,
}

/// One exported event: a rally header (`code == "Rally"`) or a touch.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub start: Option<serde_json::Value>,
    #[serde(default)]
    pub end: Option<serde_json::Value>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub label: Vec<Label>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub text: String,
}

impl Instance {
    pub fn is_rally_header(&self) -> bool {
        self.code == RALLY_CODE
    }

    /// Text of the first label in `group` (exact group name).
    pub fn label(&self, group: &str) -> Option<&str> {
        self.label
            .iter()
            .find(|l| l.group == group)
            .map(|l| l.text.as_str())
    }
}

/// `MATCH_INFO` block; every field may be absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawMatchInfo {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub final_score: Option<Score>,
    #[serde(default)]
    pub total_rallies: Option<u32>,
}

impl From<&RawMatchInfo> for MatchInfo {
    fn from(raw: &RawMatchInfo) -> Self {
        Self {
            match_id: raw.match_id.clone(),
            home_team: raw.home_team.clone(),
            away_team: raw.away_team.clone(),
            date: raw.date.clone(),
            league: raw.league.clone(),
            season: raw.season.clone(),
            final_score: raw.final_score,
            total_rallies: raw.total_rallies,
        }
    }
}
