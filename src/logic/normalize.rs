//! Feed normalizer: flat export instances -> ordered rallies.

use crate::models::{
    sides_from_info, Action, FeedError, FeedFile, FinalAction, Instance, MatchData, MatchInfo,
    Rally, Score, Sides, TeamSide, Touch,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

const UNKNOWN: &str = "Unknown";

/// Read and normalize an export from disk.
pub fn load_feed(path: impl AsRef<Path>) -> Result<MatchData, FeedError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    normalize_str(&text)
}

/// Parse an export document and normalize it. Only fails on invalid JSON.
pub fn normalize_str(json: &str) -> Result<MatchData, FeedError> {
    let feed: FeedFile = serde_json::from_str(json)?;
    Ok(normalize(&feed))
}

/// Group instances by rally number, rebuild each rally and sort into match order.
///
/// Never fails: records without a rally number are ignored, rallies without a header
/// record (or without touches) are dropped, missing labels fall back to defaults.
pub fn normalize(feed: &FeedFile) -> MatchData {
    let match_info = feed.file.match_info.as_ref().map(MatchInfo::from);
    let sides = match_info
        .as_ref()
        .map(sides_from_info)
        .unwrap_or_default();

    let buckets = group_by_rally(&feed.file.all_instances.instance);
    let total = buckets.len();

    let mut rallies: Vec<Rally> = buckets
        .into_iter()
        .filter_map(|(key, bucket)| {
            let rally = build_rally(&key, &bucket, &sides);
            if rally.is_none() {
                debug!("Dropping rally {}: no header record or no touches", key);
            }
            rally
        })
        .collect();

    rallies.sort_by_key(|r| r.rally_number);

    info!(
        "Normalized {} rallies ({} dropped)",
        rallies.len(),
        total - rallies.len()
    );

    MatchData {
        match_info,
        rallies,
    }
}

/// Buckets keyed by the `Rally Number` label, in first-appearance order.
/// A header record (re)starts its bucket; touches are appended.
fn group_by_rally(instances: &[Instance]) -> Vec<(String, Vec<&Instance>)> {
    let mut buckets: Vec<(String, Vec<&Instance>)> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();

    for inst in instances {
        let Some(key) = inst.label("Rally Number").filter(|k| !k.is_empty()) else {
            continue;
        };
        match position.get(key) {
            Some(&i) if inst.is_rally_header() => buckets[i].1 = vec![inst],
            Some(&i) => buckets[i].1.push(inst),
            None => {
                position.insert(key.to_string(), buckets.len());
                buckets.push((key.to_string(), vec![inst]));
            }
        }
    }

    buckets
}

fn build_rally(key: &str, bucket: &[&Instance], sides: &Sides) -> Option<Rally> {
    let header = bucket.iter().find(|i| i.is_rally_header())?;
    let touch_records: Vec<&Instance> = bucket
        .iter()
        .copied()
        .filter(|i| !i.is_rally_header())
        .collect();
    let last = *touch_records.last()?;

    let set = header
        .label("Set")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(1);
    let game_score = header.label("Game Score").unwrap_or("0:0");
    let score_after = header.label("Score After").unwrap_or(game_score);

    let touches: Vec<Touch> = touch_records
        .iter()
        .map(|inst| to_touch(inst, sides))
        .collect();
    let final_action = describe_final(last);

    let mut rally = Rally {
        rally_number: key.trim().parse().unwrap_or(0),
        set,
        score_before: Score::parse(game_score),
        score_after: Score::parse(score_after),
        team_scored: final_action.team,
        touches,
        final_action: Some(final_action),
    };
    if let Some(side) = rally.scoring_side_from_scores() {
        rally.team_scored = side;
    }
    Some(rally)
}

fn player_name(inst: &Instance) -> &str {
    inst.label("Player Name")
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(UNKNOWN)
}

fn player_number(inst: &Instance) -> &str {
    inst.label("Player Number")
        .or_else(|| inst.label("Number"))
        .unwrap_or("")
}

fn to_touch(inst: &Instance, sides: &Sides) -> Touch {
    let action = Action::from_feed(
        inst.label("Action Type").unwrap_or(""),
        inst.label("Result").unwrap_or(""),
    );
    Touch::new(action, player_name(inst), touch_side(inst, sides)).with_number(player_number(inst))
}

/// `Team` label first (`home`/`away` or a club name), then `Team Name`.
fn touch_side(inst: &Instance, sides: &Sides) -> TeamSide {
    let by_team = inst.label("Team").map(|t| sides.resolve(t));
    match by_team {
        Some(side) if side.is_known() => side,
        _ => inst
            .label("Team Name")
            .map(|t| sides.resolve(t))
            .unwrap_or(TeamSide::Unknown),
    }
}

/// Display summary of the rally-ending touch. Team: `home` or else `away`.
fn describe_final(inst: &Instance) -> FinalAction {
    let player = player_name(inst);
    let action_type = inst.label("Action Type").unwrap_or(UNKNOWN);
    let kind = match inst.label("Result").unwrap_or("") {
        "Ace" => "Ace".to_string(),
        "Error" => format!("{} Error", action_type),
        "Kill" | "Perfect" => format!("{} Kill", action_type),
        _ => action_type.to_string(),
    };
    let description = if player == UNKNOWN {
        kind.clone()
    } else {
        format!("{} - {}", kind, player)
    };
    let team = if inst.label("Team").unwrap_or("Home").eq_ignore_ascii_case("home") {
        TeamSide::Home
    } else {
        TeamSide::Away
    };

    FinalAction {
        kind,
        player: player.to_string(),
        number: player_number(inst).to_string(),
        team,
        description,
    }
}
