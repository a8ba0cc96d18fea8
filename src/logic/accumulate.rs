//! Statistics accumulator: folds an ordered rally list into per-player statistics.

use crate::logic::metrics::derive_metrics;
use crate::logic::names::{NameResolver, RawNames};
use crate::models::{Action, MatchStats, Outcome, PlayerStats, Rally, TeamSide};
use log::{debug, warn};

/// Accumulate one match, keying players by their raw names.
///
/// Rallies must be in match order: break points and setter credits depend on sequence.
/// The input is not modified and the same input always yields an equal result.
pub fn accumulate(rallies: &[Rally]) -> MatchStats {
    accumulate_with(rallies, &RawNames)
}

/// Accumulate one match, keying players by `names.resolve(raw_name)`.
pub fn accumulate_with(rallies: &[Rally], names: &dyn NameResolver) -> MatchStats {
    let mut stats = MatchStats::new();

    for rally in rallies {
        apply_rally(&mut stats, rally, names);
    }

    for player in stats.players.iter_mut() {
        derive_metrics(player);
    }

    debug!(
        "Accumulated {} rallies into {} player rows",
        rallies.len(),
        stats.players.len()
    );
    if stats.unattributed_touches > 0 {
        warn!(
            "{} touches could not be attributed to either team",
            stats.unattributed_touches
        );
    }

    stats
}

/// A point is a break point when the side that did not serve won it.
/// Unknown on either side never counts.
fn is_break_point(serving: TeamSide, scoring: TeamSide) -> bool {
    serving.is_known() && scoring.is_known() && serving != scoring
}

fn apply_rally(stats: &mut MatchStats, rally: &Rally, names: &dyn NameResolver) {
    let Some(server) = rally.server() else {
        return;
    };
    let break_point = is_break_point(server.team, rally.team_scored);
    let touches = &rally.touches;
    let keys: Vec<String> = touches.iter().map(|t| names.resolve(&t.player)).collect();

    for (i, touch) in touches.iter().enumerate() {
        if !touch.team.is_known() {
            stats.unattributed_touches += 1;
        }

        let (player, created) = stats.players.get_or_insert(&keys[i], touch.team);
        if created {
            player.number = touch.number.clone();
        }
        let next = touches.get(i + 1).map(|t| t.action);
        record_touch(player, touch.action, next, break_point);

        // Assist: the setter of a kill is credited from the attack side.
        let kill = touch.action == Action::Attack(Outcome::Point);
        if kill && i > 0 && touches[i - 1].action == Action::Set {
            if let Some(setter) = stats.players.get_mut(&keys[i - 1]) {
                setter.set_to_score += 1;
            }
        }
    }

    credit_stuffed_attacker(stats, rally, &keys);
}

/// Counters for a single contact. `next` is the action of the following touch, if any.
fn record_touch(p: &mut PlayerStats, action: Action, next: Option<Action>, break_point: bool) {
    match action {
        Action::Serve(outcome) => {
            p.serve_all += 1;
            match outcome {
                Outcome::Error => {
                    p.serve_error += 1;
                    p.point_balance -= 1;
                }
                Outcome::Point => {
                    p.serve_ace += 1;
                    p.total_points += 1;
                    p.point_balance += 1;
                }
                Outcome::Perfect | Outcome::Positive | Outcome::Continue => {}
            }
        }
        Action::Pass(outcome) => {
            p.pass_all += 1;
            match outcome {
                Outcome::Error => {
                    p.pass_error += 1;
                    p.point_balance -= 1;
                }
                Outcome::Perfect => p.pass_perfect += 1,
                Outcome::Positive => p.pass_positive += 1,
                Outcome::Point | Outcome::Continue => {}
            }
        }
        Action::Attack(outcome) => {
            p.attack_all += 1;
            match outcome {
                Outcome::Error => {
                    p.attack_error += 1;
                    p.point_balance -= 1;
                }
                Outcome::Point => score_point(p, break_point, |p| p.attack_score += 1),
                Outcome::Perfect | Outcome::Positive | Outcome::Continue => {}
            }
        }
        Action::Block(outcome) => match outcome {
            // The attacker's point is counted on the attacker, not here.
            Outcome::Error => p.block_error += 1,
            Outcome::Point => score_point(p, break_point, |p| p.block_score += 1),
            Outcome::Perfect | Outcome::Positive | Outcome::Continue => p.block_touch += 1,
        },
        Action::Dig(outcome) => {
            p.dig_all += 1;
            if outcome == Outcome::Error {
                p.dig_error += 1;
                p.point_balance -= 1;
            }
        }
        Action::Set => {
            p.set_all += 1;
            if next == Some(Action::Attack(Outcome::Error)) {
                p.set_to_error += 1;
            }
        }
        Action::Other => {}
    }
}

fn score_point(p: &mut PlayerStats, break_point: bool, skill: impl FnOnce(&mut PlayerStats)) {
    skill(p);
    p.total_points += 1;
    p.point_balance += 1;
    if break_point {
        p.break_points += 1;
    }
}

/// Rally ended on a block that was not an error: the closest earlier attack was stuffed.
fn credit_stuffed_attacker(stats: &mut MatchStats, rally: &Rally, keys: &[String]) {
    let Some(last) = rally.last_touch() else {
        return;
    };
    if !matches!(last.action, Action::Block(_)) || last.action.outcome() == Some(Outcome::Error) {
        return;
    }
    let earlier = &rally.touches[..rally.touches.len() - 1];
    if let Some(j) = earlier.iter().rposition(|t| t.action.is_attack()) {
        if let Some(attacker) = stats.players.get_mut(&keys[j]) {
            attacker.attack_blocked += 1;
        }
    }
}
