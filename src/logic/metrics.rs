//! Derived percentages, computed once per player after all rallies are folded in.

use crate::models::PlayerStats;

/// Fill the derived fields from the raw counters.
/// Ratios over an empty denominator stay at 0.
pub fn derive_metrics(stats: &mut PlayerStats) {
    if stats.serve_all > 0 {
        let net = f64::from(stats.serve_ace) - f64::from(stats.serve_error);
        stats.serve_eff = percent(net, stats.serve_all);
    }

    if stats.pass_all > 0 {
        let positive = f64::from(stats.pass_positive) + f64::from(stats.pass_perfect);
        stats.pass_pos = percent(positive, stats.pass_all);
        stats.pass_perf = percent(stats.pass_perfect.into(), stats.pass_all);
    }

    if stats.attack_all > 0 {
        stats.attack_skut = percent(stats.attack_score.into(), stats.attack_all);
        let net = f64::from(stats.attack_score) - f64::from(stats.attack_error);
        stats.attack_eff = percent(net, stats.attack_all);
    }

    stats.dig_good = stats.dig_all.saturating_sub(stats.dig_error);
}

fn percent(numerator: f64, total: u32) -> f64 {
    numerator / f64::from(total) * 100.0
}
