//! CSV export of the per-player table.

use crate::models::{MatchStats, StatKey, TeamSide};
use std::io::Write;

/// Write one header row and one row per player (first-sighting order).
/// Columns: name, team, number, then every [`StatKey`] in order.
pub fn write_csv<W: Write>(stats: &MatchStats, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["name", "team", "number"];
    header.extend(StatKey::ALL.iter().map(|k| k.as_str()));
    writer.write_record(&header)?;

    for p in &stats.players {
        let mut record = vec![p.name.clone(), team_label(p.team).to_string(), p.number.clone()];
        record.extend(StatKey::ALL.iter().map(|&k| format_value(p.value(k))));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn team_label(team: TeamSide) -> &'static str {
    match team {
        TeamSide::Home => "home",
        TeamSide::Away => "away",
        TeamSide::Unknown => "unknown",
    }
}

/// Whole numbers without a fraction, percentages to two decimals.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}
