//! CSV export of a produced schedule.
//!
//! One row per match: time range, court label, the four players with
//! gender/level annotations, and the three official names. This is the
//! result-sink boundary; anything beyond flat-file export (remote sheet
//! updates, printing) belongs to the consuming application.

use std::io::Write;

use csv::Writer;

use crate::models::{Player, Schedule};

const HEADER: [&str; 13] = [
    "Time",
    "Court",
    "A1",
    "A1 (G/Lv)",
    "A2",
    "A2 (G/Lv)",
    "B1",
    "B1 (G/Lv)",
    "B2",
    "B2 (G/Lv)",
    "Umpire",
    "Line judge 1",
    "Line judge 2",
];

fn annotate(player: &Player) -> String {
    format!("{}/Lv.{}", player.gender.code(), player.level)
}

/// Writes the schedule as CSV, ordered by slot then court.
pub fn write_schedule_csv<W: Write>(schedule: &Schedule, writer: W) -> csv::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    let mut ordered: Vec<_> = schedule.matches.iter().collect();
    ordered.sort_by_key(|m| (m.slot_index, m.court));

    for m in ordered {
        let [team_a, team_b] = &m.teams;
        wtr.write_record([
            format!(
                "{}-{}",
                m.start.format("%H:%M"),
                m.end.format("%H:%M")
            ),
            format!("Court {}", m.court),
            team_a[0].name.clone(),
            annotate(&team_a[0]),
            team_a[1].name.clone(),
            annotate(&team_a[1]),
            team_b[0].name.clone(),
            annotate(&team_b[0]),
            team_b[1].name.clone(),
            annotate(&team_b[1]),
            m.officials.umpire.name.clone(),
            m.officials.line1.name.clone(),
            m.officials.line2.name.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders the schedule as a CSV string.
pub fn schedule_to_csv_string(schedule: &Schedule) -> csv::Result<String> {
    let mut buf = Vec::new();
    write_schedule_csv(schedule, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
