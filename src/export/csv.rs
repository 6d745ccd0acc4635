//! Flat CSV export
//!
//! One row per fight, denormalized: event columns, both fighter profiles,
//! fight columns, then five fixed round blocks (fighter A's counters then
//! fighter B's for each round). Fights that ended early pad the remaining
//! round blocks with empty cells, keeping every row the same width.

use crate::model::{Event, Fight, RoundStats};
use crate::Result;
use std::path::Path;

const MAX_ROUNDS: usize = 5;

/// Writes every fight of every event to `path`, overwriting the file.
pub fn write_events(path: &Path, events: &[Event]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(header())?;
    for event in events {
        for fight in &event.fights {
            writer.write_record(row(event, fight))?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn header() -> Vec<String> {
    let mut columns: Vec<String> = [
        "event_name",
        "event_date",
        "event_location",
        "event_link",
        "fighter_a_name",
        "fighter_a_link",
        "fighter_a_height_in",
        "fighter_a_reach_in",
        "fighter_a_dob",
        "fighter_b_name",
        "fighter_b_link",
        "fighter_b_height_in",
        "fighter_b_reach_in",
        "fighter_b_dob",
        "fight_link",
        "winner",
        "weight_class",
        "gender",
        "title_fight",
        "method_of_victory",
        "round_of_victory",
        "time_of_victory_sec",
        "time_format",
        "referee",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();

    for round in 1..=MAX_ROUNDS {
        for side in ["a", "b"] {
            for counter in RoundStats::COUNTER_NAMES {
                columns.push(format!("round_{}_fighter_{}_{}", round, side, counter));
            }
        }
    }
    columns
}

fn row(event: &Event, fight: &Fight) -> Vec<String> {
    let mut cells = vec![
        opt_str(event.name.as_deref()),
        opt_display(event.date.map(|d| d.format("%Y-%m-%d"))),
        opt_str(event.location.as_deref()),
        event.link.clone(),
    ];

    for fighter in [&fight.fighter_a, &fight.fighter_b] {
        cells.push(opt_str(fighter.name.as_deref()));
        cells.push(fighter.link.clone());
        cells.push(opt_display(fighter.height_in));
        cells.push(opt_display(fighter.reach_in));
        cells.push(opt_display(fighter.dob.map(|d| d.format("%Y-%m-%d"))));
    }

    cells.push(fight.link.clone());
    cells.push(opt_str(fight.winner.map(|w| w.to_db_string())));
    cells.push(opt_display(fight.weight_class));
    cells.push(fight.gender.to_db_string().to_string());
    cells.push(fight.title_fight.to_string());
    cells.push(opt_str(fight.method_of_victory.as_deref()));
    cells.push(opt_display(fight.round_of_victory));
    cells.push(opt_display(fight.time_of_victory_sec));
    cells.push(opt_display(fight.time_format));
    cells.push(opt_str(fight.referee.as_deref()));

    let empty = RoundStats::default();
    for round_number in 1..=MAX_ROUNDS as u8 {
        let round = fight
            .rounds
            .iter()
            .find(|r| r.round_number == round_number);
        let (a, b) = match round {
            Some(r) => (&r.fighter_a_stats, &r.fighter_b_stats),
            None => (&empty, &empty),
        };
        for side in [a, b] {
            for counter in side.counters() {
                cells.push(opt_display(counter));
            }
        }
    }

    cells
}

fn opt_str(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn opt_display<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FightOutcome, Fighter, Gender, Round};
    use chrono::NaiveDate;

    fn sample_event() -> Event {
        let fighter_a = Fighter {
            link: "http://e.com/f/a".to_string(),
            name: Some("A Fighter".to_string()),
            height_in: Some(70),
            reach_in: Some(72),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1),
        };
        let fighter_b = Fighter::unresolved("http://e.com/f/b");

        let rounds = (1..=2)
            .map(|n| Round {
                round_number: n,
                fighter_a_stats: RoundStats {
                    fighter_link: Some(fighter_a.link.clone()),
                    knockdowns: Some(1),
                    ..Default::default()
                },
                fighter_b_stats: RoundStats {
                    fighter_link: Some(fighter_b.link.clone()),
                    knockdowns: Some(0),
                    ..Default::default()
                },
            })
            .collect();

        let fight = Fight {
            link: "http://e.com/fight-details/1".to_string(),
            fighter_a,
            fighter_b,
            winner: Some(FightOutcome::FighterA),
            weight_class: Some(155),
            gender: Gender::Male,
            title_fight: false,
            method_of_victory: Some("Submission".to_string()),
            round_of_victory: Some(2),
            time_of_victory_sec: Some(150),
            time_format: Some(3),
            referee: Some("Herb Dean".to_string()),
            rounds,
        };

        Event {
            link: "http://e.com/event-details/1".to_string(),
            name: Some("UFC 300".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 4, 13),
            location: Some("Las Vegas".to_string()),
            fights: vec![fight],
        }
    }

    #[test]
    fn test_header_and_row_widths_match() {
        let event = sample_event();
        assert_eq!(header().len(), row(&event, &event.fights[0]).len());
        // 24 flat columns + 5 rounds * 2 fighters * 20 counters
        assert_eq!(header().len(), 24 + 5 * 2 * 20);
    }

    #[test]
    fn test_uncontested_rounds_are_empty() {
        let event = sample_event();
        let cells = row(&event, &event.fights[0]);
        let head = header();

        let kd_r2 = head
            .iter()
            .position(|c| c == "round_2_fighter_a_knockdowns")
            .unwrap();
        assert_eq!(cells[kd_r2], "1");

        // The fight ended in round 2; round 3 onward is all padding.
        let r3_start = head
            .iter()
            .position(|c| c.starts_with("round_3_"))
            .unwrap();
        assert!(cells[r3_start..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_write_events_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let event = sample_event();

        write_events(&path, &[event]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header_line = lines.next().unwrap();
        let row_line = lines.next().unwrap();
        assert!(header_line.starts_with("event_name,event_date"));
        assert!(row_line.contains("UFC 300"));
        assert!(row_line.contains("Herb Dean"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_unknown_fields_serialize_as_empty() {
        let mut event = sample_event();
        event.name = None;
        event.fights[0].winner = None;

        let cells = row(&event, &event.fights[0]);
        let head = header();
        let name_idx = head.iter().position(|c| c == "event_name").unwrap();
        let winner_idx = head.iter().position(|c| c == "winner").unwrap();
        assert_eq!(cells[name_idx], "");
        assert_eq!(cells[winner_idx], "");
    }
}
