//! SQLite storage implementation
//!
//! Persists the harvested event graph. Fighters and referees are
//! deduplicated by name across the whole database, so a fighter appearing
//! on many cards maps to a single row; unnamed fighters cannot be matched
//! and get one row each.

use crate::model::{Event, Fight, Fighter, Round, RoundStats};
use crate::storage::schema::initialize_schema;
use crate::Result;
use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Transaction};
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Date of the most recent stored event, used as the default cutoff
    /// for incremental runs. An empty database yields `None`.
    pub fn latest_event_date(&self) -> Result<Option<NaiveDate>> {
        let latest: Option<String> =
            self.conn
                .query_row("SELECT MAX(date) FROM event", [], |row| row.get(0))?;
        Ok(latest.and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok()))
    }

    /// Saves a batch of events with their full fight graphs in one
    /// transaction. Safe to call with a partially harvested batch; an
    /// event whose link is already stored is skipped.
    pub fn save_events(&mut self, events: &[Event]) -> Result<()> {
        let tx = self.conn.transaction()?;

        for event in events {
            let already_stored: Option<i64> = tx
                .query_row(
                    "SELECT id FROM event WHERE link = ?1",
                    params![event.link],
                    |row| row.get(0),
                )
                .optional()?;
            if already_stored.is_some() {
                tracing::debug!("Event already stored, skipping: {}", event.link);
                continue;
            }

            tx.execute(
                "INSERT INTO event (name, date, location, link) VALUES (?1, ?2, ?3, ?4)",
                params![
                    event.name,
                    event.date.map(|d| d.format(DATE_FORMAT).to_string()),
                    event.location,
                    event.link
                ],
            )?;
            let event_id = tx.last_insert_rowid();

            for fight in &event.fights {
                insert_fight(&tx, event_id, fight)?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    pub fn count_events(&self) -> Result<i64> {
        self.count("event")
    }

    pub fn count_fights(&self) -> Result<i64> {
        self.count("fight")
    }

    pub fn count_fighters(&self) -> Result<i64> {
        self.count("fighter")
    }

    pub fn count_rounds(&self) -> Result<i64> {
        self.count("round")
    }

    fn count(&self, table: &str) -> Result<i64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn insert_fight(tx: &Transaction<'_>, event_id: i64, fight: &Fight) -> Result<()> {
    let fighter_a_id = upsert_fighter(tx, &fight.fighter_a)?;
    let fighter_b_id = upsert_fighter(tx, &fight.fighter_b)?;
    let referee_id = match &fight.referee {
        Some(name) => Some(upsert_referee(tx, name)?),
        None => None,
    };

    tx.execute(
        "INSERT INTO fight (event_id, fighter_a_id, fighter_b_id, winner, weight_class,
                            gender, title_fight, method_of_victory, round_of_victory,
                            time_of_victory_sec, time_format, referee_id, link)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            event_id,
            fighter_a_id,
            fighter_b_id,
            fight.winner.map(|w| w.to_db_string()),
            fight.weight_class,
            fight.gender.to_db_string(),
            fight.title_fight,
            fight.method_of_victory,
            fight.round_of_victory,
            fight.time_of_victory_sec,
            fight.time_format,
            referee_id,
            fight.link
        ],
    )?;
    let fight_id = tx.last_insert_rowid();

    for round in &fight.rounds {
        insert_round(tx, fight_id, round, fighter_a_id, fighter_b_id)?;
    }

    Ok(())
}

/// Inserts a fighter, or returns the existing row matched by name.
/// Unnamed fighters cannot be matched and always get a fresh row.
fn upsert_fighter(tx: &Transaction<'_>, fighter: &Fighter) -> Result<i64> {
    if let Some(name) = &fighter.name {
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM fighter WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            return Ok(id);
        }
    }

    tx.execute(
        "INSERT INTO fighter (name, height_in, reach_in, dob, link) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fighter.name,
            fighter.height_in,
            fighter.reach_in,
            fighter.dob.map(|d| d.format(DATE_FORMAT).to_string()),
            fighter.link
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

fn upsert_referee(tx: &Transaction<'_>, name: &str) -> Result<i64> {
    tx.execute(
        "INSERT OR IGNORE INTO referee (name) VALUES (?1)",
        params![name],
    )?;
    let id = tx.query_row(
        "SELECT id FROM referee WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(id)
}

fn insert_round(
    tx: &Transaction<'_>,
    fight_id: i64,
    round: &Round,
    fighter_a_id: i64,
    fighter_b_id: i64,
) -> Result<()> {
    tx.execute(
        "INSERT INTO round (fight_id, round_number) VALUES (?1, ?2)",
        params![fight_id, round.round_number],
    )?;
    let round_id = tx.last_insert_rowid();

    insert_round_stats(tx, round_id, fighter_a_id, &round.fighter_a_stats)?;
    insert_round_stats(tx, round_id, fighter_b_id, &round.fighter_b_stats)?;
    Ok(())
}

fn insert_round_stats(
    tx: &Transaction<'_>,
    round_id: i64,
    fighter_id: i64,
    stats: &RoundStats,
) -> Result<()> {
    let columns = RoundStats::COUNTER_NAMES.join(", ");
    let placeholders: Vec<String> = (3..=RoundStats::COUNTER_NAMES.len() + 2)
        .map(|i| format!("?{}", i))
        .collect();
    let sql = format!(
        "INSERT INTO roundstats (round_id, fighter_id, {}) VALUES (?1, ?2, {})",
        columns,
        placeholders.join(", ")
    );

    let mut values: Vec<Option<i64>> = vec![Some(round_id), Some(fighter_id)];
    values.extend(stats.counters().iter().map(|c| c.map(i64::from)));
    tx.execute(&sql, params_from_iter(values))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FightOutcome, Gender};
    use chrono::NaiveDate;

    fn fighter(name: &str, link: &str) -> Fighter {
        Fighter {
            link: link.to_string(),
            name: Some(name.to_string()),
            height_in: Some(70),
            reach_in: Some(72),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1),
        }
    }

    fn round(n: u8, link_a: &str, link_b: &str) -> Round {
        Round {
            round_number: n,
            fighter_a_stats: RoundStats {
                fighter_link: Some(link_a.to_string()),
                knockdowns: Some(1),
                control_time_seconds: Some(120),
                ..Default::default()
            },
            fighter_b_stats: RoundStats {
                fighter_link: Some(link_b.to_string()),
                knockdowns: Some(0),
                ..Default::default()
            },
        }
    }

    fn fight(link: &str, a: Fighter, b: Fighter, rounds: Vec<Round>) -> Fight {
        Fight {
            link: link.to_string(),
            fighter_a: a,
            fighter_b: b,
            winner: Some(FightOutcome::FighterA),
            weight_class: Some(155),
            gender: Gender::Male,
            title_fight: false,
            method_of_victory: Some("KO/TKO".to_string()),
            round_of_victory: Some(1),
            time_of_victory_sec: Some(260),
            time_format: Some(3),
            referee: Some("Herb Dean".to_string()),
            rounds,
        }
    }

    fn event(link: &str, date: (i32, u32, u32), fights: Vec<Fight>) -> Event {
        Event {
            link: link.to_string(),
            name: Some("Test Event".to_string()),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            location: Some("Las Vegas".to_string()),
            fights,
        }
    }

    #[test]
    fn test_save_full_graph() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let a = fighter("A", "http://e.com/f/a");
        let b = fighter("B", "http://e.com/f/b");
        let f = fight(
            "http://e.com/fight-details/1",
            a,
            b,
            vec![round(1, "http://e.com/f/a", "http://e.com/f/b")],
        );
        let ev = event("http://e.com/event-details/1", (2024, 4, 13), vec![f]);

        storage.save_events(&[ev]).unwrap();

        assert_eq!(storage.count_events().unwrap(), 1);
        assert_eq!(storage.count_fights().unwrap(), 1);
        assert_eq!(storage.count_fighters().unwrap(), 2);
        assert_eq!(storage.count_rounds().unwrap(), 1);

        let stats_rows: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM roundstats", [], |r| r.get(0))
            .unwrap();
        assert_eq!(stats_rows, 2);
    }

    #[test]
    fn test_fighter_deduplicated_by_name() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let a = fighter("Shared", "http://e.com/f/s");
        let b = fighter("Other", "http://e.com/f/o");
        let c = fighter("Third", "http://e.com/f/t");
        let f1 = fight("http://e.com/fight-details/1", a.clone(), b, vec![]);
        let f2 = fight("http://e.com/fight-details/2", a, c, vec![]);
        let ev = event("http://e.com/event-details/1", (2024, 4, 13), vec![f1, f2]);

        storage.save_events(&[ev]).unwrap();
        assert_eq!(storage.count_fighters().unwrap(), 3);
    }

    #[test]
    fn test_referee_deduplicated_by_name() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let f1 = fight(
            "http://e.com/fight-details/1",
            fighter("A", "http://e.com/f/a"),
            fighter("B", "http://e.com/f/b"),
            vec![],
        );
        let f2 = fight(
            "http://e.com/fight-details/2",
            fighter("C", "http://e.com/f/c"),
            fighter("D", "http://e.com/f/d"),
            vec![],
        );
        let ev = event("http://e.com/event-details/1", (2024, 4, 13), vec![f1, f2]);

        storage.save_events(&[ev]).unwrap();
        let referees: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM referee", [], |r| r.get(0))
            .unwrap();
        assert_eq!(referees, 1);
    }

    #[test]
    fn test_latest_event_date() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.latest_event_date().unwrap(), None);

        let e1 = event("http://e.com/event-details/1", (2024, 3, 9), vec![]);
        let e2 = event("http://e.com/event-details/2", (2024, 4, 13), vec![]);
        storage.save_events(&[e1, e2]).unwrap();

        assert_eq!(
            storage.latest_event_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 13)
        );
    }

    #[test]
    fn test_resaving_event_is_skipped() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let ev = event("http://e.com/event-details/1", (2024, 4, 13), vec![]);

        storage.save_events(&[ev.clone()]).unwrap();
        storage.save_events(&[ev]).unwrap();
        assert_eq!(storage.count_events().unwrap(), 1);
    }

    #[test]
    fn test_unnamed_fighters_not_merged() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let f = fight(
            "http://e.com/fight-details/1",
            Fighter::unresolved("http://e.com/f/x"),
            Fighter::unresolved("http://e.com/f/y"),
            vec![],
        );
        let ev = event("http://e.com/event-details/1", (2024, 4, 13), vec![f]);

        storage.save_events(&[ev]).unwrap();
        assert_eq!(storage.count_fighters().unwrap(), 2);
    }
}
