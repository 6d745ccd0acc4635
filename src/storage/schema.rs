//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the cagestats database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Scraped events
CREATE TABLE IF NOT EXISTS event (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    date TEXT,
    location TEXT,
    link TEXT NOT NULL UNIQUE
);

CREATE INDEX IF NOT EXISTS idx_event_date ON event(date);

-- Fighters, deduplicated by name across events
CREATE TABLE IF NOT EXISTS fighter (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    height_in INTEGER,
    reach_in INTEGER,
    dob TEXT,
    link TEXT
);

CREATE INDEX IF NOT EXISTS idx_fighter_name ON fighter(name);

-- Referees, deduplicated by name
CREATE TABLE IF NOT EXISTS referee (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- One row per fight
CREATE TABLE IF NOT EXISTS fight (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL REFERENCES event(id),
    fighter_a_id INTEGER REFERENCES fighter(id),
    fighter_b_id INTEGER REFERENCES fighter(id),
    winner TEXT,
    weight_class INTEGER,
    gender TEXT NOT NULL,
    title_fight INTEGER NOT NULL,
    method_of_victory TEXT,
    round_of_victory INTEGER,
    time_of_victory_sec INTEGER,
    time_format INTEGER,
    referee_id INTEGER REFERENCES referee(id),
    link TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_fight_event ON fight(event_id);

-- One row per contested round
CREATE TABLE IF NOT EXISTS round (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fight_id INTEGER NOT NULL REFERENCES fight(id),
    round_number INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_round_fight ON round(fight_id);

-- Two rows per round, one per fighter; NULL counters mean unknown
CREATE TABLE IF NOT EXISTS roundstats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    round_id INTEGER NOT NULL REFERENCES round(id),
    fighter_id INTEGER REFERENCES fighter(id),
    knockdowns INTEGER,
    non_sig_strikes_landed INTEGER,
    non_sig_strikes_attempted INTEGER,
    takedowns_landed INTEGER,
    takedowns_attempted INTEGER,
    submission_attempts INTEGER,
    reversals INTEGER,
    control_time_seconds INTEGER,
    head_strikes_landed INTEGER,
    head_strikes_attempted INTEGER,
    body_strikes_landed INTEGER,
    body_strikes_attempted INTEGER,
    leg_strikes_landed INTEGER,
    leg_strikes_attempted INTEGER,
    distance_strikes_landed INTEGER,
    distance_strikes_attempted INTEGER,
    clinch_strikes_landed INTEGER,
    clinch_strikes_attempted INTEGER,
    ground_strikes_landed INTEGER,
    ground_strikes_attempted INTEGER
);

CREATE INDEX IF NOT EXISTS idx_roundstats_round ON roundstats(round_id);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
