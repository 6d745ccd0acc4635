//! Storage module for persisting harvested data
//!
//! This module handles all database operations for the harvester, including:
//! - SQLite database initialization and schema management
//! - Event, fight, fighter and round persistence
//! - Fighter and referee deduplication by name
//! - The latest-event-date query used for incremental cutoffs

mod schema;
mod sqlite;

pub use schema::initialize_schema;
pub use sqlite::SqliteStorage;
