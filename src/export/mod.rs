//! Export module: flat-file renditions of the harvested data.

mod csv;

pub use self::csv::write_events;
