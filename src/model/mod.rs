//! Typed domain records for the harvested data
//!
//! Ownership runs strictly downward: an [`Event`] owns its [`Fight`]s, a
//! fight owns its [`Round`]s, and a round owns its two [`RoundStats`]
//! blocks. [`Fighter`] records are shared through the run-scoped cache and
//! copied by value into each fight that mentions them. All records are
//! plain data - construction never fetches or parses anything.

mod event;
mod fight;
mod fighter;
mod round;

pub use event::{Event, EventStub};
pub use fight::{Fight, FightOutcome, Gender};
pub use fighter::Fighter;
pub use round::{Round, RoundStats};
