//! Harvest module: the run orchestrator.
//!
//! Walks the event listing, fans out over fight pages per event, resolves
//! fighter profiles through the shared cache, and flushes the accumulated
//! event graph to both persistence sinks at the end of the run (or early,
//! on interrupt).

mod coordinator;

pub use coordinator::{Harvester, RunOutcome};
