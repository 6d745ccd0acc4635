//! Fetch layer: HTTP client construction, single retried fetches, and
//! bounded parallel fan-out.
//!
//! Nothing in this module knows about events, fights, or fighters; it
//! hands back parsed documents (or `None` after retry exhaustion) and
//! leaves the domain semantics to the extractors.

mod fetcher;
mod parallel;

pub use fetcher::{build_http_client, fetch_document, fetch_page};
pub use parallel::fetch_all;

/// Worker-pool width for general page batches (fight pages per event).
pub const DEFAULT_FETCH_WIDTH: usize = 10;

/// Worker-pool width for the always-exactly-two fighter pages per fight.
pub const FIGHTER_FETCH_WIDTH: usize = 2;
