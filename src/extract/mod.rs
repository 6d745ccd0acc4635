//! HTML-to-domain-model extractors
//!
//! One extractor per entity type, each a pure mapping from a parsed
//! document (or fragment) to a typed record or stub. Extractors tolerate
//! missing optional fields (yielding unknowns) and structurally absent
//! substructures (yielding empty results, logged); only the round/fighter
//! identity mismatch is a hard error, and it is scoped to one fight.

mod fight;
mod fighter;
mod listing;
mod rounds;
pub mod text;

pub use fight::{
    extract_details, extract_fight_links, extract_fighter_links, extract_outcome,
    extract_weight_label,
};
pub use fighter::extract_fighter;
pub use listing::extract_event_stubs;
pub use rounds::extract_round;
