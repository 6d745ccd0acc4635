use crate::model::Fight;
use chrono::NaiveDate;

/// A listing-row stub for a completed event: everything the index page
/// knows before the detail page has been fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStub {
    /// Detail-page URL; the event's identity.
    pub link: String,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
}

/// A completed event and the fights harvested from its detail page.
///
/// Created from a stub, mutated once by appending fights during the
/// detail fetch, never modified thereafter.
#[derive(Debug, Clone)]
pub struct Event {
    pub link: String,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub fights: Vec<Fight>,
}

impl Event {
    pub fn from_stub(stub: EventStub) -> Self {
        Self {
            link: stub.link,
            name: stub.name,
            date: stub.date,
            location: stub.location,
            fights: Vec::new(),
        }
    }
}
