//! Completed-events listing extractor
//!
//! Walks the index page's events table in document order, starting
//! immediately after the "upcoming event" marker row (which represents a
//! not-yet-occurred event and is never included), and stops - not skips -
//! at the first row dated at or before the caller's cutoff, since rows
//! are in reverse-chronological order and everything older is already
//! known.

use crate::document::Document;
use crate::extract::text::parse_listing_date;
use crate::model::EventStub;
use chrono::NaiveDate;

const LISTING_TABLE: &str = "table.b-statistics__table-events";
const ROW_CLASS: &str = "b-statistics__table-row";
const FUTURE_MARKER_CLASS: &str = "b-statistics__table-row_type_first";

/// Extracts event stubs from the completed-events listing page.
///
/// Structural absences (no table, no marker row) yield an empty result
/// and a log line; they are not errors.
pub fn extract_event_stubs(doc: &Document, cutoff: Option<NaiveDate>) -> Vec<EventStub> {
    let Some(table) = doc.select_first(LISTING_TABLE) else {
        tracing::warn!("Events table not found on listing page");
        return Vec::new();
    };

    let rows = table.select_all("tr");
    let Some(marker_idx) = rows.iter().position(|row| row.has_class(FUTURE_MARKER_CLASS)) else {
        tracing::warn!("Upcoming-event marker row not found; no events to parse");
        return Vec::new();
    };

    let mut stubs = Vec::new();
    for row in rows.iter().skip(marker_idx + 1) {
        if !row.has_class(ROW_CLASS) {
            continue;
        }

        let date = row
            .select_first("span")
            .map(|span| span.text())
            .and_then(|text| parse_listing_date(&text));

        // Rows are newest-first: the first known-or-older date ends the walk.
        if let (Some(cutoff), Some(date)) = (cutoff, date) {
            if date <= cutoff {
                break;
            }
        }

        let anchor = row.select_first("a");
        let Some(link) = anchor.as_ref().and_then(|a| a.attr("href")) else {
            tracing::warn!("Listing row without an event link skipped");
            continue;
        };

        let name = anchor.map(|a| a.text()).filter(|name| !name.is_empty());
        let location = row
            .select_all("td")
            .get(1)
            .map(|td| td.text())
            .filter(|loc| !loc.is_empty());

        stubs.push(EventStub {
            link: link.trim().to_string(),
            name,
            date,
            location,
        });
    }

    stubs
}
