//! Fight-page extractors
//!
//! Everything parsed directly off an event or fight detail page: the
//! doNav() fight links embedded in listing-row onclick attributes, the
//! fighter-link pair, the result marker, the bout label, and the
//! label/value details block (method, round, time, time format, referee).

use crate::document::Document;
use crate::model::FightOutcome;
use crate::{Result, ScrapeError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static DO_NAV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"doNav\('([^']+)'\)").expect("doNav regex"));

const FIGHT_ROW_SELECTOR: &str = "tr[onclick]";
const PERSON_LINK_SELECTOR: &str = "div.b-fight-details__persons a.b-fight-details__person-link";
const PERSON_STATUS_SELECTOR: &str = "div.b-fight-details__person i.b-fight-details__person-status";
const BOUT_LABEL_SELECTOR: &str = "i.b-fight-details__fight-title";
const DETAILS_BLOCK_SELECTOR: &str = "div.b-fight-details__content p.b-fight-details__text";
const DETAILS_LABEL_SELECTOR: &str = "i.b-fight-details__label";

/// Extracts fight detail-page links from an event page.
///
/// Fight rows carry an inline navigation callback rather than an anchor;
/// the target URL is matched out of the `doNav('...')` attribute. Rows
/// whose target is not a fight-details page are ignored.
pub fn extract_fight_links(doc: &Document, event_link: &str) -> Vec<String> {
    let rows = doc.select_all(FIGHT_ROW_SELECTOR);
    if rows.is_empty() {
        tracing::warn!("No fight rows with a navigation callback found: {}", event_link);
        return Vec::new();
    }

    let mut links = Vec::new();
    for row in rows {
        let Some(onclick) = row.attr("onclick") else {
            continue;
        };
        if let Some(caps) = DO_NAV_RE.captures(onclick) {
            let link = caps[1].trim();
            if link.contains("/fight-details/") {
                links.push(link.to_string());
            }
        }
    }

    if links.is_empty() {
        tracing::warn!("No fight links extracted from event page: {}", event_link);
    }
    links
}

/// Extracts the two fighter profile links from a fight page.
///
/// A fight without exactly two fighter links is abandoned rather than
/// persisted half-formed.
pub fn extract_fighter_links(doc: &Document, fight_link: &str) -> Result<(String, String)> {
    let anchors = doc.select_all(PERSON_LINK_SELECTOR);
    if anchors.len() != 2 {
        return Err(ScrapeError::FighterPair {
            url: fight_link.to_string(),
            found: anchors.len(),
        });
    }

    let link_of = |idx: usize| -> Option<String> {
        anchors[idx].attr("href").map(|href| href.trim().to_string())
    };
    match (link_of(0), link_of(1)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ScrapeError::FighterPair {
            url: fight_link.to_string(),
            found: 0,
        }),
    }
}

/// Reads the W/L/D/NC marker shown beside fighter A, if present.
pub fn extract_outcome(doc: &Document) -> Option<FightOutcome> {
    let marker = doc.select_first(PERSON_STATUS_SELECTOR)?.text();
    FightOutcome::from_marker(&marker)
}

/// Returns the bout label text (e.g. "UFC Women's Flyweight Title Bout"),
/// from which weight class, gender and title status are all inferred.
pub fn extract_weight_label(doc: &Document) -> Option<String> {
    doc.select_first(BOUT_LABEL_SELECTOR)
        .map(|label| label.text())
        .filter(|label| !label.is_empty())
}

/// Parses the fight details block into a map keyed by uppercase label.
///
/// Each label tag sits inside a text item whose full text reads like
/// `Method: KO/TKO`; the value is everything after the first colon of the
/// label's parent, whitespace-collapsed.
pub fn extract_details(doc: &Document) -> HashMap<String, String> {
    let mut details = HashMap::new();
    let Some(block) = doc.select_first(DETAILS_BLOCK_SELECTOR) else {
        return details;
    };

    for label_tag in block.select_all(DETAILS_LABEL_SELECTOR) {
        let label = label_tag
            .text()
            .trim_end_matches(':')
            .trim()
            .to_uppercase();
        let Some(parent) = label_tag.parent() else {
            continue;
        };
        let parent_text = parent.text();
        let value = parent_text
            .split_once(':')
            .map(|(_, rest)| rest.trim().to_string())
            .unwrap_or_default();
        details.insert(label, value);
    }

    details
}
