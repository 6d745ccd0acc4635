//! Fighter profile extractor

use crate::document::Document;
use crate::extract::text::{parse_dob, parse_height, parse_reach};
use crate::model::Fighter;

const NAME_SELECTOR: &str = "span.b-content__title-highlight";
const DETAIL_LIST_SELECTOR: &str = "ul.b-list__box-list li";

/// Extracts a fighter record from a profile page.
///
/// The detail list is a sequence of `<li>` items of the form
/// `<i>HEIGHT:</i> 5' 11"`; each is split on its first colon into an
/// uppercase label and a value. Missing or malformed fields stay unknown.
pub fn extract_fighter(doc: &Document, link: &str) -> Fighter {
    let name = doc
        .select_first(NAME_SELECTOR)
        .map(|span| span.text())
        .filter(|name| !name.is_empty());
    if name.is_none() {
        tracing::warn!("Fighter name not found: {}", link);
    }

    let mut height = None;
    let mut reach = None;
    let mut dob = None;

    for item in doc.select_all(DETAIL_LIST_SELECTOR) {
        let text = item.text();
        let Some((label, value)) = text.split_once(':') else {
            tracing::debug!("Malformed detail item skipped: {}", link);
            continue;
        };
        let value = value.trim();
        match label.trim().to_uppercase().as_str() {
            "HEIGHT" => {
                height = parse_height(value);
                if height.is_none() {
                    tracing::debug!("Height parse failed for {}: {:?}", link, value);
                }
            }
            "REACH" => {
                reach = parse_reach(value);
                if reach.is_none() {
                    tracing::debug!("Reach parse failed for {}: {:?}", link, value);
                }
            }
            "DOB" => {
                dob = parse_dob(value);
                if dob.is_none() {
                    tracing::debug!("DOB parse failed for {}: {:?}", link, value);
                }
            }
            _ => {}
        }
    }

    Fighter {
        link: link.to_string(),
        name,
        height_in: height,
        reach_in: reach,
        dob,
    }
}
