//! Field-level text parsers
//!
//! Small pure functions shared by the entity extractors. Each returns an
//! unknown (`None`, or the `(-1, -1)` raw sentinel for counter pairs)
//! rather than an error when the input does not match its fixed pattern.

use crate::model::{FightOutcome, Gender};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static HEIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)'\s*(\d+)").expect("height regex"));
static REACH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("reach regex"));
static X_OF_Y_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*of\s*(\d+)").expect("x-of-y regex"));
static MM_SS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d+)").expect("mm:ss regex"));
static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+").expect("int regex"));

/// Weight-class keyword table, checked in order. "light heavy" must come
/// before the bare "light" substring, and "heavy" last, so that
/// light-heavyweight bouts are not misclassified.
const WEIGHT_CLASSES: [(&str, u16); 10] = [
    ("catch", 0),
    ("light heavy", 205),
    ("straw", 115),
    ("fly", 125),
    ("bantam", 135),
    ("feather", 145),
    ("light", 155),
    ("welter", 170),
    ("middle", 185),
    ("heavy", 265),
];

/// Parses a height like `5' 11"` into total inches. Values too large to
/// express in inches are unknown, not a panic.
pub fn parse_height(height: &str) -> Option<u32> {
    let caps = HEIGHT_RE.captures(height)?;
    let feet: u32 = caps[1].parse().ok()?;
    let inches: u32 = caps[2].parse().ok()?;
    feet.checked_mul(12)?.checked_add(inches)
}

/// Parses a reach like `76"` by taking the first integer substring.
pub fn parse_reach(reach: &str) -> Option<u32> {
    REACH_RE.find(reach)?.as_str().parse().ok()
}

/// Parses a date of birth in `Mon DD, YYYY` form (e.g. `Jul 19, 1987`).
pub fn parse_dob(dob: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(dob.trim(), "%b %d, %Y").ok()
}

/// Parses a listing date in `Month DD, YYYY` form (e.g. `July 19, 2025`).
pub fn parse_listing_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%B %d, %Y").ok()
}

/// Splits an `X of Y` counter pair into `(X, Y)`.
///
/// Returns the `(-1, -1)` sentinel when the string does not match; the
/// statistics extractor treats the sentinel as both-unknown, never as a
/// literal count.
pub fn split_x_of_y(stat: &str) -> (i64, i64) {
    match X_OF_Y_RE.captures(stat) {
        Some(caps) => {
            let landed = caps[1].parse().unwrap_or(-1);
            let attempted = caps[2].parse().unwrap_or(-1);
            (landed, attempted)
        }
        None => (-1, -1),
    }
}

/// Converts an `mm:ss` string into total seconds. A minute count too
/// large to express in seconds is unknown, not a panic.
pub fn parse_mm_ss(time: &str) -> Option<u32> {
    let caps = MM_SS_RE.captures(time)?;
    let minutes: u32 = caps[1].parse().ok()?;
    let seconds: u32 = caps[2].parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Parses a bare non-negative integer cell.
pub fn parse_count(text: &str) -> Option<u32> {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Maps a bout label to its weight limit in pounds (0 = catchweight),
/// first matching keyword in the fixed priority table winning.
pub fn map_weight_class(label: &str) -> Option<u16> {
    let label = label.to_lowercase();
    WEIGHT_CLASSES
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, limit)| *limit)
}

/// Infers gender from a bout label ("women" substring, case-insensitive).
pub fn infer_gender(label: &str) -> Gender {
    if label.to_lowercase().contains("women") {
        Gender::Female
    } else {
        Gender::Male
    }
}

/// Infers title-bout status from a bout label.
pub fn is_title_fight(label: &str) -> bool {
    label.to_lowercase().contains("title")
}

/// Maps the W/L/D/NC marker next to fighter A to a fight outcome.
pub fn parse_outcome(marker: &str) -> Option<FightOutcome> {
    FightOutcome::from_marker(marker)
}

/// Extracts the scheduled round count from a time-format label such as
/// `3 Rnd (5-5-5)`.
pub fn parse_time_format(value: &str) -> Option<u8> {
    LEADING_INT_RE.find(value)?.as_str().parse().ok()
}

/// Parses the round-of-victory cell, 1-5.
pub fn parse_round_number(value: &str) -> Option<u8> {
    value.trim().parse().ok()
}
