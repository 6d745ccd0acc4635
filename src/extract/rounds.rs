//! Per-round statistics extractor
//!
//! The fight page repeats each "Round N" header twice, once above the
//! totals row and once above the significant-strikes breakdown row. Both
//! rows carry two stacked values per cell (one per fighter), tagged with
//! the fighter's profile link. Sides are assigned by matching those links
//! against the fight's known fighter pair, never by column position.

use crate::document::{Document, Node};
use crate::extract::text::{parse_count, parse_mm_ss, split_x_of_y};
use crate::model::{Round, RoundStats};
use crate::{Result, ScrapeError};
use std::collections::HashMap;

// Column indexes in the totals row.
const TOTALS_KNOCKDOWNS: usize = 1;
const TOTALS_SIG_STRIKES: usize = 2;
const TOTALS_TOTAL_STRIKES: usize = 4;
const TOTALS_TAKEDOWNS: usize = 5;
const TOTALS_SUB_ATTEMPTS: usize = 7;
const TOTALS_REVERSALS: usize = 8;
const TOTALS_CONTROL: usize = 9;

// Column indexes in the significant-strikes row.
const SIG_HEAD: usize = 3;
const SIG_BODY: usize = 4;
const SIG_LEG: usize = 5;
const SIG_DISTANCE: usize = 6;
const SIG_CLINCH: usize = 7;
const SIG_GROUND: usize = 8;

/// Extracts one round's statistics pair, assigning sides by fighter link.
///
/// `fighter_links` is the `(a, b)` pair already extracted from the fight
/// header. A row set whose identity tokens do not cover exactly that pair
/// is a hard error; the caller abandons the fight rather than guessing.
pub fn extract_round(
    doc: &Document,
    round_number: u8,
    fighter_links: (&str, &str),
) -> Result<Round> {
    let header = format!("Round {round_number}");
    let rows = doc.header_then_row(&header);
    let totals_row = rows.first();
    let sig_row = rows.get(1);

    let mut by_link: HashMap<String, RoundStats> = HashMap::new();
    for position in 0..2 {
        let stats = read_side(totals_row, sig_row, position);
        if let Some(link) = stats.fighter_link.clone() {
            by_link.insert(link, stats);
        }
    }

    let (link_a, link_b) = fighter_links;
    let found: Vec<String> = by_link.keys().cloned().collect();
    let a_stats = by_link.remove(link_a);
    let b_stats = by_link.remove(link_b);
    match (a_stats, b_stats) {
        (Some(fighter_a_stats), Some(fighter_b_stats)) => Ok(Round {
            round_number,
            fighter_a_stats,
            fighter_b_stats,
        }),
        _ => Err(ScrapeError::RoundIdentity {
            round: round_number,
            expected: (link_a.to_string(), link_b.to_string()),
            found,
        }),
    }
}

/// Reads one fighter's counters from the stacked cells at `position`
/// (0 = upper value, 1 = lower value) of the totals and sig rows.
fn read_side(totals_row: Option<&Node<'_>>, sig_row: Option<&Node<'_>>, position: usize) -> RoundStats {
    let mut stats = RoundStats::default();

    if let Some(row) = totals_row {
        stats.fighter_link = row
            .select_all("td")
            .first()
            .and_then(|td| td.select_all("a").get(position).copied())
            .and_then(|a| a.attr("href"))
            .map(|href| href.trim().to_string());

        stats.knockdowns = cell_text(row, TOTALS_KNOCKDOWNS, position)
            .as_deref()
            .and_then(parse_count);

        let (sig_landed, sig_attempted) = pair(row, TOTALS_SIG_STRIKES, position);
        let (total_landed, total_attempted) = pair(row, TOTALS_TOTAL_STRIKES, position);
        // Non-significant strikes exist only as the difference of the two
        // published pairs, so both must have parsed.
        stats.non_sig_strikes_landed = derive_non_sig(total_landed, sig_landed);
        stats.non_sig_strikes_attempted = derive_non_sig(total_attempted, sig_attempted);

        let (td_landed, td_attempted) = pair(row, TOTALS_TAKEDOWNS, position);
        stats.takedowns_landed = non_negative(td_landed);
        stats.takedowns_attempted = non_negative(td_attempted);

        stats.submission_attempts = cell_text(row, TOTALS_SUB_ATTEMPTS, position)
            .as_deref()
            .and_then(parse_count);
        stats.reversals = cell_text(row, TOTALS_REVERSALS, position)
            .as_deref()
            .and_then(parse_count);
        stats.control_time_seconds = cell_text(row, TOTALS_CONTROL, position)
            .as_deref()
            .and_then(parse_mm_ss);
    }

    if let Some(row) = sig_row {
        if stats.fighter_link.is_none() {
            stats.fighter_link = row
                .select_all("td")
                .first()
                .and_then(|td| td.select_all("a").get(position).copied())
                .and_then(|a| a.attr("href"))
                .map(|href| href.trim().to_string());
        }

        let targets = [
            (SIG_HEAD, 0usize),
            (SIG_BODY, 1),
            (SIG_LEG, 2),
            (SIG_DISTANCE, 3),
            (SIG_CLINCH, 4),
            (SIG_GROUND, 5),
        ];
        let mut parsed = [(None, None); 6];
        for (cell_idx, slot) in targets {
            let (landed, attempted) = pair(row, cell_idx, position);
            parsed[slot] = (non_negative(landed), non_negative(attempted));
        }
        (stats.head_strikes_landed, stats.head_strikes_attempted) = parsed[0];
        (stats.body_strikes_landed, stats.body_strikes_attempted) = parsed[1];
        (stats.leg_strikes_landed, stats.leg_strikes_attempted) = parsed[2];
        (stats.distance_strikes_landed, stats.distance_strikes_attempted) = parsed[3];
        (stats.clinch_strikes_landed, stats.clinch_strikes_attempted) = parsed[4];
        (stats.ground_strikes_landed, stats.ground_strikes_attempted) = parsed[5];
    }

    stats
}

/// Text of the `position`-th stacked `<p>` inside the `idx`-th `<td>`.
fn cell_text(row: &Node<'_>, idx: usize, position: usize) -> Option<String> {
    row.select_all("td")
        .get(idx)
        .and_then(|td| td.select_all("p").get(position).copied())
        .map(|p| p.text())
}

fn pair(row: &Node<'_>, idx: usize, position: usize) -> (i64, i64) {
    match cell_text(row, idx, position) {
        Some(text) => split_x_of_y(&text),
        None => (-1, -1),
    }
}

fn non_negative(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

fn derive_non_sig(total: i64, sig: i64) -> Option<u32> {
    if total < 0 || sig < 0 {
        return None;
    }
    u32::try_from(total - sig).ok()
}
