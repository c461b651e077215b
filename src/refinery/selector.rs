// * Table Selector
// * Picks the vessel listing among every table on the page: most recognised
// * header labels wins, width breaks ties, widest table when nothing is recognised.

use serde::Serialize;
use tracing::debug;

use crate::config::constants::MIN_PROMOTED_HEADER_MATCHES;
use crate::refinery::columns::recognized_count;
use crate::refinery::tables::TableCandidate;
use crate::refinery::vocabulary::Vocabulary;

/// Selection score of one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableScore {
    pub index: usize,
    pub recognized_headers: usize,
    pub width: usize,
}

/// Scores a single candidate
pub fn score_table(index: usize, table: &TableCandidate, vocab: &Vocabulary) -> TableScore {
    TableScore {
        index,
        recognized_headers: recognized_count(&table.header_labels, vocab),
        width: table.width(),
    }
}

/// Selects the best candidate; `None` only for an empty list.
///
/// Pure function of its input: ties on both criteria keep the earliest table.
pub fn select_table(candidates: &[TableCandidate], vocab: &Vocabulary) -> Option<TableScore> {
    let scores: Vec<TableScore> = candidates
        .iter()
        .enumerate()
        .map(|(i, table)| score_table(i, table, vocab))
        .collect();

    let best = scores.iter().copied().fold(None, |best: Option<TableScore>, score| match best {
        Some(current)
            if (current.recognized_headers, current.width)
                >= (score.recognized_headers, score.width) =>
        {
            Some(current)
        }
        _ => Some(score),
    })?;

    debug!(
        index = best.index,
        recognized_headers = best.recognized_headers,
        width = best.width,
        candidates = candidates.len(),
        "Table selected"
    );
    Some(best)
}

/// Promotes the first row of a headerless candidate to header labels when it
/// reads like a header row. Returns true when promoted.
pub fn promote_header_row(table: &mut TableCandidate, vocab: &Vocabulary) -> bool {
    if !table.header_labels.is_empty() {
        return false;
    }
    let Some(first) = table.rows.first() else {
        return false;
    };
    // * Data rows routinely contain a few label-like words ("Classe A", "Berço 1"),
    // * so a header row must also be mostly labels.
    let recognized = recognized_count(first, vocab);
    let filled = first.iter().filter(|cell| !cell.trim().is_empty()).count();
    if recognized < MIN_PROMOTED_HEADER_MATCHES || recognized * 2 < filled {
        return false;
    }
    table.header_labels = table.rows.remove(0);
    true
}
