// * Vessel identifier (IMO) extractor

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PATTERN_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digit run regex"));

/// Extracts an IMO number from a row.
///
/// The dedicated column is consulted first when mapped; otherwise every cell
/// except the DUV cell is scanned in order. A maximal run of exactly 7 digits
/// is accepted, and an 8-digit run with a leading zero is read as a
/// zero-padded 7-digit number. Candidates matching any digit run of the DUV
/// (or all of its digits joined) are skipped.
pub fn extract_imo(
    row: &[String],
    imo_column: Option<usize>,
    duv_column: Option<usize>,
) -> Option<String> {
    let duv_forms = duv_column
        .and_then(|i| row.get(i))
        .map(|cell| duv_digit_forms(cell))
        .unwrap_or_default();

    let scan = |cell: &str| -> Option<String> {
        PATTERN_DIGIT_RUN.find_iter(cell).find_map(|m| {
            let run = m.as_str();
            let candidate = imo_candidate(run)?;
            let is_duv = duv_forms.contains(run) || duv_forms.contains(candidate);
            (!is_duv).then(|| candidate.to_string())
        })
    };

    let dedicated = imo_column
        .filter(|i| Some(*i) != duv_column)
        .and_then(|i| row.get(i))
        .and_then(|cell| scan(cell.as_str()));
    if dedicated.is_some() {
        return dedicated;
    }

    row.iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != duv_column)
        .find_map(|(_, cell)| scan(cell.as_str()))
}

// * Every digit run of the DUV, its zero-stripped form, and the joined digits
fn duv_digit_forms(duv: &str) -> HashSet<String> {
    let mut forms = HashSet::new();
    let mut insert = |digits: &str| {
        if digits.is_empty() {
            return;
        }
        forms.insert(digits.to_string());
        if let Some(candidate) = imo_candidate(digits) {
            forms.insert(candidate.to_string());
        }
    };

    for m in PATTERN_DIGIT_RUN.find_iter(duv) {
        insert(m.as_str());
    }
    let joined: String = duv.chars().filter(char::is_ascii_digit).collect();
    insert(&joined);
    forms
}

fn imo_candidate(run: &str) -> Option<&str> {
    match run.len() {
        7 => Some(run),
        8 if run.starts_with('0') => Some(&run[1..]),
        _ => None,
    }
}
