// * Length/Draft parser
// * One cell carries both the vessel length and its draft, in metres.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::constants::MAX_DRAFT_M;

// * "229,5/12,3", "229.5 12.3", "229 m / 12 m"
static PATTERN_SEPARATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:[.,]\d+)?)\s*m?\s*(?:/\s*|\s+)(\d+(?:[.,]\d+)?)\s*m?$")
        .expect("Invalid separated length/draft regex")
});

// * "18010,5": digits of the length run straight into the draft
static PATTERN_CONCATENATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{3,})([.,]\d+)?$").expect("Invalid concatenated length/draft regex")
});

// * Length widths tried when splitting a concatenated cell
const LENGTH_WIDTHS: [usize; 3] = [3, 2, 4];

/// Parsed dimensions; both fields are `None` when the cell cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LengthDraft {
    pub length_m: Option<f64>,
    pub draft_m: Option<f64>,
}

impl LengthDraft {
    fn pair(length: f64, draft: f64) -> Self {
        Self {
            length_m: Some(length),
            draft_m: Some(draft),
        }
    }
}

/// Parses a combined length/draft cell.
///
/// Two numbers separated by `/` or whitespace are read first. Otherwise a bare
/// run of digits is split into a 2–4 digit length and the remaining draft.
pub fn parse_length_draft(input: &str) -> LengthDraft {
    let text = input.trim();

    if let Some(caps) = PATTERN_SEPARATED.captures(text) {
        if let (Some(length), Some(draft)) = (parse_decimal(&caps[1]), parse_decimal(&caps[2])) {
            return LengthDraft::pair(length, draft);
        }
    }

    if let Some(caps) = PATTERN_CONCATENATED.captures(text) {
        let digits = &caps[1];
        let fraction = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        for width in LENGTH_WIDTHS {
            if digits.len() <= width {
                continue;
            }
            let (length_part, draft_part) = digits.split_at(width);
            let length = parse_decimal(length_part);
            let draft = parse_decimal(&format!("{draft_part}{fraction}"));
            if let (Some(length), Some(draft)) = (length, draft) {
                if draft <= MAX_DRAFT_M && length > draft {
                    return LengthDraft::pair(length, draft);
                }
            }
        }
    }

    LengthDraft::default()
}

/// Parses a decimal number accepting either a comma or a dot as separator
pub fn parse_decimal(input: &str) -> Option<f64> {
    let value = input.trim().replace(',', ".").parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Canonical "length/draft" form
pub fn format_length_draft(length: f64, draft: f64) -> String {
    format!("{length}/{draft}")
}
