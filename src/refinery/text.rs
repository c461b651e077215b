// * Text normalisation shared by header matching, translation and categorisation

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercases, strips diacritics, turns every non-word character into a space
/// and collapses whitespace.
///
/// `"Comp./Calado (m)"` becomes `"comp calado m"`, `"Agência"` becomes `"agencia"`.
pub fn normalize_label(input: &str) -> String {
    let folded: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&folded)
}

/// Collapses runs of whitespace (including non-breaking spaces) into single spaces and trims.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// Word boundaries follow UAX #29, so `"são tomé"` becomes `"São Tomé"`.
pub fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for segment in collapse_whitespace(input).split_word_bounds() {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() => {
                out.extend(first.to_uppercase());
                out.extend(chars.flat_map(char::to_lowercase));
            }
            _ => out.push_str(segment),
        }
    }
    out
}

/// Returns the trimmed text, or `None` when nothing but whitespace remains.
pub fn non_empty(input: &str) -> Option<String> {
    let trimmed = collapse_whitespace(input);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// True when `needle` occurs in `haystack` starting at a word boundary.
/// Both sides are expected to be outputs of [`normalize_label`].
pub fn contains_word_prefix(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let padded_haystack = format!(" {haystack}");
    let padded_needle = format!(" {needle}");
    padded_haystack.contains(&padded_needle)
}
