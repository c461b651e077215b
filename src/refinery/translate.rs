// * Vocabulary translators: notice codes, flags and goods descriptions (pt -> en)

use regex::Regex;
use std::sync::LazyLock;

use crate::refinery::text::{capitalize_words, collapse_whitespace, normalize_label};
use crate::refinery::vocabulary::Vocabulary;

/// Translates a notice code.
///
/// `EMB` is a load call, `DESC` an unload call, a code carrying both is
/// `Load & Unload`. Any other code is passed through unchanged.
pub fn translate_notice(code: &str) -> Option<String> {
    let trimmed = collapse_whitespace(code);
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_uppercase();
    let translated = if upper.contains("EMB") && upper.contains("DESC") {
        "Load & Unload"
    } else if upper == "EMB" {
        "Load"
    } else if upper == "DESC" {
        "Unload"
    } else {
        return Some(trimmed);
    };
    Some(translated.to_string())
}

/// Translates a flag (country name or adjective) to an English country name.
///
/// Exact table lookup first, then substring heuristics, then a capitalised
/// copy of the original so the field always stays presentable.
pub fn translate_flag(flag: &str, vocab: &Vocabulary) -> Option<String> {
    let original = collapse_whitespace(flag);
    if original.is_empty() {
        return None;
    }

    let normalized = normalize_label(&original);
    if let Some(english) = vocab.countries.get(normalized.as_str()) {
        return Some(english.to_string());
    }

    if let Some((_, english)) = vocab
        .flag_heuristics
        .iter()
        .find(|(fragment, _)| normalized.contains(fragment))
    {
        return Some(english.to_string());
    }

    Some(capitalize_words(&original))
}

// * Separators between goods items: "Soja / Milho", "açúcar, café", "milho e soja"
const GOODS_SEPARATORS: &[char] = &['/', ',', ';', '+'];

// * The conjunction "e" between items, in any case
static PATTERN_GOODS_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+e\s+").expect("Invalid goods conjunction regex"));

/// Translates a goods description where the commodity table knows it.
///
/// Exact match on the whole text first, then item by item; unknown items keep
/// their text. `None` when not a single item is known.
pub fn translate_goods(goods: &str, vocab: &Vocabulary) -> Option<String> {
    let normalized = normalize_label(goods);
    if normalized.is_empty() {
        return None;
    }
    if let Some(english) = vocab.goods_terms.get(normalized.as_str()) {
        return Some(english.to_string());
    }

    let mut translated_any = false;
    let items: Vec<String> = goods
        .split(GOODS_SEPARATORS)
        .flat_map(|part| PATTERN_GOODS_AND.split(part))
        .filter_map(|item| {
            let original = collapse_whitespace(item);
            if original.is_empty() {
                return None;
            }
            match vocab.goods_terms.get(normalize_label(&original).as_str()) {
                Some(english) => {
                    translated_any = true;
                    Some(english.to_string())
                }
                None => Some(original),
            }
        })
        .collect();

    translated_any.then(|| items.join(" / "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_codes() {
        assert_eq!(translate_notice("EMB").as_deref(), Some("Load"));
        assert_eq!(translate_notice("desc").as_deref(), Some("Unload"));
        assert_eq!(translate_notice("EMBDESC").as_deref(), Some("Load & Unload"));
        assert_eq!(translate_notice("EMB/DESC").as_deref(), Some("Load & Unload"));
        assert_eq!(translate_notice("XYZ").as_deref(), Some("XYZ"));
        assert_eq!(translate_notice(" "), None);
    }

    #[test]
    fn test_flag_exact_lookup() {
        let vocab = Vocabulary::standard();
        assert_eq!(translate_flag("Panamá", &vocab).as_deref(), Some("Panama"));
        assert_eq!(translate_flag("LIBÉRIA", &vocab).as_deref(), Some("Liberia"));
        assert_eq!(translate_flag("Ilhas Marshall", &vocab).as_deref(), Some("Marshall Islands"));
        assert_eq!(translate_flag("Brasileira", &vocab).as_deref(), Some("Brazil"));
    }

    #[test]
    fn test_flag_heuristics() {
        let vocab = Vocabulary::standard();
        assert_eq!(translate_flag("Panamenho", &vocab).as_deref(), Some("Panama"));
        assert_eq!(translate_flag("Rep. Maltesa", &vocab).as_deref(), Some("Malta"));
    }

    #[test]
    fn test_flag_fallback_is_capitalised_original() {
        let vocab = Vocabulary::standard();
        assert_eq!(translate_flag("TERRA DO NUNCA", &vocab).as_deref(), Some("Terra Do Nunca"));
        assert_eq!(translate_flag("", &vocab), None);
    }

    #[test]
    fn test_goods_translation() {
        let vocab = Vocabulary::standard();
        assert_eq!(translate_goods("Farelo de Soja", &vocab).as_deref(), Some("Soybean meal"));
        assert_eq!(translate_goods("AÇÚCAR", &vocab).as_deref(), Some("Sugar"));
        assert_eq!(translate_goods("Soja / Milho", &vocab).as_deref(), Some("Soybeans / Corn"));
        assert_eq!(translate_goods("milho e trigo", &vocab).as_deref(), Some("Corn / Wheat"));
        assert_eq!(translate_goods("MILHO E SOJA", &vocab).as_deref(), Some("Corn / Soybeans"));
        assert_eq!(translate_goods("Milho E  Soja", &vocab).as_deref(), Some("Corn / Soybeans"));
        assert_eq!(
            translate_goods("Contêineres, Peças XYZ", &vocab).as_deref(),
            Some("Containers / Peças XYZ")
        );
        assert_eq!(translate_goods("Peças XYZ", &vocab), None);
        assert_eq!(translate_goods("", &vocab), None);
    }
}
