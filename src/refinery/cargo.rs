// * Cargo categoriser
// * Keyword lists are tested in strict priority order: Container, then Liquid, then Bulk.
// ! A row matching both a container operator and a bulk commodity is Container.

use serde::{Deserialize, Serialize};

use crate::refinery::text::{contains_word_prefix, normalize_label};
use crate::refinery::vocabulary::Vocabulary;

/// Coarse cargo category of a vessel call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoCategory {
    Container,
    Liquid,
    Bulk,
    Other,
}

impl CargoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CargoCategory::Container => "container",
            CargoCategory::Liquid => "liquid",
            CargoCategory::Bulk => "bulk",
            CargoCategory::Other => "other",
        }
    }

    /// English label for presentation
    pub fn label_en(&self) -> &'static str {
        match self {
            CargoCategory::Container => "Container",
            CargoCategory::Liquid => "Liquid / Oil",
            CargoCategory::Bulk => "Bulk",
            CargoCategory::Other => "Other",
        }
    }
}

/// Classifies a bag of free-text fields (goods, terminal, pier, agency).
///
/// Absent fields are skipped. Returns `Other` when no keyword list hits.
pub fn categorize<'a, I>(fields: I, vocab: &Vocabulary) -> CargoCategory
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let haystack = fields
        .into_iter()
        .flatten()
        .map(normalize_label)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if haystack.is_empty() {
        return CargoCategory::Other;
    }

    vocab
        .cargo_keywords
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| contains_word_prefix(&haystack, keyword))
        })
        .map(|(category, _)| *category)
        .unwrap_or(CargoCategory::Other)
}
