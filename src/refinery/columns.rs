// * Column Mapper
// * Assigns each physical column a semantic field, by header synonym when the
// * table is labelled and by a fixed positional layout when it is not.

use serde::{Deserialize, Serialize};

use crate::config::constants::{LAYOUT_WITHOUT_OPERATION, LAYOUT_WITH_OPERATION};
use crate::refinery::text::{contains_word_prefix, normalize_label};
use crate::refinery::vocabulary::Vocabulary;

/// Logical field a table column can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticKey {
    Ship,
    Flag,
    LengthDraft,
    Nav,
    Arrival,
    Notice,
    Agency,
    Operation,
    Goods,
    Weight,
    Voyage,
    Duv,
    DuvClass,
    Pier,
    Terminal,
    Imo,
}

impl SemanticKey {
    pub const ALL: &'static [SemanticKey] = &[
        SemanticKey::Ship,
        SemanticKey::Flag,
        SemanticKey::LengthDraft,
        SemanticKey::Nav,
        SemanticKey::Arrival,
        SemanticKey::Notice,
        SemanticKey::Agency,
        SemanticKey::Operation,
        SemanticKey::Goods,
        SemanticKey::Weight,
        SemanticKey::Voyage,
        SemanticKey::Duv,
        SemanticKey::DuvClass,
        SemanticKey::Pier,
        SemanticKey::Terminal,
        SemanticKey::Imo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticKey::Ship => "ship",
            SemanticKey::Flag => "flag",
            SemanticKey::LengthDraft => "lengthDraft",
            SemanticKey::Nav => "nav",
            SemanticKey::Arrival => "arrival",
            SemanticKey::Notice => "notice",
            SemanticKey::Agency => "agency",
            SemanticKey::Operation => "operation",
            SemanticKey::Goods => "goods",
            SemanticKey::Weight => "weight",
            SemanticKey::Voyage => "voyage",
            SemanticKey::Duv => "duv",
            SemanticKey::DuvClass => "duvClass",
            SemanticKey::Pier => "pier",
            SemanticKey::Terminal => "terminal",
            SemanticKey::Imo => "imo",
        }
    }
}

/// Positional layout used for tables without recognisable headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionalLayout {
    /// ship, flag, length/draft, nav, arrival, notice, agency, operation, goods, weight,
    /// voyage, duv, duvClass, pier, terminal
    #[default]
    WithOperation,
    /// Same order without the operation column
    WithoutOperation,
}

impl PositionalLayout {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "with-operation" | "with_operation" => Some(Self::WithOperation),
            "without-operation" | "without_operation" => Some(Self::WithoutOperation),
            _ => None,
        }
    }

    pub fn keys(&self) -> &'static [SemanticKey] {
        match self {
            Self::WithOperation => LAYOUT_WITH_OPERATION,
            Self::WithoutOperation => LAYOUT_WITHOUT_OPERATION,
        }
    }
}

/// How a column map was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingSource {
    Headers,
    Positional,
}

/// Per-table assignment of column position to semantic field
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    slots: Vec<Option<SemanticKey>>,
    source: MappingSource,
}

impl ColumnMap {
    /// Maps header labels through the synonym dictionary; columns past the
    /// labels (or with unknown labels) stay unmapped.
    pub fn from_headers(headers: &[String], column_count: usize, vocab: &Vocabulary) -> Self {
        let slots = (0..column_count)
            .map(|i| headers.get(i).and_then(|label| match_label(label, vocab)))
            .collect();
        Self {
            slots,
            source: MappingSource::Headers,
        }
    }

    /// Fixed positional layout; trailing columns beyond the layout stay unmapped.
    pub fn positional(layout: PositionalLayout, column_count: usize) -> Self {
        let keys = layout.keys();
        let slots = (0..column_count).map(|i| keys.get(i).copied()).collect();
        Self {
            slots,
            source: MappingSource::Positional,
        }
    }

    /// Header mapping when at least one label is recognised, positional otherwise
    pub fn build(
        headers: &[String],
        column_count: usize,
        layout: PositionalLayout,
        vocab: &Vocabulary,
    ) -> Self {
        let by_headers = Self::from_headers(headers, column_count, vocab);
        if by_headers.mapped_count() > 0 {
            by_headers
        } else {
            Self::positional(layout, column_count)
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn source(&self) -> MappingSource {
        self.source
    }

    pub fn key_at(&self, column: usize) -> Option<SemanticKey> {
        self.slots.get(column).copied().flatten()
    }

    /// First column carrying `key`
    pub fn position_of(&self, key: SemanticKey) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(key))
    }

    pub fn mapped_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Cell of `row` carrying `key`, if the key is mapped and the cell exists
    pub fn cell<'a>(&self, row: &'a [String], key: SemanticKey) -> Option<&'a str> {
        self.position_of(key)
            .and_then(|i| row.get(i))
            .map(String::as_str)
    }
}

/// Matches one header label against the synonym dictionary.
///
/// The label is normalised first; the first dictionary entry with a phrase
/// occurring in the label at a word start wins.
pub fn match_label(label: &str, vocab: &Vocabulary) -> Option<SemanticKey> {
    let normalized = normalize_label(label);
    if normalized.is_empty() {
        return None;
    }
    vocab
        .header_synonyms
        .iter()
        .find(|(_, phrases)| {
            phrases
                .iter()
                .any(|phrase| contains_word_prefix(&normalized, phrase))
        })
        .map(|(key, _)| *key)
}

/// Number of labels the dictionary recognises
pub fn recognized_count(labels: &[String], vocab: &Vocabulary) -> usize {
    labels
        .iter()
        .filter(|label| match_label(label, vocab).is_some())
        .count()
}
