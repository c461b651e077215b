// * The Refinery: extraction-and-normalisation pipeline
// * Extractor -> Selector -> Column Mapper -> Row Filter -> Normalisers -> Assembler.
// * Every stage is pure except extraction, which may be driven from a byte stream.

pub mod cargo;
pub mod columns;
pub mod dates;
pub mod dimensions;
pub mod identifiers;
pub mod record;
pub mod rows;
pub mod selector;
pub mod tables;
pub mod text;
pub mod translate;
pub mod vocabulary;

// * Re-exports for convenient access
pub use cargo::CargoCategory;
pub use columns::{ColumnMap, MappingSource, PositionalLayout, SemanticKey};
pub use record::ShipRecord;
pub use rows::RowFilter;
pub use selector::TableScore;
pub use tables::{
    extract_tables, extract_tables_from_stream, ExtractError, RawRow, TableCandidate, TableExtractor,
};
pub use vocabulary::Vocabulary;

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::constants::MIN_FILLED_CELLS;
use record::{assemble_record, AssemblyContext};

/// Configuration for the refinery pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineryConfig {
    /// Rows with fewer non-blank cells are dropped (inclusive bound)
    pub min_filled_cells: usize,
    /// Column order assumed for tables without recognisable headers
    pub positional_layout: PositionalLayout,
}

impl Default for RefineryConfig {
    fn default() -> Self {
        Self {
            min_filled_cells: MIN_FILLED_CELLS,
            positional_layout: PositionalLayout::default(),
        }
    }
}

/// Processing statistics from the refinery
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefineryStats {
    pub table_count: usize,
    pub selected: Option<TableScore>,
    pub mapping: Option<MappingSource>,
    pub header_promoted: bool,
    pub rows_seen: usize,
    pub rows_dropped: usize,
    pub record_count: usize,
}

/// Unified result from the refinery pipeline
#[derive(Debug, Clone, Default)]
pub struct RefineryResult {
    pub records: Vec<ShipRecord>,
    pub stats: RefineryStats,
}

/// Turns extracted table candidates into ship records
///
/// # Example
/// ```ignore
/// use ship_lineup::refinery::{extract_tables, Refinery};
///
/// let refinery = Refinery::new();
/// let result = refinery.process(extract_tables(html), 2025);
/// println!("Vessels: {}", result.records.len());
/// ```
#[derive(Debug, Clone)]
pub struct Refinery {
    config: RefineryConfig,
    vocab: Arc<Vocabulary>,
}

impl Refinery {
    /// Creates a new refinery with default configuration
    pub fn new() -> Self {
        Self::with_config(RefineryConfig::default(), Arc::new(Vocabulary::standard()))
    }

    /// Creates a refinery over shared, read-only lookup tables
    pub fn with_config(config: RefineryConfig, vocab: Arc<Vocabulary>) -> Self {
        Self { config, vocab }
    }

    /// Runs selection, mapping, filtering and assembly over the page's tables.
    ///
    /// `default_year` is applied to arrival dates written without a year.
    pub fn process(&self, mut candidates: Vec<TableCandidate>, default_year: i32) -> RefineryResult {
        let mut stats = RefineryStats {
            table_count: candidates.len(),
            ..Default::default()
        };

        // * Header rows rendered as plain <td> cells
        let mut promoted = vec![false; candidates.len()];
        for (i, candidate) in candidates.iter_mut().enumerate() {
            promoted[i] = selector::promote_header_row(candidate, &self.vocab);
        }

        let Some(selected) = selector::select_table(&candidates, &self.vocab) else {
            warn!("No table found in document");
            return RefineryResult {
                records: Vec::new(),
                stats,
            };
        };
        stats.selected = Some(selected);
        stats.header_promoted = promoted[selected.index];

        let table = &candidates[selected.index];
        let columns = ColumnMap::build(
            &table.header_labels,
            table.column_count(),
            self.config.positional_layout,
            &self.vocab,
        );
        stats.mapping = Some(columns.source());
        if columns.source() == MappingSource::Positional {
            warn!(
                layout = ?self.config.positional_layout,
                columns = columns.len(),
                "No recognised headers, using positional layout"
            );
        }

        let filter = RowFilter::new(self.config.min_filled_cells);
        let (rows, dropped) = filter.apply(&table.rows);
        stats.rows_seen = table.rows.len();
        stats.rows_dropped = dropped;

        let ctx = AssemblyContext {
            columns: &columns,
            vocab: &self.vocab,
            default_year,
        };
        let records: Vec<ShipRecord> = rows.into_iter().map(|row| assemble_record(row, &ctx)).collect();
        stats.record_count = records.len();

        debug!(
            records = stats.record_count,
            dropped = stats.rows_dropped,
            mapping = ?stats.mapping,
            "Refinery pass complete"
        );

        RefineryResult { records, stats }
    }

    /// Extracts and processes a complete document
    pub fn process_html(&self, html: &str, default_year: i32) -> RefineryResult {
        self.process(extract_tables(html), default_year)
    }

    /// Returns the current configuration
    pub fn config(&self) -> &RefineryConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }
}

impl Default for Refinery {
    fn default() -> Self {
        Self::new()
    }
}
