// * Row Filter
// * The listing mixes vessel rows with sparse separator/summary rows; the count of
// * non-blank cells is the only reliable discriminator.

use crate::config::constants::MIN_FILLED_CELLS;
use crate::refinery::tables::RawRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFilter {
    /// Inclusive lower bound on non-blank cells
    pub min_filled_cells: usize,
}

impl RowFilter {
    pub fn new(min_filled_cells: usize) -> Self {
        Self { min_filled_cells }
    }

    pub fn filled_cells(row: &[String]) -> usize {
        row.iter().filter(|cell| !cell.trim().is_empty()).count()
    }

    pub fn is_data_row(&self, row: &[String]) -> bool {
        Self::filled_cells(row) >= self.min_filled_cells
    }

    /// Keeps data rows in source order; returns them with the number dropped
    pub fn apply<'a>(&self, rows: &'a [RawRow]) -> (Vec<&'a RawRow>, usize) {
        let kept: Vec<&RawRow> = rows.iter().filter(|row| self.is_data_row(row)).collect();
        let dropped = rows.len() - kept.len();
        (kept, dropped)
    }
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new(MIN_FILLED_CELLS)
    }
}
