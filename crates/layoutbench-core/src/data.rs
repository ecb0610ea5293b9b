//! Synthetic table data
//!
//! Rows are generated once and shared by every renderer; nothing mutates them
//! afterwards.

use crate::config::DataConfig;
use smallvec::SmallVec;
use std::ops::Deref;
use std::sync::Arc;

/// A single cell of the synthetic table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// 1-based column index
    pub id: usize,
    pub content: String,
}

/// A row of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based row index
    pub id: usize,
    pub cells: SmallVec<[Cell; 4]>,
}

/// Generate `row_count` rows of `column_count` cells.
///
/// Content depends only on the row and column index: `"Row 1, Cell 1"`,
/// `"Row 1, Cell 2"`, ...
pub fn generate_rows(row_count: usize, column_count: usize) -> Vec<Row> {
    (0..row_count)
        .map(|i| Row {
            id: i + 1,
            cells: (0..column_count)
                .map(|j| Cell {
                    id: j + 1,
                    content: format!("Row {}, Cell {}", i + 1, j + 1),
                })
                .collect(),
        })
        .collect()
}

/// Immutable, cheaply clonable set of generated rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSet {
    rows: Arc<[Row]>,
    column_count: usize,
}

impl RowSet {
    /// Generate rows according to the data configuration.
    pub fn generate(config: &DataConfig) -> Self {
        Self::new(config.row_count, config.column_count)
    }

    /// Generate `row_count` rows of `column_count` cells.
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: generate_rows(row_count, column_count).into(),
            column_count,
        }
    }

    /// Number of cells per row.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }
}

impl Deref for RowSet {
    type Target = [Row];

    fn deref(&self) -> &[Row] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_follows_indices() {
        let rows = generate_rows(2, 3);
        let content: Vec<&str> = rows
            .iter()
            .flat_map(|r| r.cells.iter().map(|c| c.content.as_str()))
            .collect();
        assert_eq!(
            content,
            vec![
                "Row 1, Cell 1",
                "Row 1, Cell 2",
                "Row 1, Cell 3",
                "Row 2, Cell 1",
                "Row 2, Cell 2",
                "Row 2, Cell 3",
            ]
        );
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].cells[2].id, 3);
    }

    #[test]
    fn test_generation_is_deterministic_at_full_size() {
        let config = DataConfig::default();
        let first = RowSet::generate(&config);
        let second = RowSet::generate(&config);
        assert_eq!(first.len(), 10_000);
        assert!(first.iter().all(|r| r.cells.len() == 3));
        assert_eq!(first, second);
        assert_eq!(first[9_999].cells[2].content, "Row 10000, Cell 3");
    }

    #[test]
    fn test_clones_share_rows() {
        let rows = RowSet::new(4, 2);
        let clone = rows.clone();
        assert!(std::ptr::eq(rows.as_ptr(), clone.as_ptr()));
        assert_eq!(clone.column_count(), 2);
    }
}
