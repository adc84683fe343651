//! Serialisable view of a ranked table.
//!
//! A [`TableSnapshot`] captures what the presentation layer needs to draw a
//! table without running the core itself: header texts, current row order,
//! the active sort, the active row and every rank marker.
//!
//! Markers are listed column by column, rows in ascending id order, so the
//! same table state always serialises to the same bytes.
//!
//! This module requires the `serde` feature.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::TableError;
use crate::rank::Rank;
use crate::ranker::TableRanker;
use crate::sort::SortDirection;
use crate::table::RowId;

/// Snapshot of a [`TableRanker`] with fresh ranks.
///
/// ```rust,ignore
/// use table_rank::snapshot::TableSnapshot;
///
/// let snapshot = TableSnapshot::from_ranker(&ranker)?;
/// let json = serde_json::to_string(&snapshot).unwrap();
/// ```
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct TableSnapshot {
    /// Table generation the snapshot was taken at.
    pub generation: u64,
    /// Header texts, label column first.
    pub headers: Vec<String>,
    /// Active sort, if any column is sorted.
    pub sort: Option<SortRecord>,
    /// Row ids in display order.
    pub order: Vec<RowId>,
    /// The highlighted row.
    pub active_row: Option<RowId>,
    /// Every ranked cell.
    pub markers: Vec<RankRecord>,
}

/// The active column and its direction.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortRecord {
    /// Sorted column.
    pub column: usize,
    /// Sort direction.
    pub direction: SortDirection,
}

/// One ranked cell.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankRecord {
    /// Row of the cell.
    pub row: RowId,
    /// Column of the cell.
    pub column: usize,
    /// Rank in `1..=8`.
    pub rank: Rank,
}

impl TableSnapshot {
    /// Capture `ranker`. Fails with [`TableError::StaleRanks`] while a
    /// re-rank is pending; call [`TableRanker::settle`] first.
    pub fn from_ranker(ranker: &TableRanker) -> Result<Self, TableError> {
        let ranks = ranker.ranks()?;
        let table = ranker.table();

        let mut markers = Vec::new();
        for assignment in ranks.columns() {
            let mut column: Vec<RankRecord> = assignment
                .iter()
                .map(|(row, rank)| RankRecord { row, column: assignment.column(), rank })
                .collect();
            column.sort_by_key(|r| r.row);
            markers.extend(column);
        }

        Ok(Self {
            generation: table.generation(),
            headers: table.headers().to_vec(),
            sort: ranker
                .sort_state()
                .active()
                .map(|(column, direction)| SortRecord { column, direction }),
            order: table.order(),
            active_row: ranker.active_row(),
            markers,
        })
    }

    /// Number of ranked cells.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Rank of one cell, if it was ranked.
    pub fn find_marker(&self, row: RowId, column: usize) -> Option<Rank> {
        self.markers
            .iter()
            .find(|m| m.row == row && m.column == column)
            .map(|m| m.rank)
    }
}
