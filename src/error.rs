//! Error type for table operations.
//!
//! The pure kernels ([`normalize`](crate::value::normalize),
//! [`compute_ranks`](crate::rank::compute_ranks)) never fail. Only precondition
//! violations against a concrete table surface here.

use crate::table::RowId;

/// Errors raised when a table or ranker is used outside its preconditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A row does not have exactly one cell per header.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        /// Load-time index of the offending row.
        row: usize,
        /// Number of headers in the table.
        expected: usize,
        /// Number of cells the row actually has.
        found: usize,
    },
    /// A table needs at least the label column.
    #[error("table has no columns")]
    NoColumns,
    /// Column index past the last header.
    #[error("column {column} out of range (table has {columns} columns)")]
    ColumnOutOfRange {
        /// Requested column.
        column: usize,
        /// Number of columns in the table.
        columns: usize,
    },
    /// Column 0 holds row labels and is never sorted or ranked.
    #[error("column 0 is the label column and cannot be sorted")]
    LabelColumn,
    /// No row with this id exists in the table.
    #[error("unknown row {0:?}")]
    UnknownRow(RowId),
    /// The table changed since ranks were last computed.
    #[error("ranks computed at generation {computed} but table is at {current}")]
    StaleRanks {
        /// Generation the ranks were computed at.
        computed: u64,
        /// Current table generation.
        current: u64,
    },
    /// A [`RankConfig`](crate::config::RankConfig) field is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
