//! Column sorting and the per-table header state machine.
//!
//! # Header state machine
//!
//! ```text
//!   unset ──activate──▶ ascending ──activate──▶ descending
//!                           ▲                        │
//!                           └────────activate────────┘
//! ```
//!
//! Only one column is active at a time. Activating another column sends the
//! previous one back to unset and starts the new one at ascending.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;

use crate::config::RankConfig;
use crate::error::TableError;
use crate::table::{Row, Table};
use crate::value::{compare_values, normalize_with, NormalizedValue};

/// Direction of the active sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    /// Smallest value first; missing values lead.
    Ascending,
    /// Largest value first; missing values trail.
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }

    /// Header class the presentation layer uses for the sort arrow.
    pub fn indicator_class(self) -> &'static str {
        match self {
            Self::Ascending => "sort-asc",
            Self::Descending => "sort-desc",
        }
    }
}

/// Which column, if any, currently orders the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortState {
    active: Option<(usize, SortDirection)>,
}

impl SortState {
    /// No column sorted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active column and its direction.
    pub fn active(&self) -> Option<(usize, SortDirection)> {
        self.active
    }

    /// Direction of `column`, or `None` when it is unset.
    pub fn direction(&self, column: usize) -> Option<SortDirection> {
        match self.active {
            Some((c, d)) if c == column => Some(d),
            _ => None,
        }
    }

    /// Advance the state machine for a header activation on `column`.
    ///
    /// Returns the direction the table must now be sorted in.
    pub fn activate(&mut self, column: usize) -> SortDirection {
        let next = match self.direction(column) {
            Some(SortDirection::Ascending) => SortDirection::Descending,
            Some(SortDirection::Descending) | None => SortDirection::Ascending,
        };
        self.active = Some((column, next));
        next
    }

    /// Return every column to unset.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Stable sort order of `rows` by `column`, as indices into `rows`.
///
/// Rows with equal values keep their relative order in both directions.
pub fn sort_order(
    rows: &[Row],
    column: usize,
    direction: SortDirection,
    config: &RankConfig,
) -> Vec<usize> {
    let mut keyed: Vec<(NormalizedValue<'_>, usize)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (normalize_with(row.cell(column).unwrap_or(""), config), i))
        .collect();
    // `sort_by` is stable: equal keys stay in encounter order.
    keyed.sort_by(|a, b| direction.apply(compare_values(&a.0, &b.0)));
    keyed.into_iter().map(|(_, i)| i).collect()
}

/// Reorder `rows` in place by `column`. No rows are created or dropped.
pub fn sort_rows(
    rows: &mut Vec<Row>,
    column: usize,
    direction: SortDirection,
    config: &RankConfig,
) {
    let order = sort_order(rows, column, direction, config);
    let mut slots: Vec<Option<Row>> = mem::take(rows).into_iter().map(Some).collect();
    rows.extend(order.into_iter().filter_map(|i| slots[i].take()));
}

/// Sort a whole table by one of its data columns.
pub fn sort_table(
    table: &mut Table,
    column: usize,
    direction: SortDirection,
    config: &RankConfig,
) -> Result<(), TableError> {
    table.check_data_column(column)?;
    tracing::debug!(column, ?direction, rows = table.row_count(), "sorting table");
    table.reorder_with(|rows| sort_rows(rows, column, direction, config));
    Ok(())
}
