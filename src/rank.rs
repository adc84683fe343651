//! Per-column best-value ranking.
//!
//! For each data column the numeric cells are ordered highest first and each
//! row gets its 1-based position as rank. Positions past the configured
//! maximum (8 by default) all share the last rank, so a long leaderboard
//! still maps onto a fixed set of highlight colours.
//!
//! Equal values do **not** share a rank: ties are broken by the rows' current
//! display order, so `[95, 87, 95, 40]` ranks as `1, 3, 2, 4`.
//!
//! Missing cells (`-`, empty) and text cells receive no rank at all.

use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashMap;

use crate::config::RankConfig;
use crate::error::TableError;
use crate::table::{Row, RowId, Table, LABEL_COLUMN};
use crate::value::normalize_with;

/// Highlight class for each rank, index 0 = rank 1.
const RANK_CLASSES: [&str; 8] = [
    "rank-1", "rank-2", "rank-3", "rank-4", "rank-5", "rank-6", "rank-7", "rank-8",
];

/// A display rank in `1..=8`. Rank 1 is the best value in its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rank(u8);

impl Rank {
    /// Rank for a 1-based `position`, clamped to `1..=max_rank`.
    pub fn from_position(position: usize, max_rank: u8) -> Self {
        let cap = max_rank.clamp(1, RANK_CLASSES.len() as u8);
        let pos = position.clamp(1, cap as usize) as u8;
        Self(pos)
    }

    /// The numeric rank.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The `rank-N` class name the styling layer keys colours on.
    pub fn class_name(self) -> &'static str {
        let idx = self.0.clamp(1, RANK_CLASSES.len() as u8) - 1;
        RANK_CLASSES[idx as usize]
    }
}

/// Ranks for one column, keyed by row id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankAssignment {
    column: usize,
    ranks: HashMap<RowId, Rank>,
}

impl RankAssignment {
    /// Column these ranks belong to.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Rank of `row`, or `None` if the row's cell is missing or not numeric.
    pub fn get(&self, row: RowId) -> Option<Rank> {
        self.ranks.get(&row).copied()
    }

    /// Number of ranked rows.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// `true` if no row in the column has a numeric value.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Iterate over `(row, rank)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, Rank)> + '_ {
        self.ranks.iter().map(|(r, k)| (*r, *k))
    }
}

/// Rank the numeric cells of `column` over `rows` in their current order.
///
/// Never fails: a column without numbers gives an empty assignment.
pub fn compute_ranks(rows: &[Row], column: usize, config: &RankConfig) -> RankAssignment {
    let mut scored: Vec<(f64, RowId)> = rows
        .iter()
        .filter_map(|row| {
            normalize_with(row.cell(column).unwrap_or(""), config)
                .as_number()
                .map(|v| (v, row.id()))
        })
        .collect();
    // Highest first; stable, so ties keep display order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let ranks = scored
        .into_iter()
        .enumerate()
        .map(|(i, (_, id))| (id, Rank::from_position(i + 1, config.max_rank)))
        .collect();
    RankAssignment { column, ranks }
}

/// Ranks for every data column of a table, stamped with the table generation
/// they were computed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRanks {
    generation: u64,
    columns: Vec<RankAssignment>,
}

impl TableRanks {
    /// Table generation these ranks describe.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether these ranks still describe `table`.
    pub fn is_fresh_for(&self, table: &Table) -> bool {
        self.generation == table.generation()
    }

    /// Error with [`TableError::StaleRanks`] unless fresh for `table`.
    pub fn check_fresh(&self, table: &Table) -> Result<(), TableError> {
        if self.is_fresh_for(table) {
            Ok(())
        } else {
            Err(TableError::StaleRanks {
                computed: self.generation,
                current: table.generation(),
            })
        }
    }

    /// Assignment for a data column. `None` for the label column or past the end.
    pub fn column(&self, column: usize) -> Option<&RankAssignment> {
        if column == LABEL_COLUMN {
            return None;
        }
        self.columns.get(column - 1)
    }

    /// Rank of `row` in `column`.
    pub fn rank_of(&self, row: RowId, column: usize) -> Option<Rank> {
        self.column(column).and_then(|a| a.get(row))
    }

    /// All data-column assignments, column 1 first.
    pub fn columns(&self) -> &[RankAssignment] {
        &self.columns
    }
}

/// Recompute ranks for every data column of `table`.
///
/// Total: the result replaces any earlier ranks, nothing carries over.
pub fn compute_table_ranks(table: &Table, config: &RankConfig) -> TableRanks {
    let columns: Vec<RankAssignment> = (1..table.column_count())
        .map(|c| compute_ranks(table.rows(), c, config))
        .collect();
    tracing::debug!(
        generation = table.generation(),
        columns = columns.len(),
        "recomputed table ranks"
    );
    TableRanks { generation: table.generation(), columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{sort_table, SortDirection};

    fn one_column(values: &[&str]) -> Table {
        let rows: Vec<[&str; 2]> = values.iter().map(|v| ["m", *v]).collect();
        Table::new(["Method", "Score"], rows).unwrap()
    }

    fn ranks_in_load_order(a: &RankAssignment, n: usize) -> Vec<Option<u8>> {
        (0..n).map(|i| a.get(RowId(i)).map(Rank::get)).collect()
    }

    // ── Rank ─────────────────────────────────────────────────────────────

    #[test]
    fn test_rank_clamps_to_max() {
        assert_eq!(Rank::from_position(1, 8).get(), 1);
        assert_eq!(Rank::from_position(8, 8).get(), 8);
        assert_eq!(Rank::from_position(12, 8).get(), 8);
        assert_eq!(Rank::from_position(5, 3).get(), 3);
    }

    #[test]
    fn test_rank_class_names() {
        assert_eq!(Rank::from_position(1, 8).class_name(), "rank-1");
        assert_eq!(Rank::from_position(40, 8).class_name(), "rank-8");
    }

    // ── compute_ranks ────────────────────────────────────────────────────

    #[test]
    fn test_ties_follow_encounter_order() {
        let t = one_column(&["95", "87", "95", "40"]);
        let a = compute_ranks(t.rows(), 1, &RankConfig::default());
        assert_eq!(ranks_in_load_order(&a, 4), [Some(1), Some(3), Some(2), Some(4)]);
    }

    #[test]
    fn test_missing_and_text_unranked() {
        let t = one_column(&["-", "50%", "", "n/a", "70%"]);
        let a = compute_ranks(t.rows(), 1, &RankConfig::default());
        assert_eq!(ranks_in_load_order(&a, 5), [None, Some(2), None, None, Some(1)]);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_empty_numeric_set_is_empty_mapping() {
        let t = one_column(&["-", "", "tbd"]);
        let a = compute_ranks(t.rows(), 1, &RankConfig::default());
        assert!(a.is_empty());
        assert_eq!(a.column(), 1);
    }

    #[test]
    fn test_twelve_rows_never_exceed_eight() {
        let values: Vec<String> = (0..12).map(|i| alloc::format!("{}.5", i)).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let t = one_column(&refs);
        let a = compute_ranks(t.rows(), 1, &RankConfig::default());
        assert_eq!(a.len(), 12);
        assert!(a.iter().all(|(_, r)| r.get() <= 8));
        // The five lowest values all land on rank 8.
        assert_eq!(a.iter().filter(|(_, r)| r.get() == 8).count(), 5);
        assert_eq!(a.get(RowId(11)).map(Rank::get), Some(1));
    }

    #[test]
    fn test_negative_values_ranked() {
        let t = one_column(&["-999", "-1", "-"]);
        let a = compute_ranks(t.rows(), 1, &RankConfig::default());
        assert_eq!(ranks_in_load_order(&a, 3), [Some(2), Some(1), None]);
    }

    #[test]
    fn test_idempotent() {
        let t = one_column(&["95", "87", "95", "40"]);
        let cfg = RankConfig::default();
        assert_eq!(compute_ranks(t.rows(), 1, &cfg), compute_ranks(t.rows(), 1, &cfg));
        assert_eq!(compute_table_ranks(&t, &cfg), compute_table_ranks(&t, &cfg));
    }

    #[test]
    fn test_tie_order_follows_current_display_order() {
        let mut t = Table::new(
            ["Method", "Score", "Tiebreak"],
            [["a", "95", "1"], ["b", "87", "2"], ["c", "95", "3"]],
        )
        .unwrap();
        let cfg = RankConfig::default();
        // Put row c ahead of row a; ties now resolve the other way.
        sort_table(&mut t, 2, SortDirection::Descending, &cfg).unwrap();
        let ranks = compute_table_ranks(&t, &cfg);
        assert_eq!(ranks.rank_of(RowId(2), 1).map(Rank::get), Some(1));
        assert_eq!(ranks.rank_of(RowId(0), 1).map(Rank::get), Some(2));
        assert_eq!(ranks.rank_of(RowId(1), 1).map(Rank::get), Some(3));
    }

    // ── TableRanks ───────────────────────────────────────────────────────

    #[test]
    fn test_table_ranks_cover_data_columns_only() {
        let t = Table::new(["Method", "A", "B"], [["x", "1", "-"], ["y", "2", "3"]]).unwrap();
        let ranks = compute_table_ranks(&t, &RankConfig::default());
        assert_eq!(ranks.columns().len(), 2);
        assert!(ranks.column(0).is_none());
        assert!(ranks.column(3).is_none());
        assert_eq!(ranks.rank_of(RowId(1), 1).map(Rank::get), Some(1));
        assert_eq!(ranks.rank_of(RowId(0), 2), None);
    }

    #[test]
    fn test_staleness_tracks_generation() {
        let mut t = one_column(&["1", "2"]);
        let cfg = RankConfig::default();
        let ranks = compute_table_ranks(&t, &cfg);
        assert!(ranks.check_fresh(&t).is_ok());
        t.set_cell_text(RowId(0), 1, "3").unwrap();
        assert_eq!(
            ranks.check_fresh(&t),
            Err(TableError::StaleRanks { computed: 0, current: 1 })
        );
        let ranks = compute_table_ranks(&t, &cfg);
        assert_eq!(ranks.rank_of(RowId(0), 1).map(Rank::get), Some(1));
    }
}
