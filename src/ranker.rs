//! One interactive table: header activation, deferred re-ranking, row
//! selection and counter animation over a single [`Table`].
//!
//! All derived state lives here and is recomputed from the rows, never
//! patched:
//!
//! ```text
//! activate_header ──▶ SortState ──▶ sort_table ──▶ refresh pending
//!                                                        │ advance / settle
//!                                                        ▼
//!                                            compute_table_ranks ──▶ apply(target)
//! ```
//!
//! Every mutating call takes `&mut self`; there is exactly one writer.

use alloc::vec::Vec;

use crate::config::RankConfig;
use crate::counter::{CounterAnimation, CounterFrame};
use crate::error::TableError;
use crate::rank::{compute_table_ranks, Rank, TableRanks};
use crate::render::RenderTarget;
use crate::sort::{sort_table, SortDirection, SortState};
use crate::table::{RowId, Table};

/// Sort, rank and highlight driver for one table.
///
/// ```rust
/// use table_rank::ranker::TableRanker;
/// use table_rank::table::{RowId, Table};
///
/// let table = Table::new(
///     ["Method", "Success"],
///     [["a", "40%"], ["b", "95%"], ["c", "-"]],
/// ).unwrap();
/// let mut ranker = TableRanker::from_table(table);
/// ranker.activate_header(1).unwrap();
/// ranker.settle();
/// assert_eq!(ranker.rank_of(RowId(1), 1).unwrap().map(|r| r.get()), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct TableRanker {
    table: Table,
    config: RankConfig,
    sort: SortState,
    ranks: TableRanks,
    /// Milliseconds left before the scheduled re-rank runs.
    refresh_in: Option<u32>,
    active_row: Option<RowId>,
    counters: Vec<CounterAnimation>,
    /// Time banked toward the next counter frame.
    counter_elapsed: u32,
}

impl TableRanker {
    /// Wrap `table`, validating `config` and ranking the initial rows.
    pub fn new(table: Table, config: RankConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::build(table, config))
    }

    /// Wrap `table` with the default configuration.
    pub fn from_table(table: Table) -> Self {
        Self::build(table, RankConfig::default())
    }

    fn build(table: Table, config: RankConfig) -> Self {
        let ranks = compute_table_ranks(&table, &config);
        Self {
            table,
            config,
            sort: SortState::new(),
            ranks,
            refresh_in: None,
            active_row: None,
            counters: Vec::new(),
            counter_elapsed: 0,
        }
    }

    /// The table in its current order.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Active configuration.
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Current header state.
    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    // ── Sorting ────────────────────────────────────────────────────────────

    /// Handle a click on the header of `column`.
    ///
    /// Advances the header state machine, reorders the rows and schedules a
    /// re-rank after [`RankConfig::rehighlight_delay_ms`]. The label column
    /// and unknown columns are rejected without touching any state.
    pub fn activate_header(&mut self, column: usize) -> Result<SortDirection, TableError> {
        if let Err(e) = self.table.check_data_column(column) {
            tracing::warn!(column, error = %e, "header activation rejected");
            return Err(e);
        }
        let direction = self.sort.activate(column);
        sort_table(&mut self.table, column, direction, &self.config)?;
        self.schedule_refresh();
        Ok(direction)
    }

    // ── Ranking ────────────────────────────────────────────────────────────

    /// Ranks for the current rows, or [`TableError::StaleRanks`] if the rows
    /// changed since the last re-rank.
    pub fn ranks(&self) -> Result<&TableRanks, TableError> {
        self.ranks.check_fresh(&self.table)?;
        Ok(&self.ranks)
    }

    /// Rank of one cell. Fails only when ranks are stale.
    pub fn rank_of(&self, row: RowId, column: usize) -> Result<Option<Rank>, TableError> {
        Ok(self.ranks()?.rank_of(row, column))
    }

    /// `true` while a re-rank is scheduled.
    pub fn refresh_pending(&self) -> bool {
        self.refresh_in.is_some()
    }

    /// Let `elapsed_ms` pass. Runs the scheduled re-rank once it is due and
    /// returns whether it ran.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        match self.refresh_in {
            Some(left) if elapsed_ms >= left => {
                self.refresh_ranks();
                true
            }
            Some(left) => {
                self.refresh_in = Some(left - elapsed_ms);
                false
            }
            None => false,
        }
    }

    /// Run any scheduled re-rank now.
    pub fn settle(&mut self) {
        if self.refresh_in.is_some() {
            self.refresh_ranks();
        }
    }

    /// Recompute every column's ranks from the current rows.
    pub fn refresh_ranks(&mut self) {
        self.ranks = compute_table_ranks(&self.table, &self.config);
        self.refresh_in = None;
    }

    /// Arm the deferred re-rank. A refresh that is already pending is
    /// pushed back, never dropped.
    fn schedule_refresh(&mut self) {
        if self.config.rehighlight_delay_ms == 0 {
            self.refresh_ranks();
        } else {
            self.refresh_in = Some(self.config.rehighlight_delay_ms);
        }
    }

    // ── Rows and cells ─────────────────────────────────────────────────────

    /// Make `row` the single active row.
    pub fn select_row(&mut self, row: RowId) -> Result<(), TableError> {
        if self.table.row(row).is_none() {
            return Err(TableError::UnknownRow(row));
        }
        self.active_row = Some(row);
        Ok(())
    }

    /// Clear the active row.
    pub fn clear_selection(&mut self) {
        self.active_row = None;
    }

    /// The active row, if any.
    pub fn active_row(&self) -> Option<RowId> {
        self.active_row
    }

    /// Rewrite a cell. Ranks go stale until the next re-rank.
    pub fn set_cell_text(
        &mut self,
        row: RowId,
        column: usize,
        text: &str,
    ) -> Result<(), TableError> {
        self.table.set_cell_text(row, column, text)
    }

    // ── Counters ───────────────────────────────────────────────────────────

    /// Start a count-up animation on every eligible cell. Replaces any
    /// animations still running and returns how many started.
    pub fn start_counters(&mut self) -> usize {
        let config = &self.config;
        self.counters = self
            .table
            .rows()
            .iter()
            .flat_map(|row| {
                row.cells()
                    .iter()
                    .enumerate()
                    .filter_map(move |(c, text)| {
                        CounterAnimation::for_cell(row.id(), c, text, config)
                    })
            })
            .collect();
        self.counter_elapsed = 0;
        tracing::debug!(counters = self.counters.len(), "counters started");
        self.counters.len()
    }

    /// `true` while any counter has frames left.
    pub fn counters_running(&self) -> bool {
        self.counters.iter().any(|c| !c.is_done())
    }

    /// Advance every running counter by one frame and write the frames into
    /// the table. When the last counter settles a re-rank is scheduled.
    pub fn step_counters(&mut self) -> Result<Vec<CounterFrame>, TableError> {
        let frames: Vec<CounterFrame> = self
            .counters
            .iter_mut()
            .filter_map(CounterAnimation::step)
            .collect();
        for frame in &frames {
            tracing::trace!(
                row = frame.row.0,
                column = frame.column,
                text = %frame.text,
                "counter frame"
            );
            self.table.set_cell_text(frame.row, frame.column, frame.text.as_str())?;
        }
        if !frames.is_empty() && !self.counters_running() {
            self.counters.clear();
            self.counter_elapsed = 0;
            self.schedule_refresh();
        }
        Ok(frames)
    }

    /// Let `elapsed_ms` pass for the counters. Steps one frame for every
    /// [`RankConfig::counter_frame_ms`] banked; the remainder carries over to
    /// the next call. Returns the frames in the order they were produced.
    pub fn advance_counters(&mut self, elapsed_ms: u32) -> Result<Vec<CounterFrame>, TableError> {
        let mut frames = Vec::new();
        if !self.counters_running() {
            return Ok(frames);
        }
        let frame_ms = self.config.counter_frame_ms.max(1);
        self.counter_elapsed = self.counter_elapsed.saturating_add(elapsed_ms);
        while self.counter_elapsed >= frame_ms && self.counters_running() {
            self.counter_elapsed -= frame_ms;
            frames.extend(self.step_counters()?);
        }
        Ok(frames)
    }

    // ── Presentation ───────────────────────────────────────────────────────

    /// Push order, sort indicators, cell texts and the active row into
    /// `target`.
    ///
    /// Rank markers are repainted only when ranks are fresh; while a re-rank
    /// is pending the previous markers stay in place. Returns whether the
    /// markers were repainted.
    pub fn apply<T: RenderTarget + ?Sized>(&self, target: &mut T) -> bool {
        target.reorder_rows(&self.table.order());
        for column in 1..self.table.column_count() {
            target.set_sort_indicator(column, self.sort.direction(column));
        }
        for row in self.table.rows() {
            for (column, text) in row.cells().iter().enumerate().skip(1) {
                target.set_cell_text(row.id(), column, text);
            }
        }
        target.set_active_row(self.active_row);

        let Ok(ranks) = self.ranks() else {
            return false;
        };
        target.clear_rank_markers();
        for assignment in ranks.columns() {
            for (row, rank) in assignment.iter() {
                target.set_rank_marker(row, assignment.column(), rank);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MarkupTable;

    fn benchmark() -> TableRanker {
        let table = Table::new(
            ["Method", "Success", "SPL"],
            [
                ["baseline", "30%", "0.41"],
                ["ablation", "10%", "-"],
                ["prior", "-", "0.52"],
                ["ours", "20%", "0.60"],
            ],
        )
        .unwrap();
        TableRanker::from_table(table)
    }

    fn labels(r: &TableRanker) -> Vec<&str> {
        r.table().rows().iter().map(|row| row.label()).collect()
    }

    #[test]
    fn test_initial_load_is_ranked() {
        let r = benchmark();
        assert!(!r.refresh_pending());
        assert_eq!(r.rank_of(RowId(0), 1).unwrap().map(Rank::get), Some(1));
        assert_eq!(r.rank_of(RowId(3), 2).unwrap().map(Rank::get), Some(1));
        assert_eq!(r.rank_of(RowId(2), 1).unwrap(), None);
    }

    #[test]
    fn test_header_toggle_sequence() {
        let mut r = benchmark();
        assert_eq!(r.activate_header(1).unwrap(), SortDirection::Ascending);
        assert_eq!(labels(&r), ["prior", "ablation", "ours", "baseline"]);
        assert_eq!(r.activate_header(1).unwrap(), SortDirection::Descending);
        assert_eq!(labels(&r), ["baseline", "ours", "ablation", "prior"]);
        assert_eq!(r.activate_header(1).unwrap(), SortDirection::Ascending);
    }

    #[test]
    fn test_switching_columns_clears_previous() {
        let mut r = benchmark();
        r.activate_header(1).unwrap();
        r.activate_header(2).unwrap();
        assert_eq!(r.sort_state().direction(1), None);
        assert_eq!(r.sort_state().direction(2), Some(SortDirection::Ascending));

        let mut target = MarkupTable::new(3);
        r.apply(&mut target);
        assert_eq!(target.header_classes(1), ["sortable"]);
        assert_eq!(
            target.header_classes(2),
            ["sortable", "sort-asc", "sort-indicator-animate"]
        );
    }

    #[test]
    fn test_label_column_rejected_without_side_effects() {
        let mut r = benchmark();
        assert_eq!(r.activate_header(0), Err(TableError::LabelColumn));
        assert!(matches!(r.activate_header(7), Err(TableError::ColumnOutOfRange { .. })));
        assert_eq!(r.sort_state().active(), None);
        assert!(r.ranks().is_ok());
    }

    #[test]
    fn test_ranks_stale_until_deferred_refresh() {
        let mut r = benchmark();
        r.activate_header(2).unwrap();
        assert!(r.refresh_pending());
        assert!(matches!(r.ranks(), Err(TableError::StaleRanks { .. })));

        assert!(!r.advance(60));
        assert!(r.refresh_pending());
        assert!(r.advance(40));
        assert!(!r.refresh_pending());
        assert!(r.ranks().is_ok());
    }

    #[test]
    fn test_second_sort_rearms_refresh() {
        let mut r = benchmark();
        r.activate_header(1).unwrap();
        r.advance(90);
        r.activate_header(1).unwrap();
        assert!(!r.advance(20));
        assert!(r.advance(80));
        assert!(r.ranks().is_ok());
    }

    #[test]
    fn test_zero_delay_refreshes_immediately() {
        let cfg = RankConfig { rehighlight_delay_ms: 0, ..RankConfig::default() };
        let table = Table::new(["M", "A"], [["x", "1"], ["y", "2"]]).unwrap();
        let mut r = TableRanker::new(table, cfg).unwrap();
        r.activate_header(1).unwrap();
        assert!(!r.refresh_pending());
        assert!(r.ranks().is_ok());
    }

    #[test]
    fn test_ranks_identical_after_refresh_without_changes() {
        let mut r = benchmark();
        let before = r.ranks().unwrap().clone();
        r.refresh_ranks();
        assert_eq!(r.ranks().unwrap(), &before);
    }

    #[test]
    fn test_sort_preserves_rank_mapping_without_ties() {
        let mut r = benchmark();
        let before = r.ranks().unwrap().clone();
        r.activate_header(1).unwrap();
        r.settle();
        let after = r.ranks().unwrap();
        for column in 1..3 {
            assert_eq!(after.column(column), before.column(column));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let table = Table::new(["M", "A"], [["x", "1"]]).unwrap();
        let cfg = RankConfig { max_rank: 0, ..RankConfig::default() };
        assert!(matches!(TableRanker::new(table, cfg), Err(TableError::InvalidConfig(_))));
    }

    #[test]
    fn test_single_active_row() {
        let mut r = benchmark();
        r.select_row(RowId(1)).unwrap();
        r.select_row(RowId(3)).unwrap();
        assert_eq!(r.active_row(), Some(RowId(3)));
        assert_eq!(r.select_row(RowId(9)), Err(TableError::UnknownRow(RowId(9))));
        assert_eq!(r.active_row(), Some(RowId(3)));
        r.clear_selection();
        assert_eq!(r.active_row(), None);
    }

    #[test]
    fn test_cell_edit_invalidates_ranks() {
        let mut r = benchmark();
        r.set_cell_text(RowId(1), 1, "99%").unwrap();
        assert!(r.ranks().is_err());
        r.refresh_ranks();
        assert_eq!(r.rank_of(RowId(1), 1).unwrap().map(Rank::get), Some(1));
    }

    #[test]
    fn test_apply_repaints_markers_only_when_fresh() {
        let mut r = benchmark();
        let mut target = MarkupTable::new(3);
        assert!(r.apply(&mut target));
        let marked = target.marker_count();
        assert_eq!(marked, 6);

        r.activate_header(1).unwrap();
        assert!(!r.apply(&mut target));
        assert_eq!(target.marker_count(), marked);
        assert_eq!(target.order(), r.table().order().as_slice());

        r.settle();
        assert!(r.apply(&mut target));
        assert_eq!(target.cell_classes(RowId(0), 1), ["rank-1"]);
        assert_eq!(target.cell_classes(RowId(2), 1), Vec::<&str>::new());
    }

    #[test]
    fn test_counters_settle_and_rerank() {
        let mut r = benchmark();
        // Six numeric cells carry % or a decimal point.
        assert_eq!(r.start_counters(), 6);
        let mut frames = 0;
        while r.counters_running() {
            frames += r.step_counters().unwrap().len();
            assert!(r.ranks().is_err() || !r.counters_running());
        }
        assert!(frames >= 6 * 31);
        assert_eq!(r.table().row(RowId(0)).unwrap().cell(1), Some("30.0%"));
        assert_eq!(r.table().row(RowId(3)).unwrap().cell(2), Some("0.60"));
        assert_eq!(r.table().row(RowId(1)).unwrap().cell(2), Some("-"));

        assert!(r.refresh_pending());
        r.settle();
        assert_eq!(r.rank_of(RowId(0), 1).unwrap().map(Rank::get), Some(1));
        assert!(r.step_counters().unwrap().is_empty());
    }

    #[test]
    fn test_counters_follow_frame_interval() {
        let mut r = benchmark();
        r.start_counters();
        // Under one 20 ms interval: nothing moves.
        assert!(r.advance_counters(19).unwrap().is_empty());
        assert_eq!(r.table().row(RowId(0)).unwrap().cell(1), Some("30%"));
        // The banked millisecond completes the first frame for all six cells.
        assert_eq!(r.advance_counters(1).unwrap().len(), 6);
        assert_eq!(r.table().row(RowId(0)).unwrap().cell(1), Some("1.0%"));
        // 50 ms is two frames with 10 ms carried over.
        assert_eq!(r.advance_counters(50).unwrap().len(), 12);
        assert_eq!(r.table().row(RowId(0)).unwrap().cell(1), Some("3.0%"));
        assert_eq!(r.advance_counters(10).unwrap().len(), 6);
        assert_eq!(r.table().row(RowId(0)).unwrap().cell(1), Some("4.0%"));
    }

    #[test]
    fn test_counters_honour_configured_interval() {
        let cfg = RankConfig { counter_frame_ms: 50, ..RankConfig::default() };
        let table = Table::new(["M", "A"], [["x", "30%"]]).unwrap();
        let mut r = TableRanker::new(table, cfg).unwrap();
        assert_eq!(r.start_counters(), 1);
        assert!(r.advance_counters(49).unwrap().is_empty());
        assert_eq!(r.advance_counters(1).unwrap().len(), 1);

        // A long pause runs the animation to the end and schedules a re-rank.
        let rest = r.advance_counters(60_000).unwrap();
        assert_eq!(rest.last().map(|f| f.text.as_str()), Some("30.0%"));
        assert!(!r.counters_running());
        assert!(r.refresh_pending());
        assert!(r.advance_counters(50).unwrap().is_empty());
    }

    #[test]
    fn test_apply_pushes_counter_text() {
        let mut r = benchmark();
        let mut target = MarkupTable::new(3);
        r.start_counters();
        r.step_counters().unwrap();
        r.apply(&mut target);
        assert_eq!(target.cell_text(RowId(0), 1), Some("1.0%"));
        assert_eq!(target.cell_text(RowId(1), 2), Some("-"));
        assert_eq!(target.cell_text(RowId(0), 0), None);
    }
}
