//! Presentation seam.
//!
//! The core never touches a document. A [`TableRanker`](crate::ranker::TableRanker)
//! pushes its derived state through [`RenderTarget`], and whatever owns the
//! real table (DOM bindings, a terminal widget, a static-site generator)
//! decides what a sort arrow or a `rank-3` marker looks like.
//!
//! [`MarkupTable`] is a plain in-memory target that records the applied
//! state as the class names a stylesheet would key on.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::rank::Rank;
use crate::sort::SortDirection;
use crate::table::{RowId, LABEL_COLUMN};

/// Receiver of derived table state.
pub trait RenderTarget {
    /// Show rows in this order.
    fn reorder_rows(&mut self, order: &[RowId]);

    /// Set or clear the sort arrow on a header.
    fn set_sort_indicator(&mut self, column: usize, direction: Option<SortDirection>);

    /// Remove every rank marker.
    fn clear_rank_markers(&mut self);

    /// Mark one cell with its rank.
    fn set_rank_marker(&mut self, row: RowId, column: usize, rank: Rank);

    /// Highlight a single row, or none.
    fn set_active_row(&mut self, row: Option<RowId>);

    /// Replace the displayed text of a data cell. Called for every data cell
    /// on each apply, so counter frames show up here.
    fn set_cell_text(&mut self, _row: RowId, _column: usize, _text: &str) {}
}

/// In-memory [`RenderTarget`] recording presentation state as class names.
#[derive(Clone, Debug, Default)]
pub struct MarkupTable {
    order: Vec<RowId>,
    indicators: Vec<Option<SortDirection>>,
    markers: HashMap<(RowId, usize), Rank>,
    active_row: Option<RowId>,
    texts: HashMap<(RowId, usize), String>,
}

impl MarkupTable {
    /// Target for a table with `columns` columns.
    pub fn new(columns: usize) -> Self {
        Self {
            indicators: vec![None; columns],
            ..Self::default()
        }
    }

    /// Row order last applied.
    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    /// Rank marker on a cell.
    pub fn marker(&self, row: RowId, column: usize) -> Option<Rank> {
        self.markers.get(&(row, column)).copied()
    }

    /// Number of marked cells.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Active row last applied.
    pub fn active_row(&self) -> Option<RowId> {
        self.active_row
    }

    /// Text last applied to a cell.
    pub fn cell_text(&self, row: RowId, column: usize) -> Option<&str> {
        self.texts.get(&(row, column)).map(String::as_str)
    }

    /// Header classes: `sortable` on data columns plus the arrow class and
    /// `sort-indicator-animate` on the active one.
    pub fn header_classes(&self, column: usize) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if column == LABEL_COLUMN || column >= self.indicators.len() {
            return classes;
        }
        classes.push("sortable");
        if let Some(dir) = self.indicators[column] {
            classes.push(dir.indicator_class());
            classes.push("sort-indicator-animate");
        }
        classes
    }

    /// Cell classes: the rank class when the cell is marked.
    pub fn cell_classes(&self, row: RowId, column: usize) -> Vec<&'static str> {
        self.marker(row, column).map(Rank::class_name).into_iter().collect()
    }
}

impl RenderTarget for MarkupTable {
    fn reorder_rows(&mut self, order: &[RowId]) {
        self.order.clear();
        self.order.extend_from_slice(order);
    }

    fn set_sort_indicator(&mut self, column: usize, direction: Option<SortDirection>) {
        if column >= self.indicators.len() {
            self.indicators.resize(column + 1, None);
        }
        self.indicators[column] = direction;
    }

    fn clear_rank_markers(&mut self) {
        self.markers.clear();
    }

    fn set_rank_marker(&mut self, row: RowId, column: usize, rank: Rank) {
        self.markers.insert((row, column), rank);
    }

    fn set_active_row(&mut self, row: Option<RowId>) {
        self.active_row = row;
    }

    fn set_cell_text(&mut self, row: RowId, column: usize, text: &str) {
        self.texts.insert((row, column), String::from(text));
    }
}
