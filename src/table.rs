//! Table data model: headers, rows of cell text, stable row identity.
//!
//! A [`Table`] is built once from header and cell texts and afterwards only
//! changes by reordering rows or rewriting cell text. Each of those mutations
//! bumps [`Table::generation`], which lets derived data (ranks) detect that it
//! no longer matches the rows it was computed from.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::TableError;

/// Index of the label column. It is never sorted or ranked.
pub const LABEL_COLUMN: usize = 0;

/// Stable identity of a row: its position when the table was loaded.
///
/// Survives reordering, so rank markers and the active-row selection can
/// refer to a row wherever it currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowId(pub usize);

/// One table row: its id and one cell text per column.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    id: RowId,
    cells: Vec<String>,
}

impl Row {
    /// The row's stable id.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Raw text of the cell in `column`, if the column exists.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// All cell texts, label first.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Text of the label column.
    pub fn label(&self) -> &str {
        self.cells.first().map_or("", String::as_str)
    }
}

/// A results table with a fixed set of columns.
///
/// ```rust
/// use table_rank::table::Table;
///
/// let table = Table::new(
///     ["Method", "Acc"],
///     [["ours", "91.2%"], ["baseline", "-"]],
/// ).unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
    generation: u64,
}

impl Table {
    /// Build a table from header texts and row cell texts.
    ///
    /// Fails with [`TableError::NoColumns`] when there are no headers and with
    /// [`TableError::RowLength`] when any row's cell count differs from the
    /// header count.
    pub fn new<H, R, C>(headers: H, rows: R) -> Result<Self, TableError>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if headers.is_empty() {
            return Err(TableError::NoColumns);
        }
        let mut out = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            let cells: Vec<String> = row.into_iter().map(Into::into).collect();
            if cells.len() != headers.len() {
                return Err(TableError::RowLength {
                    row: i,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }
            out.push(Row { id: RowId(i), cells });
        }
        Ok(Self { headers, rows: out, generation: 0 })
    }

    /// Header texts, label column first.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of columns, label column included.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows in their current display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row ids in current display order.
    pub fn order(&self) -> Vec<RowId> {
        self.rows.iter().map(Row::id).collect()
    }

    /// Look up a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Mutation counter. Every reorder or cell rewrite increments it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Error unless `column` is a sortable, rankable column.
    pub fn check_data_column(&self, column: usize) -> Result<(), TableError> {
        if column >= self.headers.len() {
            return Err(TableError::ColumnOutOfRange {
                column,
                columns: self.headers.len(),
            });
        }
        if column == LABEL_COLUMN {
            return Err(TableError::LabelColumn);
        }
        Ok(())
    }

    /// Replace the text of one cell.
    pub fn set_cell_text(
        &mut self,
        id: RowId,
        column: usize,
        text: impl Into<String>,
    ) -> Result<(), TableError> {
        let columns = self.headers.len();
        if column >= columns {
            return Err(TableError::ColumnOutOfRange { column, columns });
        }
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(TableError::UnknownRow(id))?;
        row.cells[column] = text.into();
        self.generation += 1;
        Ok(())
    }

    /// Reorder rows in place through `f`, which must only permute them.
    pub(crate) fn reorder_with(&mut self, f: impl FnOnce(&mut Vec<Row>)) {
        f(&mut self.rows);
        self.generation += 1;
    }
}
