//! Python FFI bindings via PyO3.
//!
//! Lets static-site build scripts sort and rank results tables before the page
//! is rendered.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from table_rank import TableRanker, normalize
//!
//! ranker = TableRanker(
//!     ["Method", "Success"],
//!     [["baseline", "30%"], ["ours", "42.5%"], ["prior", "-"]],
//! )
//! ranker.activate_header(1)      # "asc"
//! ranker.settle()
//! print(ranker.labels())         # ['prior', 'baseline', 'ours']
//! print(ranker.rank_classes(1))  # [None, 'rank-2', 'rank-1']
//! print(normalize("42.5%"))      # 42.5
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::RankConfig;
use crate::error::TableError;
use crate::ranker::TableRanker as RustTableRanker;
use crate::sort::SortDirection;
use crate::table::{RowId, Table};
use crate::value::{normalize as rust_normalize, NormalizedValue};

fn to_py_err(e: TableError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn direction_name(d: SortDirection) -> &'static str {
    match d {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    }
}

// ── normalize ────────────────────────────────────────────────────────────────

/// Normalize cell text: None for a missing cell, a float for a number, the
/// trimmed text otherwise.
#[pyfunction]
pub fn normalize(py: Python<'_>, text: &str) -> PyObject {
    match rust_normalize(text) {
        NormalizedValue::Missing => py.None(),
        NormalizedValue::Number(v) => v.into_py(py),
        NormalizedValue::Text(t) => t.into_py(py),
    }
}

// ── TableRanker ──────────────────────────────────────────────────────────────

/// Sortable, rank-highlighted results table.
///
/// Args:
///     headers:  header texts, label column first
///     rows:     one list of cell texts per row, same length as headers
///     max_rank: ranks past this value share it (1–8, default 8)
#[pyclass(name = "TableRanker")]
pub struct PyTableRanker {
    inner: RustTableRanker,
}

#[pymethods]
impl PyTableRanker {
    /// Build a ranker. Raises ValueError for ragged rows or a bad max_rank.
    #[new]
    #[pyo3(signature = (headers, rows, max_rank=8))]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, max_rank: u8) -> PyResult<Self> {
        let table = Table::new(headers, rows).map_err(to_py_err)?;
        let config = RankConfig { max_rank, ..RankConfig::default() };
        let inner = RustTableRanker::new(table, config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Click a header. Returns "asc" or "desc".
    pub fn activate_header(&mut self, column: usize) -> PyResult<&'static str> {
        self.inner
            .activate_header(column)
            .map(direction_name)
            .map_err(to_py_err)
    }

    /// Run the pending re-rank now.
    pub fn settle(&mut self) {
        self.inner.settle();
    }

    /// Load-time row indices in display order.
    pub fn order(&self) -> Vec<usize> {
        self.inner.table().order().into_iter().map(|r| r.0).collect()
    }

    /// Label-column texts in display order.
    pub fn labels(&self) -> Vec<String> {
        self.inner
            .table()
            .rows()
            .iter()
            .map(|r| r.label().to_owned())
            .collect()
    }

    /// Rank of the row loaded at index `row` in `column`, or None.
    pub fn rank_of(&self, row: usize, column: usize) -> PyResult<Option<u8>> {
        let rank = self.inner.rank_of(RowId(row), column).map_err(to_py_err)?;
        Ok(rank.map(|r| r.get()))
    }

    /// `rank-N` class per row of `column` in display order, None if unranked.
    pub fn rank_classes(&self, column: usize) -> PyResult<Vec<Option<&'static str>>> {
        let ranks = self.inner.ranks().map_err(to_py_err)?;
        Ok(self
            .inner
            .table()
            .rows()
            .iter()
            .map(|r| ranks.rank_of(r.id(), column).map(|k| k.class_name()))
            .collect())
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let table = self.inner.table();
        format!(
            "TableRanker(columns={}, rows={})",
            table.column_count(),
            table.row_count()
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Results-table sorting and ranking.
#[pymodule]
pub fn table_rank(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTableRanker>()?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("MAX_RANK", crate::config::DEFAULT_MAX_RANK)?;
    Ok(())
}
