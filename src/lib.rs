//! # table-rank
//!
//! Sorting and best-value highlighting for results tables.
//!
//! Benchmark pages show tables where the first column names a method and
//! every other column holds a score: `91.2%`, `0.43`, or `-` where a method
//! was not evaluated. Readers click a header to sort by that metric and
//! expect the best scores in each column to stand out. This crate is the
//! data side of that interaction, with no document model attached.
//!
//! ## The pipeline
//!
//! ```text
//! cell text ──normalize──▶ NormalizedValue ──compare_values──▶ stable sort
//!                                  │
//!                                  └──compute_ranks──▶ Rank 1..=8 per cell
//!
//! header click ──▶ TableRanker ──▶ RenderTarget (order, arrows, rank-N markers)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`value`] | [`NormalizedValue`] | Cell text → number, opaque text or missing |
//! | [`table`] | [`Table`], [`RowId`] | Rows of cell text with stable identity and a mutation counter |
//! | [`sort`] | [`SortState`], [`SortDirection`] | Stable column sort and the header state machine |
//! | [`rank`] | [`Rank`], [`TableRanks`] | Per-column ranking, highest value first, clamped to 8 |
//! | [`ranker`] | [`TableRanker`] | One interactive table: clicks, deferred re-rank, selection, counters |
//! | [`render`] | [`RenderTarget`], [`render::MarkupTable`] | Seam to whatever draws the table |
//! | [`counter`] | [`counter::CounterAnimation`] | Count-up animation frames for numeric cells |
//! | [`config`] | [`RankConfig`] | Tunables with page-friendly defaults |
//! | [`snapshot`] | [`snapshot::TableSnapshot`] | Serialisable ranked view (requires `serde` feature) |
//!
//! ## `no_std`
//!
//! The crate is `#![no_std]` with `alloc` by default. Enable `std` to link the
//! standard library, `serde` for serialisation and `python-ffi` for the PyO3
//! bindings.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod config;
pub mod counter;
pub mod error;
pub mod rank;
pub mod ranker;
pub mod render;
pub mod sort;
pub mod table;
pub mod value;
#[cfg(feature = "serde")]
pub mod snapshot;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use config::RankConfig;
pub use error::TableError;
pub use rank::{compute_ranks, compute_table_ranks, Rank, RankAssignment, TableRanks};
pub use ranker::TableRanker;
pub use render::RenderTarget;
pub use sort::{sort_rows, sort_table, SortDirection, SortState};
pub use table::{Row, RowId, Table};
pub use value::{compare_values, normalize, NormalizedValue};
