//! Animated counters for numeric result cells.
//!
//! A counter rewrites its cell from 0 up to the cell's value in equal
//! increments, one frame at a time, then writes the exact target:
//!
//! ```text
//! "30.0%" (30 steps) → "1.0%", "2.0%", … "30.0%", "30.0%"
//! ```
//!
//! Percent cells are formatted with one decimal and a `%`, everything else
//! with two decimals. Only the sequence of texts is produced here; the
//! [`TableRanker`](crate::ranker::TableRanker) paces frames by elapsed time.

use alloc::format;
use alloc::string::String;

use crate::config::RankConfig;
use crate::table::{RowId, LABEL_COLUMN};
use crate::value::normalize_with;

/// One rewritten cell text produced by a counter frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterFrame {
    /// Row being animated.
    pub row: RowId,
    /// Column being animated.
    pub column: usize,
    /// New cell text.
    pub text: String,
}

/// Count-up animation state for one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    row: RowId,
    column: usize,
    target: f64,
    increment: f64,
    current: f64,
    percent: bool,
    done: bool,
}

impl CounterAnimation {
    /// Animation for a cell, or `None` if the cell does not animate.
    ///
    /// Only data cells whose text contains `%` or `.` and reads as a number
    /// animate; integers and text are left alone.
    pub fn for_cell(row: RowId, column: usize, text: &str, config: &RankConfig) -> Option<Self> {
        if column == LABEL_COLUMN || !(text.contains('%') || text.contains('.')) {
            return None;
        }
        let target = normalize_with(text, config).as_number()?;
        let steps = f64::from(config.counter_steps.max(1));
        Some(Self {
            row,
            column,
            target,
            increment: target / steps,
            current: 0.0,
            percent: text.contains('%'),
            done: false,
        })
    }

    /// Row this counter writes to.
    pub fn row(&self) -> RowId {
        self.row
    }

    /// Column this counter writes to.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Value the counter settles on.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `true` once the exact target has been written.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one frame. Returns the text to write, or `None` when finished.
    pub fn step(&mut self) -> Option<CounterFrame> {
        if self.done {
            return None;
        }
        let value = if self.current < self.target {
            self.current += self.increment;
            self.current
        } else {
            self.done = true;
            self.target
        };
        Some(CounterFrame {
            row: self.row,
            column: self.column,
            text: self.format(value),
        })
    }

    fn format(&self, value: f64) -> String {
        if self.percent {
            format!("{:.1}%", value)
        } else {
            format!("{:.2}", value)
        }
    }
}
