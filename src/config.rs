//! Tunables for normalization, ranking and the animated counters.
//!
//! Defaults: ranks are compressed to eight display groups, `-` and empty cells
//! are missing values, re-ranking after a sort waits 100 ms and counters run
//! 30 frames of 20 ms.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::TableError;

/// Highest rank handed out by default. Rows past it share this rank.
pub const DEFAULT_MAX_RANK: u8 = 8;

/// Configuration for a [`TableRanker`](crate::ranker::TableRanker).
///
/// ```rust
/// use table_rank::config::RankConfig;
///
/// let cfg = RankConfig { max_rank: 3, ..RankConfig::default() };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankConfig {
    /// Ranks above this value are clamped to it. Must be in `1..=8`.
    pub max_rank: u8,
    /// Trimmed cell texts treated as missing values.
    pub missing_markers: Vec<String>,
    /// Delay between a reorder and the re-rank that follows it.
    pub rehighlight_delay_ms: u32,
    /// Frames an animated counter takes to climb from 0 to its target.
    pub counter_steps: u32,
    /// Interval between counter frames when driven by
    /// [`TableRanker::advance_counters`](crate::ranker::TableRanker::advance_counters).
    pub counter_frame_ms: u32,
}

impl RankConfig {
    /// Construct the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.max_rank == 0 || self.max_rank > DEFAULT_MAX_RANK {
            return Err(TableError::InvalidConfig("max_rank must be between 1 and 8"));
        }
        if self.counter_steps == 0 {
            return Err(TableError::InvalidConfig("counter_steps must be at least 1"));
        }
        if self.counter_frame_ms == 0 {
            return Err(TableError::InvalidConfig("counter_frame_ms must be at least 1"));
        }
        Ok(())
    }

    /// Whether `trimmed` is one of the configured missing markers.
    pub fn is_missing(&self, trimmed: &str) -> bool {
        self.missing_markers.iter().any(|m| m == trimmed)
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            max_rank: DEFAULT_MAX_RANK,
            missing_markers: vec![String::new(), String::from("-")],
            rehighlight_delay_ms: 100,
            counter_steps: 30,
            counter_frame_ms: 20,
        }
    }
}
