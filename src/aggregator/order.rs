//! Classification of packets into in-order, reordered and dropped.
//!
//! In-order packets are counted over runs of strictly consecutive receive
//! indices (`n, n+1, n+2, ...`). Absent indices (dropped packets) are
//! transparent: they neither extend nor break a run.
//!
//! A run scores its length when it is well started, and one less otherwise:
//! its first packet is the one that moved, the rest kept their relative order.
//!
//! - The first run is well started when its first value is `1`.
//! - Any later run is well started when its first value equals the zero-based
//!   row position it was observed at.
//!
//! The two anchors differ on purpose and must stay that way until checked
//! against captured ground truth.

use crate::utils::error::ConfigError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Run currently being extended
#[derive(Debug, Clone, Copy)]
struct Run {
    last: u64,
    len: u64,
    well_started: bool,
}

impl Run {
    fn score(&self) -> u64 {
        if self.well_started {
            self.len
        } else {
            self.len - 1
        }
    }
}

/// Incremental run-based in-order counter
///
/// Feed it every present receive index together with the row position it
/// sits at, then call [`OrderCounter::finish`].
#[derive(Debug, Default)]
pub struct OrderCounter {
    current: Option<Run>,
    in_order: u64,
    runs: usize,
}

impl OrderCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the receive index found at row `position`
    pub fn observe(&mut self, position: usize, value: u64) {
        match self.current.as_mut() {
            Some(run) if run.last.checked_add(1) == Some(value) => {
                run.last = value;
                run.len += 1;
            }
            Some(run) => {
                self.in_order += run.score();
                self.runs += 1;
                self.current = Some(Run {
                    last: value,
                    len: 1,
                    well_started: value == position as u64,
                });
            }
            None => {
                self.current = Some(Run {
                    last: value,
                    len: 1,
                    well_started: value == 1,
                });
            }
        }
    }

    /// Close the trailing run and return the in-order count
    pub fn finish(mut self) -> u64 {
        if let Some(run) = self.current.take() {
            self.in_order += run.score();
            self.runs += 1;
        }
        debug!("Counted {} in-order packets over {} runs", self.in_order, self.runs);
        self.in_order
    }
}

/// Count in-order packets over a receive index sequence in row order
///
/// **Public** - main entry point of the classifier
pub fn count_in_order(indices: &[Option<u64>]) -> u64 {
    let mut counter = OrderCounter::new();
    for (position, index) in indices.iter().enumerate() {
        if let Some(value) = *index {
            counter.observe(position, value);
        }
    }
    counter.finish()
}

/// Split of the expected packets into in-order, reordered and dropped
///
/// `in_order + reordered + dropped == expected_count` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub in_order: u64,
    pub reordered: u64,
    pub dropped: u64,
}

impl Classification {
    /// Classify a receive index sequence without checking `expected_count`
    ///
    /// Callers must already know `expected_count` covers every row.
    pub fn from_indices(indices: &[Option<u64>], expected_count: usize) -> Self {
        let dropped = indices.iter().filter(|i| i.is_none()).count() as u64;
        Self::from_counts(expected_count, count_in_order(indices), dropped)
    }

    /// Derive the reordered share from the other two
    pub fn from_counts(expected_count: usize, in_order: u64, dropped: u64) -> Self {
        Self {
            in_order,
            reordered: (expected_count as u64).saturating_sub(in_order + dropped),
            dropped,
        }
    }

    pub fn total(&self) -> u64 {
        self.in_order + self.reordered + self.dropped
    }
}

/// Classify a receive index sequence against the number of packets sent
///
/// # Errors
/// * `ConfigError::ExpectedCountTooSmall` - fewer packets expected than rows present
pub fn classify(
    indices: &[Option<u64>],
    expected_count: usize,
) -> Result<Classification, ConfigError> {
    check_expected_count(expected_count, indices.len())?;
    Ok(Classification::from_indices(indices, expected_count))
}

/// Reject an expected count that cannot cover the trace
pub fn check_expected_count(expected_count: usize, rows: usize) -> Result<(), ConfigError> {
    if expected_count < rows {
        return Err(ConfigError::ExpectedCountTooSmall {
            expected: expected_count,
            rows,
        });
    }
    if expected_count > rows {
        warn!(
            "Trace holds {} rows but {} packets were expected; capture may be truncated",
            rows, expected_count
        );
    }
    Ok(())
}
