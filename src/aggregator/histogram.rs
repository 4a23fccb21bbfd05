//! Equal-width histograms and summary statistics over metric series.
//!
//! These are the numeric form of the charts the presentation layer draws:
//! where drops concentrate along the trace, and how latencies spread.

use crate::utils::config::{DROP_BUCKETS_LARGE, DROP_BUCKETS_SMALL};
use serde::{Deserialize, Serialize};

/// Equal-width histogram over `[lower, upper]`
///
/// The last bin is closed on the right, every other bin is half open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub lower: f64,
    pub upper: f64,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins over `[lower, upper]`
    ///
    /// Values outside the range are ignored.
    pub fn with_range(
        values: impl IntoIterator<Item = i64>,
        bins: usize,
        lower: f64,
        upper: f64,
    ) -> Self {
        let mut counts = vec![0u64; bins];
        if bins > 0 && upper > lower {
            let width = (upper - lower) / bins as f64;
            for value in values {
                let v = value as f64;
                if v < lower || v > upper {
                    continue;
                }
                let index = (((v - lower) / width) as usize).min(bins - 1);
                counts[index] += 1;
            }
        }
        Self {
            lower,
            upper,
            counts,
        }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        if self.counts.is_empty() {
            0.0
        } else {
            (self.upper - self.lower) / self.counts.len() as f64
        }
    }

    /// Bin edges, one more than the number of bins
    pub fn edges(&self) -> Vec<f64> {
        let width = self.bin_width();
        (0..=self.counts.len())
            .map(|i| self.lower + width * i as f64)
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Range covering every value of every series, widened around a single point
///
/// Returns `None` when all series are empty.
pub fn shared_range(series: &[&[i64]]) -> Option<(f64, f64)> {
    let mut values = series.iter().flat_map(|s| s.iter().copied());
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min == max {
        Some((min as f64 - 0.5, max as f64 + 0.5))
    } else {
        Some((min as f64, max as f64))
    }
}

/// Number of buckets for the drop-position histogram
pub fn drop_bucket_count(expected_count: usize) -> usize {
    if expected_count >= DROP_BUCKETS_LARGE {
        DROP_BUCKETS_LARGE
    } else if expected_count >= DROP_BUCKETS_SMALL {
        DROP_BUCKETS_SMALL
    } else {
        expected_count
    }
}

/// Summary statistics of one latency series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: i64,
}

impl LatencyStats {
    /// Returns `None` for an empty series
    pub fn from_values(values: &[i64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let sum: i128 = sorted.iter().map(|&v| v as i128).sum();

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum as f64 / count as f64,
            median: sorted[count / 2],
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "n={} | min {} | median {} | mean {:.1} | max {}",
            self.count, self.min, self.median, self.mean, self.max
        )
    }
}
