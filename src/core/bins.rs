//! Equal-width binning for the histogram
//!
//! Bins are half-open `[x0, x1)` except the last, which also holds the
//! maximum value. Sentinel values are never counted.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::record::is_sentinel;
use super::scale::extent;

/// A numeric interval reported by histogram interactions. Half-open unless
/// `closed`, which the last bin sets so its maximum stays inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinRange {
    pub x0: f64,
    pub x1: f64,
    #[serde(default)]
    pub closed: bool,
}

impl BinRange {
    /// `[x0, x1)`
    pub fn new(x0: f64, x1: f64) -> Self {
        Self { x0, x1, closed: false }
    }

    /// `[x0, x1]`
    pub fn closed(x0: f64, x1: f64) -> Self {
        Self { x0, x1, closed: true }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.x0 && (v < self.x1 || (self.closed && v == self.x1))
    }
}

/// One histogram bucket
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
    /// Bucket holds its upper bound too (last bin only)
    pub closed: bool,
}

impl Bin {
    pub fn range(&self) -> BinRange {
        BinRange {
            x0: self.x0,
            x1: self.x1,
            closed: self.closed,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.range().contains(v)
    }
}

/// Bin layout over a fixed extent
#[derive(Clone, Debug, PartialEq)]
pub struct Binning {
    pub bins: Vec<Bin>,
    pub extent: (f64, f64),
}

impl Binning {
    /// Partition the non-sentinel `values` into exactly `num_bins` equal-width
    /// bins spanning their extent. No values (or zero bins) gives no bins.
    pub fn new(values: impl IntoIterator<Item = f64> + Clone, num_bins: usize) -> Self {
        let Some((min, max)) = extent(values.clone()) else {
            return Self {
                bins: Vec::new(),
                extent: (0.0, 0.0),
            };
        };
        if num_bins == 0 {
            return Self {
                bins: Vec::new(),
                extent: (min, max),
            };
        }

        let width = (max - min) / num_bins as f64;
        let edge = |i: usize| {
            if i == num_bins {
                max
            } else {
                min + width * i as f64
            }
        };
        let mut bins: Vec<Bin> = (0..num_bins)
            .map(|i| Bin {
                x0: edge(i),
                x1: edge(i + 1),
                count: 0,
                closed: i + 1 == num_bins,
            })
            .collect();

        for v in values {
            if is_sentinel(v) || !v.is_finite() {
                continue;
            }
            if let Some(idx) = locate(&bins, min, width, v) {
                bins[idx].count += 1;
            }
        }
        trace!(num_bins, min, max, "Binned values");
        Self {
            bins,
            extent: (min, max),
        }
    }

    /// Index of the bin holding `v`, if any
    pub fn index_of(&self, v: f64) -> Option<usize> {
        let first = self.bins.first()?;
        let width = first.x1 - first.x0;
        locate(&self.bins, self.extent.0, width, v)
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Estimate the bucket arithmetically, then settle against the actual edges
/// so membership always agrees with `Bin::contains`.
fn locate(bins: &[Bin], min: f64, width: f64, v: f64) -> Option<usize> {
    if bins.is_empty() || is_sentinel(v) || !v.is_finite() {
        return None;
    }
    let last = bins.len() - 1;
    let mut idx = if width > 0.0 {
        (((v - min) / width).floor().max(0.0) as usize).min(last)
    } else {
        last
    };
    while idx > 0 && v < bins[idx].x0 {
        idx -= 1;
    }
    while idx < last && v >= bins[idx].x1 {
        idx += 1;
    }
    bins[idx].contains(v).then_some(idx)
}
