//! Descriptive statistics for assembly pipelines
//!
//! This crate computes mean, standard deviation, mode, median, and median
//! absolute deviation (MAD) over numeric datasets, using two complementary
//! strategies:
//!
//! - **Online**: [`OnlineStats`] maintains running mean and variance across
//!   an unbounded stream with Welford's numerically stable update, in O(1)
//!   memory. Insertions can be undone, and a one-way `finalize` freezes the
//!   result.
//! - **Offline**: [`HistogramStats`] accumulates non-negative integer
//!   samples into a value-indexed frequency table and computes all summary
//!   statistics directly from the table, caching them until the next
//!   mutation. The [`batch`] module holds the matching free functions for
//!   raw sample vectors, including an outlier-filtered mean/stddev.
//!
//! # Examples
//!
//! ## Streaming
//!
//! ```rust
//! use asm_stats::OnlineStats;
//!
//! let mut stats = OnlineStats::new();
//! for read_length in [1500.0, 1320.0, 2210.0, 1480.0] {
//!     stats.insert(read_length);
//! }
//!
//! stats.finalize();
//! assert!(stats.stddev() > 0.0);
//! ```
//!
//! ## Histogram
//!
//! ```rust
//! use asm_stats::HistogramStats;
//!
//! let mut lengths = HistogramStats::new();
//! lengths.add_n(1500, 12);
//! lengths.add_n(2300, 4);
//!
//! assert_eq!(lengths.num_objects(), 16);
//! assert_eq!(lengths.median(), 1500);
//!
//! let mut dump = Vec::new();
//! lengths.write_histogram(&mut dump, "readLength").unwrap();
//! ```
//!
//! ## Batch estimators
//!
//! ```rust
//! use asm_stats::batch::{filtered_mean_stddev, median_absolute_deviation};
//!
//! let mut spans = vec![980i64, 1010, 995, 1005, 990, 250_000];
//! let (mean, stddev) = filtered_mean_stddev(&mut spans, false);
//! assert!(mean < 1100.0); // the outlier is discarded, not averaged in
//! ```

pub mod batch;
pub mod error;
pub mod histogram;
pub mod online;

pub use batch::{
    exponential_moving_average, filtered_mean_stddev, median_absolute_deviation, mode, Sample,
};
pub use error::{Error, Result};
pub use histogram::HistogramStats;
pub use online::OnlineStats;
