//! Histogram-based descriptive statistics
//!
//! Accumulates non-negative integer samples into a value-indexed frequency
//! table and computes mean, standard deviation, mode, median, and MAD
//! directly from the table, so repeated values cost no extra memory and the
//! raw samples never have to be retained. Derived statistics are cached and
//! lazily recomputed: any mutation marks the cache dirty, any accessor
//! recomputes it in full.

use std::fmt;
use std::io::{BufRead, Write};

use log::error;

use crate::error::{Error, Result};

/// Initial number of bucket slots.
const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Frequency-table statistics engine for non-negative integer samples.
///
/// The backing vector is indexed by sample value (index = value, slot =
/// frequency) and always covers the highest value inserted so far; it grows
/// by doubling with zero fill. That addressing scheme is an invariant, not
/// an implementation detail: `bucket(v)` is the number of times `v` was
/// added.
///
/// # Example
///
/// ```
/// use asm_stats::HistogramStats;
///
/// let mut hist = HistogramStats::new();
/// for v in [1, 2, 2, 3, 3, 3] {
///     hist.add(v);
/// }
///
/// assert_eq!(hist.num_objects(), 6);
/// assert_eq!(hist.mode(), 3);
/// assert_eq!(hist.median(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct HistogramStats {
    /// Frequency of each value; index = value.
    histogram: Vec<u64>,
    /// Highest value ever inserted.
    max: u64,

    /// Whether the derived statistics below are current.
    finalized: bool,

    num_objs: u64,
    mean: f64,
    stddev: f64,
    mode: u64,
    median: u64,
    mad: u64,
}

impl Default for HistogramStats {
    fn default() -> Self {
        Self::new()
    }
}

impl HistogramStats {
    /// Create an empty engine with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty engine sized for values up to `capacity - 1` before
    /// the first resize.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            histogram: vec![0; capacity.max(1)],
            max: 0,
            finalized: false,
            num_objs: 0,
            mean: 0.0,
            stddev: 0.0,
            mode: 0,
            median: 0,
            mad: 0,
        }
    }

    /// Add one sample.
    pub fn add(&mut self, value: u64) {
        self.add_n(value, 1);
    }

    /// Add `count` samples of the same value.
    pub fn add_n(&mut self, value: u64, count: u64) {
        let mut len = self.histogram.len();
        while (len as u64) <= value {
            len *= 2;
        }
        if len > self.histogram.len() {
            self.histogram.resize(len, 0);
        }

        if self.max < value {
            self.max = value;
        }

        self.histogram[value as usize] += count;
        self.finalized = false;
    }

    /// Total number of samples.
    pub fn num_objects(&mut self) -> u64 {
        self.finalize_data();
        self.num_objs
    }

    /// Mean of all samples.
    pub fn mean(&mut self) -> f64 {
        self.finalize_data();
        self.mean
    }

    /// Unbiased sample standard deviation.
    pub fn stddev(&mut self) -> f64 {
        self.finalize_data();
        self.stddev
    }

    /// Most frequent value; ties resolve to the smallest value.
    pub fn mode(&mut self) -> u64 {
        self.finalize_data();
        self.mode
    }

    /// Lower median: the smallest value whose cumulative frequency reaches
    /// at least half the total count.
    pub fn median(&mut self) -> u64 {
        self.finalize_data();
        self.median
    }

    /// Median absolute deviation from the median.
    pub fn mad(&mut self) -> u64 {
        self.finalize_data();
        self.mad
    }

    /// Frequency of `value`. Zero for values never inserted, including
    /// values beyond the allocated table.
    pub fn bucket(&mut self, value: u64) -> u64 {
        self.finalize_data();
        self.histogram.get(value as usize).copied().unwrap_or(0)
    }

    /// Highest value ever inserted.
    pub fn max_value(&mut self) -> u64 {
        self.finalize_data();
        self.max
    }

    /// Reset the cached derived statistics to zero. The bucket contents and
    /// the cache flag are untouched, so with a clean cache the zeros persist
    /// until the next mutation.
    pub fn clear_statistics(&mut self) {
        self.num_objs = 0;
        self.mean = 0.0;
        self.stddev = 0.0;
        self.mode = 0;
        self.median = 0;
        self.mad = 0;
    }

    /// Recompute the derived statistics if a mutation invalidated them.
    ///
    /// Reading guide: `ii` is the value of a sample and `histogram[ii]` is
    /// how many of them we have, so a weighted sum over `ii` is the plain
    /// algorithm with each sample's contribution multiplied in.
    fn finalize_data(&mut self) {
        if self.finalized {
            return;
        }

        self.clear_statistics();

        let max = self.max as usize;

        for ii in 0..=max {
            self.num_objs += self.histogram[ii];
        }

        for ii in 0..=max {
            self.mean += (ii as u64 * self.histogram[ii]) as f64;
        }
        if self.num_objs > 0 {
            self.mean /= self.num_objs as f64;
        }

        let mut ssd = 0.0;
        for ii in 0..=max {
            let dev = ii as f64 - self.mean;
            ssd += self.histogram[ii] as f64 * dev * dev;
        }
        if self.num_objs > 1 {
            self.stddev = (ssd / (self.num_objs - 1) as f64).sqrt();
        }

        //  First value with the strictly greatest frequency wins, so ties
        //  resolve to the smallest value.
        for ii in 0..=max {
            if self.histogram[ii] > self.histogram[self.mode as usize] {
                self.mode = ii as u64;
            }
        }

        //  Lower median: walk the buckets until we have seen half the
        //  samples.
        let half = self.num_objs / 2;
        let mut seen = 0;
        for ii in 0..=max {
            seen += self.histogram[ii];
            if seen >= half {
                self.median = ii as u64;
                break;
            }
        }

        //  The MAD is the median of the absolute deviations from the
        //  median, which is itself a median over a histogram: bucket the
        //  deviations and rerun the same scan. Deviations span the full
        //  value range (consider most of the mass at 0 and one sample at
        //  max), so the table needs max + 1 slots.
        let maddata_max = max + 1;
        let mut maddata = vec![0u64; maddata_max];

        for ii in 0..=max {
            if self.histogram[ii] > 0 {
                let ii = ii as u64;
                let deviation = if ii < self.median {
                    self.median - ii
                } else {
                    ii - self.median
                };

                if deviation as usize >= maddata_max {
                    error!("finalize_data()-- failed at value={ii} for max={max}");
                    error!("finalize_data()--   median={}", self.median);
                    error!("finalize_data()--   deviation={deviation}");
                }
                assert!(
                    (deviation as usize) < maddata_max,
                    "deviation {deviation} outside table of {maddata_max} slots"
                );

                maddata[deviation as usize] += self.histogram[ii as usize];
            }
        }

        let mut seen = 0;
        for (ii, count) in maddata.iter().enumerate() {
            seen += count;
            if seen >= half {
                self.mad = ii as u64;
                break;
            }
        }

        self.finalized = true;
    }

    /// Write the two-column tab-separated dump: a `#<label>	quantity`
    /// header, then one `value	frequency` line per value from 0 to the
    /// highest inserted value, zero-frequency slots included.
    pub fn write_histogram<W: Write>(&self, writer: &mut W, label: &str) -> Result<()> {
        writeln!(writer, "#{label}\tquantity")?;

        for ii in 0..=self.max as usize {
            writeln!(writer, "{ii}\t{}", self.histogram[ii])?;
        }

        Ok(())
    }

    /// Rebuild an engine from a dump produced by
    /// [`write_histogram`](HistogramStats::write_histogram). Header lines
    /// (`#...`) and blank lines are skipped; anything else must be two
    /// tab-separated integers.
    pub fn read_histogram<R: BufRead>(reader: R) -> Result<Self> {
        let mut hist = Self::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let value = fields.next();
            let count = fields.next();

            let (value, count) = match (value, count, fields.next()) {
                (Some(v), Some(c), None) => {
                    let v = v
                        .parse::<u64>()
                        .map_err(|_| Error::malformed_line(line_no + 1, line))?;
                    let c = c
                        .parse::<u64>()
                        .map_err(|_| Error::malformed_line(line_no + 1, line))?;
                    (v, c)
                }
                _ => return Err(Error::malformed_line(line_no + 1, line)),
            };

            if count > 0 {
                hist.add_n(value, count);
            }
        }

        Ok(hist)
    }
}

impl fmt::Display for HistogramStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: u64 = self.histogram[..=self.max as usize].iter().sum();
        write!(f, "HistogramStats(n={}, max={})", total, self.max)
    }
}
