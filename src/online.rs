//! Online mean and standard deviation
//!
//! Streaming estimator using Welford's numerically stable update
//! (B. P. Welford, Technometrics Vol 4 No 3, 1962; also Knuth TAOCP Vol 2,
//! 3rd ed., p. 232). Avoids the catastrophic cancellation of the naive
//! sum-of-squares method and needs O(1) memory per stream, so the sample
//! history never has to be retained.

/// Running mean and variance over an unbounded stream of values.
///
/// Supports insertion, removal (undoing a prior insertion), and a one-way
/// [`finalize`](OnlineStats::finalize) transition after which only the
/// finished standard deviation is retrievable and further mutation panics.
///
/// # Example
///
/// ```
/// use asm_stats::OnlineStats;
///
/// let mut stats = OnlineStats::new();
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.insert(value);
/// }
///
/// assert_eq!(stats.size(), 8);
/// assert!((stats.mean() - 5.0).abs() < 1e-12);
/// // Unbiased sample variance: 32 / 7.
/// assert!((stats.variance() - 32.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OnlineStats {
    /// Running mean.
    mean: f64,
    /// Welford's S, the running sum of squared deviations. After
    /// `finalize()` this field holds the finished standard deviation.
    sn: f64,
    /// Number of values in the set.
    count: u64,
    finalized: bool,
}

impl OnlineStats {
    /// Create an empty estimator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an estimator from pre-aggregated statistics.
    ///
    /// `sn` is the sum of squared deviations from `mean` over the `count`
    /// values already absorbed, i.e. the internal state another estimator
    /// would hold after inserting those values.
    pub fn with_state(mean: f64, sn: f64, count: u64) -> Self {
        Self {
            mean,
            sn,
            count,
            finalized: false,
        }
    }

    /// Insert a value into the set.
    ///
    /// # Panics
    ///
    /// Panics if the estimator has been finalized.
    pub fn insert(&mut self, value: f64) {
        assert!(
            !self.finalized,
            "OnlineStats has been finalized; can't insert() new value"
        );

        let m0 = self.mean;
        self.count += 1;
        self.mean = m0 + (value - m0) / self.count as f64;
        self.sn += (value - m0) * (value - self.mean);
    }

    /// Remove a previously inserted value, undoing its contribution.
    ///
    /// Reconstructs the pre-insertion mean and S algebraically. The caller
    /// must only remove values consistent with the insert history; this is
    /// not independently verified.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty or the estimator has been finalized.
    pub fn remove(&mut self, value: f64) {
        assert!(
            self.count > 0,
            "OnlineStats has no data; can't remove() old value"
        );
        assert!(
            !self.finalized,
            "OnlineStats has been finalized; can't remove() old value"
        );

        let n0 = self.count - 1;
        let m0 = if n0 == 0 {
            0.0
        } else {
            (self.count as f64 * self.mean - value) / n0 as f64
        };

        self.sn -= (value - m0) * (value - self.mean);
        self.mean = m0;
        self.count = n0;
    }

    /// Finish the estimator: compute the final standard deviation, store it
    /// in place of S, and forbid further mutation. Irreversible.
    pub fn finalize(&mut self) {
        self.sn = self.stddev();
        self.finalized = true;
    }

    /// Number of values in the set.
    pub fn size(&self) -> u64 {
        self.count
    }

    /// Whether `finalize()` has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Running mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance (0 with fewer than two values). After
    /// finalization this is reconstructed as the square of the stored
    /// standard deviation.
    pub fn variance(&self) -> f64 {
        if self.finalized {
            self.sn * self.sn
        } else if self.count < 2 {
            0.0
        } else {
            self.sn / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation. After finalization the stored value is
    /// returned directly.
    pub fn stddev(&self) -> f64 {
        if self.finalized {
            self.sn
        } else {
            self.variance().sqrt()
        }
    }
}
