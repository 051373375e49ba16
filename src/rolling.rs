use std::collections::VecDeque;

use crate::{Price, ring_buffer::RingBuffer};

/// Mean and sample variance over a trailing window.
///
/// Uses Welford add/remove updates, so each push is O(1). A window whose
/// values are all identical reports its exact value as the mean and exactly
/// zero variance, independent of accumulated rounding drift.
#[derive(Clone, Debug)]
pub(crate) struct RollingMoments {
    window: RingBuffer,
    count: usize,
    mean: f64,
    /// Sum of squared deviations from `mean`.
    m2: f64,
    last: Price,
    /// Length of the trailing run of identical values.
    run: usize,
}

impl RollingMoments {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            window: RingBuffer::new(length),
            count: 0,
            mean: 0.0,
            m2: 0.0,
            last: 0.0,
            run: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Price) {
        let evicted = self.window.push(value);

        self.add(value);
        if let Some(old) = evicted {
            self.remove(old);
        }

        self.run = if self.run > 0 && value == self.last {
            self.run.saturating_add(1)
        } else {
            1
        };
        self.last = value;
    }

    /// Window mean, `None` until the window is full.
    #[inline]
    pub(crate) fn mean(&self) -> Option<f64> {
        self.window
            .is_ready()
            .then(|| if self.is_flat() { self.last } else { self.mean })
    }

    /// Sample (n − 1) variance, `None` until the window is full or when the
    /// window holds a single value.
    #[inline]
    pub(crate) fn variance(&self) -> Option<f64> {
        if !self.window.is_ready() || self.count < 2 {
            return None;
        }

        if self.is_flat() {
            return Some(0.0);
        }

        #[allow(clippy::cast_precision_loss)]
        let variance = self.m2 / (self.count - 1) as f64;

        Some(variance.max(0.0))
    }

    #[inline]
    pub(crate) fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    #[inline]
    fn is_flat(&self) -> bool {
        self.run >= self.count
    }

    #[inline]
    fn add(&mut self, value: Price) {
        self.count += 1;

        let delta = value - self.mean;
        #[allow(clippy::cast_precision_loss)]
        let count = self.count as f64;
        self.mean += delta / count;
        self.m2 += delta * (value - self.mean);
    }

    #[inline]
    fn remove(&mut self, value: Price) {
        // Called right after `add`, so at least two values are tracked.
        self.count -= 1;

        let delta = value - self.mean;
        #[allow(clippy::cast_precision_loss)]
        let count = self.count as f64;
        self.mean -= delta / count;
        self.m2 -= delta * (value - self.mean);
    }
}

/// Trailing-window maximum (`MAX = true`) or minimum (`MAX = false`).
///
/// Keeps a monotonic deque of `(position, value)` candidates: every value is
/// pushed and popped at most once, so updates are O(1) amortized.
#[derive(Clone, Debug)]
pub(crate) struct RollingExtremum<const MAX: bool> {
    length: usize,
    seen: usize,
    candidates: VecDeque<(usize, Price)>,
}

pub(crate) type RollingMax = RollingExtremum<true>;
pub(crate) type RollingMin = RollingExtremum<false>;

impl<const MAX: bool> RollingExtremum<MAX> {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            length,
            seen: 0,
            candidates: VecDeque::new(),
        }
    }

    /// Pushes the next value and returns the window extremum once `length`
    /// values have been seen.
    #[inline]
    pub(crate) fn push(&mut self, value: Price) -> Option<Price> {
        let position = self.seen;
        self.seen += 1;

        while let Some(&(_, back)) = self.candidates.back()
            && Self::supersedes(value, back)
        {
            self.candidates.pop_back();
        }
        self.candidates.push_back((position, value));

        while let Some(&(front, _)) = self.candidates.front()
            && position - front >= self.length
        {
            self.candidates.pop_front();
        }

        self.candidates
            .front()
            .filter(|_| self.seen >= self.length)
            .map(|&(_, extremum)| extremum)
    }

    #[inline]
    fn supersedes(value: Price, candidate: Price) -> bool {
        if MAX {
            value >= candidate
        } else {
            value <= candidate
        }
    }
}
