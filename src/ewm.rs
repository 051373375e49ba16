use crate::Price;

/// Exponentially weighted mean with the unadjusted recurrence.
///
/// The first observation seeds the state as-is, then every observation
/// updates it with
///
/// ```text
/// ewm = α × x + (1 − α) × prev_ewm
/// ```
///
/// No finite-history reweighting is applied. The value is reported once
/// `min_periods` observations have been folded in; the state is carried
/// from the very first observation regardless.
#[derive(Clone, Debug)]
pub(crate) struct Ewm {
    alpha: f64,
    min_periods: usize,
    seen: usize,
    state: Option<Price>,
}

impl Ewm {
    /// `α = 2 / (span + 1)`, reported after `span` observations.
    pub(crate) fn with_span(span: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let alpha = 2.0 / (span as f64 + 1.0);

        Self::new(alpha, span)
    }

    /// Wilder smoothing: centre of mass `length − 1`, i.e. `α = 1 / length`,
    /// reported after `length` observations.
    pub(crate) fn wilder(length: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let alpha = 1.0 / length as f64;

        Self::new(alpha, length)
    }

    fn new(alpha: f64, min_periods: usize) -> Self {
        debug_assert!(alpha > 0.0 && alpha <= 1.0, "alpha out of range: {alpha}");

        Self {
            alpha,
            min_periods,
            seen: 0,
            state: None,
        }
    }

    /// Folds the next observation in and returns the reported value.
    #[inline]
    pub(crate) fn update(&mut self, value: Price) -> Option<Price> {
        let next = match self.state {
            Some(prev) => self.alpha.mul_add(value - prev, prev),
            None => value,
        };

        self.state = Some(next);
        self.seen = self.seen.saturating_add(1);

        self.value()
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<Price> {
        self.state.filter(|_| self.seen >= self.min_periods)
    }
}
