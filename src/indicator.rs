use crate::{Column, Error, IndicatorSeries, Ohlcv, PriceSeries, Result};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use tracing::debug;

/// Largest accepted window or span.
pub const MAX_LENGTH: usize = u32::MAX as usize;

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its
/// parameters. Configs are value types: cheap to copy, compare, and hash.
/// [`Default`] yields the conventional parameters.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug + Default {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder preset with the default parameters.
    fn builder() -> Self::Builder;

    /// Number of leading bars that produce no output.
    ///
    /// A batch transform over `n` bars returns `n - warm_up_bars()` rows, or
    /// none when `n <= warm_up_bars()`. Saturates rather than overflowing
    /// for very long windows.
    fn warm_up_bars(&self) -> usize;

    /// Series columns the indicator reads.
    fn required_columns(&self) -> &'static [Column];
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Validates the parameters and builds the config.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if a period is below the indicator's
    /// minimum or above [`MAX_LENGTH`].
    fn build(self) -> Result<Config>;
}

/// A streaming technical indicator.
///
/// Indicators maintain internal state and update incrementally on each call
/// to [`compute`](Indicator::compute). Output is `None` until enough bars
/// have been received.
///
/// # Example
///
/// ```
/// use ohlc_ta::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Rsi, RsiConfig};
/// # use ohlc_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn date(&self) -> Timestamp { self.1 }
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// # }
///
/// let mut rsi = Rsi::new(RsiConfig::builder().length(2).build().unwrap());
///
/// assert!(rsi.compute(&Bar(10.0, 1)).is_none());
/// assert!(rsi.compute(&Bar(11.0, 2)).is_none());
/// assert_eq!(rsi.compute(&Bar(12.0, 3)).map(|v| v.rsi()), Some(100.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (e.g. Bollinger Bands).
    type Output: Copy + Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds the next bar and returns the updated indicator value,
    /// or `None` while still warming up.
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed value without advancing state.
    fn value(&self) -> Option<Self::Output>;
}

/// Runs an indicator across a whole series.
///
/// Checks the series schema first, then folds the streaming indicator over
/// every bar and keeps the defined rows.
///
/// # Errors
///
/// [`Error::MissingColumn`] if the series lacks a column the indicator
/// reads.
///
/// # Example
///
/// ```
/// use ohlc_ta::{evaluate, Bb, BbConfig, PriceSeries};
///
/// let series = PriceSeries::builder()
///     .dates(vec![1, 2, 3])
///     .close(vec![1.0, 2.0, 3.0])
///     .build()
///     .unwrap();
///
/// // HLC3 source needs high and low too.
/// assert!(evaluate::<Bb>(BbConfig::default(), &series).is_err());
/// ```
pub fn evaluate<I: Indicator>(
    config: I::Config,
    series: &PriceSeries,
) -> Result<IndicatorSeries<I::Output>> {
    series.require(config.required_columns())?;

    let mut indicator = I::new(config);
    let mut output = IndicatorSeries::with_capacity(series.len().saturating_sub(config.warm_up_bars()));

    for bar in series.bars() {
        if let Some(value) = indicator.compute(&bar) {
            output.push(bar.date(), value);
        }
    }

    debug!(
        indicator = %indicator,
        bars = series.len(),
        rows = output.len(),
        "evaluated indicator"
    );

    Ok(output)
}

/// Checks a window or span parameter against `[1, MAX_LENGTH]`.
pub(crate) fn check_length(name: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        })
    } else if value > MAX_LENGTH {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "exceeds the maximum window length",
        })
    } else {
        Ok(value)
    }
}
