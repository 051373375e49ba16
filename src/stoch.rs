use std::fmt::Display;

use crate::{
    Column, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorSeries, Ohlcv, Price,
    PriceSeries, Result, evaluate,
    indicator::check_length,
    rolling::{RollingMax, RollingMin, RollingMoments},
};

/// %K reported when the high/low range of the window is zero.
///
/// The close then sits on both ends of the range at once; the midpoint is
/// reported instead of dividing by zero.
pub const FLAT_RANGE_K: f64 = 50.0;

/// Configuration for the Stochastic Oscillator ([`Stoch`]).
///
/// Defaults: 14-bar %K range, 3-bar %D average.
///
/// # Example
///
/// ```
/// use ohlc_ta::{IndicatorConfig, StochConfig};
///
/// let config = StochConfig::default();
/// assert_eq!((config.k_length(), config.d_length()), (14, 3));
/// assert_eq!(config.warm_up_bars(), 15);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct StochConfig {
    k_length: usize,
    d_length: usize,
}

impl IndicatorConfig for StochConfig {
    type Builder = StochConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        StochConfigBuilder::new()
    }

    #[inline]
    fn warm_up_bars(&self) -> usize {
        (self.k_length - 1).saturating_add(self.d_length - 1)
    }

    #[inline]
    fn required_columns(&self) -> &'static [Column] {
        &[Column::High, Column::Low, Column::Close]
    }
}

impl StochConfig {
    /// Lookback of the high/low range for %K.
    #[inline]
    #[must_use]
    pub fn k_length(&self) -> usize {
        self.k_length
    }

    /// Number of %K values averaged into %D.
    #[inline]
    #[must_use]
    pub fn d_length(&self) -> usize {
        self.d_length
    }
}

impl Default for StochConfig {
    fn default() -> Self {
        Self {
            k_length: 14,
            d_length: 3,
        }
    }
}

impl Display for StochConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StochConfig({}, {})", self.k_length, self.d_length)
    }
}

/// Builder for [`StochConfig`].
///
/// Starts from [`StochConfig::default`].
pub struct StochConfigBuilder {
    k_length: usize,
    d_length: usize,
}

impl StochConfigBuilder {
    fn new() -> Self {
        let StochConfig { k_length, d_length } = StochConfig::default();
        Self { k_length, d_length }
    }

    #[inline]
    #[must_use]
    pub fn k_length(mut self, k_length: usize) -> Self {
        self.k_length = k_length;
        self
    }

    #[inline]
    #[must_use]
    pub fn d_length(mut self, d_length: usize) -> Self {
        self.d_length = d_length;
        self
    }
}

impl IndicatorConfigBuilder<StochConfig> for StochConfigBuilder {
    fn build(self) -> Result<StochConfig> {
        Ok(StochConfig {
            k_length: check_length("k_length", self.k_length)?,
            d_length: check_length("d_length", self.d_length)?,
        })
    }
}

/// Stochastic Oscillator output for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochValue {
    k: f64,
    d: f64,
}

impl StochValue {
    /// %K: position of the close within the window's high/low range, 0–100.
    #[inline]
    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// %D: moving average of %K.
    #[inline]
    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }
}

impl Display for StochValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "STOCH(k: {}, d: {})", self.k, self.d)
    }
}

/// Stochastic Oscillator (%K / %D).
///
/// ```text
/// %K = (close − lowest low) × 100 / (highest high − lowest low)
/// %D = SMA(%K, d_length)
/// ```
///
/// Highs and lows are tracked over the last `k_length` bars with
/// monotonic deques. A zero range reports [`FLAT_RANGE_K`].
///
/// # Example
///
/// ```
/// use ohlc_ta::{IndicatorConfig, IndicatorConfigBuilder, Stoch, StochConfig};
/// # use ohlc_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn date(&self) -> Timestamp { self.3 }
/// #     fn open(&self) -> Price { self.2 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.1 }
/// #     fn close(&self) -> Price { self.2 }
/// # }
///
/// let config = StochConfig::builder().k_length(2).d_length(1).build().unwrap();
/// let mut stoch = Stoch::new(config);
///
/// assert!(stoch.compute(&Bar(12.0, 8.0, 10.0, 1)).is_none());
///
/// // range [8, 14], close 11 → %K = 50
/// let value = stoch.compute(&Bar(14.0, 9.0, 11.0, 2)).unwrap();
/// assert_eq!(value.k(), 50.0);
/// ```
#[derive(Clone, Debug)]
pub struct Stoch {
    config: StochConfig,
    highest: RollingMax,
    lowest: RollingMin,
    k_average: RollingMoments,
    current: Option<StochValue>,
}

impl Indicator for Stoch {
    type Config = StochConfig;
    type Output = StochValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            highest: RollingMax::new(config.k_length),
            lowest: RollingMin::new(config.k_length),
            k_average: RollingMoments::new(config.d_length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        let highest = self.highest.push(ohlcv.high());
        let lowest = self.lowest.push(ohlcv.low());

        let (Some(highest), Some(lowest)) = (highest, lowest) else {
            return None;
        };

        let k = Self::percent_k(ohlcv.close(), highest, lowest);
        self.k_average.push(k);

        self.current = self.k_average.mean().map(|d| StochValue { k, d });
        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Stoch {
    #[inline]
    fn percent_k(close: Price, highest: Price, lowest: Price) -> f64 {
        let range = highest - lowest;

        if range == 0.0 {
            FLAT_RANGE_K
        } else {
            (close - lowest) * 100.0 / range
        }
    }
}

impl Display for Stoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "STOCH({}, {})",
            self.config.k_length, self.config.d_length
        )
    }
}

/// Stochastic Oscillator over a whole series.
///
/// With the default config the first 15 dates (14-bar range, then two more
/// for the 3-bar %D) are omitted.
///
/// # Errors
///
/// [`Error::MissingColumn`](crate::Error::MissingColumn) if the series lacks
/// `high`, `low` or `close`.
pub fn stochastic(series: &PriceSeries, config: StochConfig) -> Result<IndicatorSeries<StochValue>> {
    evaluate::<Stoch>(config, series)
}
