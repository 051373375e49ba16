use std::fmt::Display;

use crate::{
    Column, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorSeries, Ohlcv, Price,
    PriceSeries, PriceSource, Result, evaluate, indicator::check_length, rolling::RollingMoments,
};

/// Configuration for the Bollinger Bands ([`Bb`]) indicator.
///
/// Defaults: length 20 on the typical price
/// ([`PriceSource::HLC3`]).
///
/// # Example
///
/// ```
/// use ohlc_ta::{BbConfig, IndicatorConfig, IndicatorConfigBuilder, PriceSource};
///
/// let config = BbConfig::builder()
///     .length(10)
///     .source(PriceSource::Close)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.length(), 10);
/// assert_eq!(config.warm_up_bars(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BbConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for BbConfig {
    type Builder = BbConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        BbConfigBuilder::new()
    }

    /// A single-bar window has no sample deviation, so it never produces
    /// output.
    #[inline]
    fn warm_up_bars(&self) -> usize {
        if self.length == 1 {
            usize::MAX
        } else {
            self.length - 1
        }
    }

    #[inline]
    fn required_columns(&self) -> &'static [Column] {
        self.source.columns()
    }
}

impl BbConfig {
    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// Typical-price bands over a custom window.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if
    /// `length` is zero or above [`MAX_LENGTH`](crate::MAX_LENGTH).
    pub fn with_length(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }
}

impl Default for BbConfig {
    fn default() -> Self {
        Self {
            length: 20,
            source: PriceSource::HLC3,
        }
    }
}

impl Display for BbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BbConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`BbConfig`].
///
/// Starts from [`BbConfig::default`].
pub struct BbConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl BbConfigBuilder {
    fn new() -> Self {
        let BbConfig { length, source } = BbConfig::default();
        Self { length, source }
    }

    /// Sets the window length. A length of 1 is accepted but yields no
    /// bands.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<BbConfig> for BbConfigBuilder {
    fn build(self) -> Result<BbConfig> {
        Ok(BbConfig {
            length: check_length("length", self.length)?,
            source: self.source,
        })
    }
}

/// Bollinger Bands output for one bar.
///
/// ```text
/// +2sd = MA + 2σ
/// +1sd = MA + σ
/// MA   = mean of the window
/// −1sd = MA − σ
/// −2sd = MA − 2σ
/// ```
///
/// `σ` is the sample (n − 1) standard deviation of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BbValue {
    middle: Price,
    std_dev: f64,
}

impl BbValue {
    /// `MA − 2σ`.
    #[inline]
    #[must_use]
    pub fn lower2(&self) -> Price {
        self.middle - 2.0 * self.std_dev
    }

    /// `MA − σ`.
    #[inline]
    #[must_use]
    pub fn lower1(&self) -> Price {
        self.middle - self.std_dev
    }

    /// Moving average of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// `MA + σ`.
    #[inline]
    #[must_use]
    pub fn upper1(&self) -> Price {
        self.middle + self.std_dev
    }

    /// `MA + 2σ`.
    #[inline]
    #[must_use]
    pub fn upper2(&self) -> Price {
        self.middle + 2.0 * self.std_dev
    }

    /// Sample standard deviation of the window. Never negative.
    #[inline]
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Width of the outer bands: `4σ`.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper2() - self.lower2()
    }
}

impl Display for BbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(-2sd: {}, -1sd: {}, MA: {}, +1sd: {}, +2sd: {})",
            self.lower2(),
            self.lower1(),
            self.middle,
            self.upper1(),
            self.upper2()
        )
    }
}

/// Bollinger Bands (BB).
///
/// A moving average of the configured price with bands one and two sample
/// standard deviations away on either side.
///
/// The window's mean and variance are maintained incrementally, so each
/// bar costs O(1).
///
/// # Example
///
/// ```
/// use ohlc_ta::{Bb, BbConfig, IndicatorConfig, IndicatorConfigBuilder};
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
/// let mut bb = Bb::new(BbConfig::builder().length(2).build().unwrap());
///
/// assert!(bb.compute(&Bar(3.0, 1)).is_none());
///
/// // [3, 5]: MA = 4, σ = √2
/// let value = bb.compute(&Bar(5.0, 2)).unwrap();
/// assert_eq!(value.middle(), 4.0);
/// assert!((value.std_dev() - 2f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct Bb {
    config: BbConfig,
    moments: RollingMoments,
    current: Option<BbValue>,
}

impl Indicator for Bb {
    type Config = BbConfig;
    type Output = BbValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            moments: RollingMoments::new(config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        self.moments.push(self.config.source.extract(ohlcv));

        self.current = match (self.moments.mean(), self.moments.std_dev()) {
            (Some(middle), Some(std_dev)) => Some(BbValue { middle, std_dev }),
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BB({}, {})", self.config.length, self.config.source)
    }
}

/// Bollinger Bands over a whole series.
///
/// Returns one row per date with a full window: `series.len() − (length − 1)`
/// rows, or none when the series is shorter than the window.
///
/// # Errors
///
/// [`Error::MissingColumn`](crate::Error::MissingColumn) if the series lacks
/// a column the price source reads (`high`, `low`, `close` by default).
pub fn bollinger_bands(series: &PriceSeries, config: BbConfig) -> Result<IndicatorSeries<BbValue>> {
    evaluate::<Bb>(config, series)
}
