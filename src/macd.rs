use std::fmt::Display;

use crate::{
    Column, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorSeries, Ohlcv, Price,
    PriceSeries, PriceSource, Result, evaluate, ewm::Ewm, indicator::check_length,
};

/// Configuration for the [`Macd`] indicator.
///
/// Defaults: fast 12, slow 26, signal 9, on the close.
///
/// # Example
///
/// ```
/// use ohlc_ta::{IndicatorConfig, IndicatorConfigBuilder, MacdConfig};
///
/// // Override only the signal span.
/// let config = MacdConfig::builder().signal(5).build().unwrap();
///
/// assert_eq!((config.fast(), config.slow(), config.signal()), (12, 26, 5));
/// assert_eq!(config.warm_up_bars(), 29);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    /// The MACD line needs the longer of the two spans, the trigger needs
    /// `signal` MACD values on top.
    #[inline]
    fn warm_up_bars(&self) -> usize {
        (self.fast.max(self.slow) - 1).saturating_add(self.signal - 1)
    }

    #[inline]
    fn required_columns(&self) -> &'static [Column] {
        self.source.columns()
    }
}

impl MacdConfig {
    /// Span of the fast EMA.
    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    /// Span of the slow EMA.
    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    /// Span of the trigger (signal) EMA over the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// MACD on the close with custom spans.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if any
    /// span is zero.
    pub fn close(fast: usize, slow: usize, signal: usize) -> Result<Self> {
        Self::builder().fast(fast).slow(slow).signal(signal).build()
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
            source: PriceSource::Close,
        }
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Starts from [`MacdConfig::default`]; any subset of spans may be
/// overridden.
pub struct MacdConfigBuilder {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        let MacdConfig {
            fast,
            slow,
            signal,
            source,
        } = MacdConfig::default();

        Self {
            fast,
            slow,
            signal,
            source,
        }
    }

    #[inline]
    #[must_use]
    pub fn fast(mut self, fast: usize) -> Self {
        self.fast = fast;
        self
    }

    #[inline]
    #[must_use]
    pub fn slow(mut self, slow: usize) -> Self {
        self.slow = slow;
        self
    }

    #[inline]
    #[must_use]
    pub fn signal(mut self, signal: usize) -> Self {
        self.signal = signal;
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    fn build(self) -> Result<MacdConfig> {
        Ok(MacdConfig {
            fast: check_length("fast", self.fast)?,
            slow: check_length("slow", self.slow)?,
            signal: check_length("signal", self.signal)?,
            source: self.source,
        })
    }
}

/// MACD output for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdValue {
    macd: Price,
    trigger: Price,
}

impl MacdValue {
    /// `EMA_fast − EMA_slow`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// EMA of the MACD line (signal line).
    #[inline]
    #[must_use]
    pub fn trigger(&self) -> Price {
        self.trigger
    }

    /// `MACD − trigger` (histogram).
    #[inline]
    #[must_use]
    pub fn delta(&self) -> Price {
        self.macd - self.trigger
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(macd: {}, trigger: {}, delta: {})",
            self.macd,
            self.trigger,
            self.delta()
        )
    }
}

/// Moving Average Convergence/Divergence (MACD).
///
/// Difference between a fast and a slow exponential average of the price,
/// with a trigger line that exponentially averages the difference itself.
///
/// All three averages use `α = 2 / (span + 1)` with the unadjusted
/// recurrence seeded by their first input:
///
/// ```text
/// fast    = EMA(price, fast)       reported after `fast` bars
/// slow    = EMA(price, slow)       reported after `slow` bars
/// macd    = fast − slow            defined once both are reported
/// trigger = EMA(macd, signal)      seeded by the first defined macd
/// delta   = macd − trigger
/// ```
///
/// # Example
///
/// ```
/// use ohlc_ta::{Macd, MacdConfig};
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
/// let mut macd = Macd::new(MacdConfig::close(1, 3, 1).unwrap());
///
/// // slow EMA (α = 0.5) reported from the third bar
/// assert!(macd.compute(&Bar(2.0, 1)).is_none());
/// assert!(macd.compute(&Bar(4.0, 2)).is_none());
///
/// // fast = 6, slow = 4.5
/// let value = macd.compute(&Bar(6.0, 3)).unwrap();
/// assert_eq!(value.macd(), 1.5);
/// assert_eq!(value.delta(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ewm,
    slow: Ewm,
    trigger: Ewm,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            fast: Ewm::with_span(config.fast),
            slow: Ewm::with_span(config.slow),
            trigger: Ewm::with_span(config.signal),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        let price = self.config.source.extract(ohlcv);

        let fast = self.fast.update(price);
        let slow = self.slow.update(price);

        self.current = fast.zip(slow).and_then(|(fast, slow)| {
            let macd = fast - slow;

            self.trigger
                .update(macd)
                .map(|trigger| MacdValue { macd, trigger })
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal, self.config.source
        )
    }
}

/// MACD over a whole series.
///
/// The first row is at position `max(fast, slow) − 1 + signal − 1`; earlier
/// dates are omitted.
///
/// # Errors
///
/// [`Error::MissingColumn`](crate::Error::MissingColumn) if the series lacks
/// the `close` column (or the configured source's columns).
pub fn macd(series: &PriceSeries, config: MacdConfig) -> Result<IndicatorSeries<MacdValue>> {
    evaluate::<Macd>(config, series)
}
