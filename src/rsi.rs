use std::fmt::Display;

use crate::{
    Column, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorSeries, Ohlcv, Price,
    PriceSeries, PriceSource, Result, evaluate, ewm::Ewm, indicator::check_length,
};

/// Configuration for the Relative Strength Index ([`Rsi`])
/// indicator.
///
/// Defaults: length 14 on the close. Output begins at bar
/// `length + 1`, since the first bar has no price change.
///
/// # Example
///
/// ```
/// use ohlc_ta::{IndicatorConfig, RsiConfig};
///
/// let config = RsiConfig::close(14).unwrap();
/// assert_eq!(config.length(), 14);
/// assert_eq!(config.warm_up_bars(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn warm_up_bars(&self) -> usize {
        self.length
    }

    #[inline]
    fn required_columns(&self) -> &'static [Column] {
        self.source.columns()
    }
}

impl RsiConfig {
    /// Smoothing length (number of price changes).
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

    /// RSI on closing price.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if
    /// `length` is zero.
    pub fn close(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            length: 14,
            source: PriceSource::Close,
        }
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Starts from [`RsiConfig::default`].
pub struct RsiConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl RsiConfigBuilder {
    #[must_use]
    fn new() -> Self {
        let RsiConfig { length, source } = RsiConfig::default();
        Self { length, source }
    }

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

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    fn build(self) -> Result<RsiConfig> {
        Ok(RsiConfig {
            length: check_length("length", self.length)?,
            source: self.source,
        })
    }
}

/// RSI output for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RsiValue {
    rsi: f64,
    gain: Price,
    loss: Price,
}

impl RsiValue {
    /// Relative Strength Index, within `[0, 100]`.
    #[inline]
    #[must_use]
    pub fn rsi(&self) -> f64 {
        self.rsi
    }

    /// This bar's upward price change, `0` on a down bar.
    #[inline]
    #[must_use]
    pub fn gain(&self) -> Price {
        self.gain
    }

    /// This bar's downward price change as a positive number, `0` on an up
    /// bar.
    #[inline]
    #[must_use]
    pub fn loss(&self) -> Price {
        self.loss
    }
}

impl Display for RsiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({})", self.rsi)
    }
}

/// Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// Gains and losses are smoothed with the unadjusted exponential
/// recurrence at `α = 1 / length`, seeded by the first price change:
///
/// ```text
/// avg_gain = avg_gain + (gain − avg_gain) / length
/// avg_loss = avg_loss + (loss − avg_loss) / length
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
/// ```
///
/// When `avg_loss` is zero the strength ratio is unbounded and RSI is
/// exactly 100, including on a perfectly flat series.
///
/// # Example
///
/// ```
/// use ohlc_ta::{Rsi, RsiConfig};
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
/// let mut rsi = Rsi::new(RsiConfig::close(2).unwrap());
///
/// // Needs 2 price changes (3 bars)
/// assert!(rsi.compute(&Bar(10.0, 1)).is_none());
/// assert!(rsi.compute(&Bar(14.0, 2)).is_none());
///
/// // gains 4, 0 → avg 2; losses 0, 2 → avg 1; RS = 2
/// let value = rsi.compute(&Bar(12.0, 3)).unwrap();
/// assert!((value.rsi() - 200.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    prev_price: Option<Price>,
    avg_gain: Ewm,
    avg_loss: Ewm,
    current: Option<RsiValue>,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = RsiValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            prev_price: None,
            avg_gain: Ewm::wilder(config.length),
            avg_loss: Ewm::wilder(config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        let price = self.config.source.extract(ohlcv);

        // First bar: no previous price, no change
        let Some(prev_price) = self.prev_price.replace(price) else {
            return None;
        };

        let (gain, loss) = Self::gain_and_loss(prev_price, price);
        let avg_gain = self.avg_gain.update(gain);
        let avg_loss = self.avg_loss.update(loss);

        self.current = avg_gain.zip(avg_loss).map(|(avg_gain, avg_loss)| RsiValue {
            rsi: Self::rsi_from_averages(avg_gain, avg_loss),
            gain,
            loss,
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Rsi {
    #[inline]
    fn gain_and_loss(prev_price: Price, price: Price) -> (Price, Price) {
        let change = price - prev_price;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        (gain, loss)
    }

    #[inline]
    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length, self.config.source)
    }
}

/// RSI over a whole series.
///
/// The first `length` dates are omitted.
///
/// # Errors
///
/// [`Error::MissingColumn`](crate::Error::MissingColumn) if the series lacks
/// the `close` column (or the configured source's columns).
pub fn rsi(series: &PriceSeries, config: RsiConfig) -> Result<IndicatorSeries<RsiValue>> {
    evaluate::<Rsi>(config, series)
}
