/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar date key: epoch seconds, epoch millis or a plain sequence number.
///
/// Only the ordering matters. Indicators work purely by position, so gaps
/// between consecutive dates are irrelevant.
pub type Timestamp = u64;

/// OHLC bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to feed streaming
/// indicators without per-bar conversion.
///
/// # Example
///
/// ```
/// use ohlc_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn date(&self) -> Timestamp { self.ts }
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
/// }
/// ```
pub trait Ohlcv {
    /// Date key of the bar.
    fn date(&self) -> Timestamp;

    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;
}

/// A plain OHLC observation.
///
/// `high >= low` and `close` within `[low, high]` are expected but not
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBar {
    pub date: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl PriceBar {
    #[must_use]
    pub fn new(date: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }
}

impl Ohlcv for PriceBar {
    fn date(&self) -> Timestamp {
        self.date
    }

    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }
}
