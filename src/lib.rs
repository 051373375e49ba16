//! Technical indicators over OHLC price history.
//!
//! Two ways in:
//!
//! - **Batch**: build a [`PriceSeries`] and call [`bollinger_bands`],
//!   [`macd()`], [`rsi()`], [`stochastic`] or [`volatility`]. Each returns one
//!   row per date for which the indicator is defined; warm-up dates are
//!   omitted rather than padded.
//! - **Streaming**: feed bars one at a time to [`Bb`], [`Macd`], [`Rsi`] or
//!   [`Stoch`]. Any type implementing [`Ohlcv`] works as input. Values are
//!   `None` until enough bars have been received.
//!
//! Each indicator type exposes [`new`](Rsi::new), [`compute`](Rsi::compute),
//! and [`value`](Rsi::value) as inherent methods, so no trait import is
//! needed. Import [`Indicator`] only for generic code.
//!
//! # Example
//!
//! ```
//! use ohlc_ta::{PriceSeries, RsiConfig, rsi};
//!
//! let series = PriceSeries::builder()
//!     .dates(vec![1, 2, 3, 4])
//!     .close(vec![10.0, 12.0, 11.0, 13.0])
//!     .build()?;
//!
//! let values = rsi(&series, RsiConfig::close(3)?)?;
//! assert_eq!(values.dates(), &[4]);
//! let latest = values.get(4).map(|v| v.rsi()).unwrap_or_default();
//! assert!((latest - 87.5).abs() < 1e-9);
//! # Ok::<(), ohlc_ta::Error>(())
//! ```

mod bb;
mod error;
mod ewm;
mod indicator;
mod macd;
mod ohlcv;
mod price_source;
mod ring_buffer;
mod rolling;
mod rsi;
mod series;
mod stoch;
mod volatility;

pub use crate::error::{Error, Result};
pub use crate::indicator::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, MAX_LENGTH, evaluate,
};
pub use crate::ohlcv::{Ohlcv, Price, PriceBar, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::series::{BarView, Column, IndicatorSeries, PriceSeries, PriceSeriesBuilder};

pub use crate::bb::{Bb, BbConfig, BbConfigBuilder, BbValue, bollinger_bands};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdValue, macd};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder, RsiValue, rsi};
pub use crate::stoch::{FLAT_RANGE_K, Stoch, StochConfig, StochConfigBuilder, StochValue, stochastic};
pub use crate::volatility::volatility;

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, ohlcv)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Bb, BbConfig, BbValue);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);
impl_indicator_methods!(Rsi, RsiConfig, RsiValue);
impl_indicator_methods!(Stoch, StochConfig, StochValue);

#[cfg(test)]
mod test_util;
