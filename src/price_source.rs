use crate::{Column, Ohlcv, Price};

use std::fmt::{Debug, Display};

/// Price extracted from an [`Ohlcv`] bar before feeding into an indicator.
///
/// Bollinger Bands default to [`HLC3`](Self::HLC3), every other
/// configurable indicator to [`Close`](Self::Close).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Low => ohlcv.low(),
            Self::Close => ohlcv.close(),
            Self::HL2 => f64::midpoint(ohlcv.high(), ohlcv.low()),
            Self::HLC3 => (ohlcv.high() + ohlcv.low() + ohlcv.close()) / 3.0,
            Self::OHLC4 => (ohlcv.open() + ohlcv.high() + ohlcv.low() + ohlcv.close()) / 4.0,
        }
    }

    /// Series columns read by [`extract`](Self::extract).
    #[must_use]
    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::Open => &[Column::Open],
            Self::High => &[Column::High],
            Self::Low => &[Column::Low],
            Self::Close => &[Column::Close],
            Self::HL2 => &[Column::High, Column::Low],
            Self::HLC3 => &[Column::High, Column::Low, Column::Close],
            Self::OHLC4 => &[Column::Open, Column::High, Column::Low, Column::Close],
        }
    }
}
