// src/test_util.rs

use crate::{Ohlcv, Price, PriceSeries, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub date: u64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            date: 0,
        }
    }

    pub fn at(mut self, date: u64) -> Self {
        self.date = date;
        self
    }
}

/// Convenience: bar with just a close price and date (OHLC all equal to close).
pub fn bar(close: f64, date: u64) -> Bar {
    Bar::new(close, close, close, close).at(date)
}

impl Ohlcv for Bar {
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

/// `n` bars dated `1..=n` with close `100 + i`, high one above and low one
/// below the close.
pub fn rising_series(n: u32) -> PriceSeries {
    let bars: Vec<Bar> = (0..n)
        .map(|i| {
            let close = 100.0 + f64::from(i);
            Bar::new(close, close + 1.0, close - 1.0, close).at(u64::from(i) + 1)
        })
        .collect();

    PriceSeries::from_bars(&bars).unwrap()
}

/// Close-only series dated `1..=n`.
pub fn close_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::builder()
        .dates((1..=closes.len() as u64).collect::<Vec<_>>())
        .close(closes.to_vec())
        .build()
        .unwrap()
}
