#![allow(dead_code)]

use ohlc_ta::{Ohlcv, Price, PriceSeries, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// OHLC bar parsed from the synthetic daily CSV.
///
/// Dates are epoch seconds with occasional multi-day gaps. Rows 120–135
/// repeat a single price, so every window over them has a zero range.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub date: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlcv for RefBar {
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

/// Reference Bollinger Bands row.
#[derive(Debug, Deserialize)]
pub struct RefBbValue {
    pub date: u64,
    pub lower2: f64,
    pub lower1: f64,
    pub middle: f64,
    pub upper1: f64,
    pub upper2: f64,
}

/// Reference MACD row.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub date: u64,
    pub macd: f64,
    pub trigger: f64,
}

/// Reference RSI row.
#[derive(Debug, Deserialize)]
pub struct RefRsiValue {
    pub date: u64,
    pub rsi: f64,
}

/// Reference Stochastic row.
#[derive(Debug, Deserialize)]
pub struct RefStochValue {
    pub date: u64,
    pub k: f64,
    pub d: f64,
}

/// Reference volatility of the first `rows` bars.
#[derive(Debug, Deserialize)]
pub struct RefVolatility {
    pub rows: usize,
    pub expected: f64,
}

const OHLC_PATH: &str = "tests/fixtures/data/ohlc-synthetic.csv";

/// Load the reference OHLC bars.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(OHLC_PATH, "invalid OHLC record")
}

/// Load the reference bars as a full four-column series.
pub fn load_reference_series() -> PriceSeries {
    PriceSeries::from_bars(&load_reference_bars()).expect("reference bars are date ordered")
}

/// Load reference rows of any indicator.
pub fn load_ref<D: DeserializeOwned>(path: &str) -> Vec<D> {
    load_records(path, "invalid reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert the output dates equal the reference dates, row for row.
pub fn assert_dates(actual: &[u64], expected: impl IntoIterator<Item = u64>, context: &str) {
    let expected: Vec<u64> = expected.into_iter().collect();
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: row count differs from reference"
    );
    assert_eq!(actual, expected.as_slice(), "{context}: dates differ");
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
