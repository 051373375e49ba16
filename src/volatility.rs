use tracing::trace;

use crate::{Column, PriceSeries, Result};

/// Realized volatility of the close prices, scaled to the series length.
///
/// ```text
/// r₀ = 0
/// rᵢ = ln(closeᵢ / closeᵢ₋₁)
/// volatility = sample_std(r₀ … rₙ₋₁) × √n
/// ```
///
/// The leading zero return counts as an observation. A series with fewer
/// than two rows has no sample deviation and reports `0.0`, as does a
/// constant series.
///
/// # Errors
///
/// [`Error::MissingColumn`](crate::Error::MissingColumn) if the series has
/// no `close` column.
///
/// # Example
///
/// ```
/// use ohlc_ta::{PriceSeries, volatility};
///
/// let series = PriceSeries::builder()
///     .dates(vec![1, 2, 3])
///     .close(vec![50.0, 50.0, 50.0])
///     .build()?;
///
/// assert_eq!(volatility(&series)?, 0.0);
/// # Ok::<(), ohlc_ta::Error>(())
/// ```
pub fn volatility(series: &PriceSeries) -> Result<f64> {
    series.require(&[Column::Close])?;

    let closes = series.prices(Column::Close).unwrap_or_default();
    let n = closes.len();

    if n < 2 {
        trace!(rows = n, "volatility of a series shorter than two rows");
        return Ok(0.0);
    }

    let returns: Vec<f64> = std::iter::once(0.0)
        .chain(closes.windows(2).map(|pair| (pair[1] / pair[0]).ln()))
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let count = n as f64;
    let mean = returns.iter().sum::<f64>() / count;
    let squared_deviations = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>();
    let std_dev = (squared_deviations / (count - 1.0)).sqrt();

    Ok(std_dev * count.sqrt())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{Error, test_util::close_series};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "actual={actual}, expected={expected}"
        );
    }

    #[test]
    fn constant_series_is_zero() {
        let series = close_series(&[42.0; 10]);
        assert_eq!(volatility(&series).unwrap(), 0.0);
    }

    #[test]
    fn empty_and_single_row_are_zero() {
        assert_eq!(volatility(&close_series(&[])).unwrap(), 0.0);
        assert_eq!(volatility(&close_series(&[42.0])).unwrap(), 0.0);
    }

    #[test]
    fn two_rows() {
        // returns [0, ln 2]: mean ln2/2, sample variance (ln 2)² / 2
        // std = ln 2 / √2, × √2 = ln 2
        let series = close_series(&[10.0, 20.0]);
        assert_close(volatility(&series).unwrap(), 2.0_f64.ln());
    }

    #[test]
    fn leading_zero_return_counts() {
        // returns [0, ln 2, ln 2]: mean 2·ln2/3
        // deviations (2/3)², (1/3)², (1/3)² × (ln 2)² = 6/9 × (ln 2)²
        // sample variance = (ln 2)² / 3, × n = (ln 2)²
        let series = close_series(&[1.0, 2.0, 4.0]);
        assert_close(volatility(&series).unwrap(), 2.0_f64.ln());
    }

    #[test]
    fn scale_invariant() {
        let base = [100.0, 101.5, 99.2, 103.7, 102.1, 104.9];
        let scaled: Vec<f64> = base.iter().map(|p| p * 3.0).collect();
        assert_close(
            volatility(&close_series(&base)).unwrap(),
            volatility(&close_series(&scaled)).unwrap(),
        );
    }

    #[test]
    fn requires_close() {
        let series = PriceSeries::builder()
            .dates(vec![1, 2])
            .open(vec![1.0, 2.0])
            .build()
            .unwrap();
        assert_eq!(
            volatility(&series).unwrap_err(),
            Error::MissingColumn(Column::Close)
        );
    }
}
