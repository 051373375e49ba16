mod fixtures;

use fixtures::load_reference_series;
use ohlc_ta::{
    BbConfig, Column, IndicatorConfig, IndicatorConfigBuilder, MacdConfig, PriceSeries,
    RsiConfig, StochConfig, bollinger_bands, macd, rsi, stochastic, volatility,
};

/// 30 rows, close 100..=129, high = close + 1, low = close − 1.
fn rising_30() -> PriceSeries {
    let closes: Vec<f64> = (100_u32..130).map(f64::from).collect();

    PriceSeries::builder()
        .dates((1..=30).collect::<Vec<u64>>())
        .open(closes.clone())
        .high(closes.iter().map(|c| c + 1.0).collect::<Vec<_>>())
        .low(closes.iter().map(|c| c - 1.0).collect::<Vec<_>>())
        .close(closes)
        .build()
        .unwrap()
}

/// Same prices with every date shifted and stretched.
fn relabeled(series: &PriceSeries) -> PriceSeries {
    let mut builder = PriceSeries::builder().dates(
        series
            .dates()
            .iter()
            .map(|d| d * 7 + 1_000_000)
            .collect::<Vec<_>>(),
    );

    for column in [Column::Open, Column::High, Column::Low, Column::Close] {
        if let Some(prices) = series.prices(column) {
            let prices = prices.to_vec();
            builder = match column {
                Column::Open => builder.open(prices),
                Column::High => builder.high(prices),
                Column::Low => builder.low(prices),
                _ => builder.close(prices),
            };
        }
    }

    builder.build().unwrap()
}

fn empty() -> PriceSeries {
    PriceSeries::from_bars::<ohlc_ta::PriceBar>(&[]).unwrap()
}

fn single_row() -> PriceSeries {
    PriceSeries::from_bars(&[ohlc_ta::PriceBar::new(1, 10.0, 11.0, 9.0, 10.5)]).unwrap()
}

mod bollinger {
    use super::*;

    #[test]
    fn length_is_input_minus_warm_up() {
        let series = load_reference_series();

        for t in [2, 5, 20, 100, 260, 261, 1000] {
            let config = BbConfig::with_length(t).unwrap();
            let bands = bollinger_bands(&series, config).unwrap();
            assert_eq!(
                bands.len(),
                series.len().saturating_sub(t - 1),
                "BB({t}) row count"
            );
        }
    }

    #[test]
    fn single_bar_window_yields_no_rows() {
        let series = load_reference_series();
        let bands = bollinger_bands(&series, BbConfig::with_length(1).unwrap()).unwrap();
        assert!(bands.is_empty());
    }

    #[test]
    fn rising_30_yields_11_rows() {
        let series = rising_30();
        let bands = bollinger_bands(&series, BbConfig::default()).unwrap();

        assert_eq!(bands.len(), 11);
        assert_eq!(bands.dates(), &series.dates()[19..]);
    }

    #[test]
    fn bands_are_ordered_for_any_length() {
        let series = load_reference_series();

        for t in [2, 3, 20, 60] {
            let bands = bollinger_bands(&series, BbConfig::with_length(t).unwrap()).unwrap();
            for (date, v) in bands.iter() {
                assert!(v.std_dev() >= 0.0, "negative sd at t={date}");
                assert!(v.lower2() <= v.lower1(), "BB({t}) at {date}: {v}");
                assert!(v.lower1() <= v.middle(), "BB({t}) at {date}: {v}");
                assert!(v.middle() <= v.upper1(), "BB({t}) at {date}: {v}");
                assert!(v.upper1() <= v.upper2(), "BB({t}) at {date}: {v}");
            }
        }
    }
}

mod rsi_range {
    use super::*;

    #[test]
    fn rising_30_saturates_at_100() {
        let values = rsi(&rising_30(), RsiConfig::default()).unwrap();

        assert_eq!(values.len(), 16);
        assert!(values.values().iter().all(|v| v.rsi() == 100.0));
    }

    #[test]
    fn always_within_bounds() {
        let series = load_reference_series();

        for t in [1, 2, 7, 14, 50] {
            let values = rsi(&series, RsiConfig::close(t).unwrap()).unwrap();
            assert_eq!(values.len(), series.len() - t, "RSI({t}) row count");
            for (date, v) in values.iter() {
                assert!(
                    (0.0..=100.0).contains(&v.rsi()),
                    "RSI({t}) out of range at t={date}: {v}"
                );
            }
        }
    }
}

mod stochastic_position {
    use super::*;

    #[test]
    fn rising_30_sits_near_top_of_range() {
        // Latest close is one below the window high and fourteen above the
        // window low: (14 / 15) × 100.
        let values = stochastic(&rising_30(), StochConfig::default()).unwrap();

        assert_eq!(values.len(), 15);
        for (date, v) in values.iter() {
            assert!((v.k() - 1400.0 / 15.0).abs() < 1e-9, "%K at t={date}: {v}");
        }
    }

    #[test]
    fn close_at_window_high_is_100() {
        let closes: Vec<f64> = (100_u32..130).map(f64::from).collect();
        let series = PriceSeries::builder()
            .dates((1..=30).collect::<Vec<u64>>())
            .high(closes.clone())
            .low(closes.clone())
            .close(closes)
            .build()
            .unwrap();

        let values = stochastic(&series, StochConfig::default()).unwrap();
        assert!(values.values().iter().all(|v| v.k() == 100.0 && v.d() == 100.0));
    }
}

mod date_translation {
    use super::*;

    #[test]
    fn numeric_columns_are_unchanged() {
        let series = load_reference_series();
        let shifted = relabeled(&series);

        let original = macd(&series, MacdConfig::default()).unwrap();
        let moved = macd(&shifted, MacdConfig::default()).unwrap();
        assert_eq!(original.values(), moved.values());
        assert_eq!(original.len(), moved.len());

        let original = rsi(&series, RsiConfig::default()).unwrap();
        let moved = rsi(&shifted, RsiConfig::default()).unwrap();
        assert_eq!(original.values(), moved.values());

        let original = stochastic(&series, StochConfig::default()).unwrap();
        let moved = stochastic(&shifted, StochConfig::default()).unwrap();
        assert_eq!(original.values(), moved.values());

        let original = bollinger_bands(&series, BbConfig::default()).unwrap();
        let moved = bollinger_bands(&shifted, BbConfig::default()).unwrap();
        assert_eq!(original.values(), moved.values());

        assert_eq!(volatility(&series).unwrap(), volatility(&shifted).unwrap());
    }

    #[test]
    fn output_dates_are_relabeled() {
        let series = load_reference_series();
        let shifted = relabeled(&series);

        let moved = rsi(&shifted, RsiConfig::default()).unwrap();
        assert_eq!(moved.dates(), &shifted.dates()[14..]);
    }
}

mod degenerate_input {
    use super::*;

    #[test]
    fn empty_series_gives_empty_outputs() {
        let series = empty();

        assert!(bollinger_bands(&series, BbConfig::default()).unwrap().is_empty());
        assert!(macd(&series, MacdConfig::default()).unwrap().is_empty());
        assert!(rsi(&series, RsiConfig::default()).unwrap().is_empty());
        assert!(stochastic(&series, StochConfig::default()).unwrap().is_empty());
        assert_eq!(volatility(&series).unwrap(), 0.0);
    }

    #[test]
    fn single_row_gives_empty_outputs() {
        let series = single_row();

        assert!(bollinger_bands(&series, BbConfig::default()).unwrap().is_empty());
        assert!(macd(&series, MacdConfig::default()).unwrap().is_empty());
        assert!(rsi(&series, RsiConfig::default()).unwrap().is_empty());
        assert!(rsi(&series, RsiConfig::close(1).unwrap()).unwrap().is_empty());
        assert!(stochastic(&series, StochConfig::default()).unwrap().is_empty());
        assert_eq!(volatility(&series).unwrap(), 0.0);
    }

    #[test]
    fn constant_prices_have_zero_volatility() {
        let series = PriceSeries::builder()
            .dates((1..=100).collect::<Vec<u64>>())
            .close(vec![123.456; 100])
            .build()
            .unwrap();

        assert_eq!(volatility(&series).unwrap(), 0.0);
    }
}

mod schema {
    use super::*;

    #[test]
    fn missing_columns_fail_before_computation() {
        let close_only = PriceSeries::builder()
            .dates(vec![1, 2, 3])
            .close(vec![1.0, 2.0, 3.0])
            .build()
            .unwrap();

        let err = bollinger_bands(&close_only, BbConfig::default()).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().starts_with("invalid input schema"));

        assert!(stochastic(&close_only, StochConfig::default()).unwrap_err().is_schema());
        assert!(macd(&close_only, MacdConfig::default()).is_ok());
        assert!(rsi(&close_only, RsiConfig::default()).is_ok());
        assert!(volatility(&close_only).is_ok());
    }

    #[test]
    fn non_positive_periods_are_invalid_parameters() {
        let err = RsiConfig::close(0).unwrap_err();
        assert!(!err.is_schema());
        assert!(err.to_string().starts_with("invalid parameter"));

        assert!(MacdConfig::builder().fast(0).build().is_err());
        assert!(BbConfig::with_length(0).is_err());
        assert!(StochConfig::builder().d_length(0).build().is_err());
    }
}
