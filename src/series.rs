use std::fmt::Display;

use tracing::debug;

use crate::{Error, Ohlcv, Price, Result, Timestamp};

/// A column of a [`PriceSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// The date key. Always present in a built series.
    Date,
    Open,
    High,
    Low,
    Close,
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Date => "date",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        };
        f.write_str(name)
    }
}

/// Time-ordered OHLC history in columnar form.
///
/// Price columns are optional: supply only what the indicators you call
/// need. Construction guarantees that every present column has one row per
/// date and that dates are strictly increasing.
///
/// # Example
///
/// ```
/// use ohlc_ta::{Column, PriceSeries};
///
/// let series = PriceSeries::builder()
///     .dates(vec![1, 2, 3])
///     .close(vec![10.0, 11.0, 10.5])
///     .build()
///     .unwrap();
///
/// assert_eq!(series.len(), 3);
/// assert!(series.has_column(Column::Close));
/// assert!(!series.has_column(Column::High));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<Timestamp>,
    open: Option<Vec<Price>>,
    high: Option<Vec<Price>>,
    low: Option<Vec<Price>>,
    close: Option<Vec<Price>>,
}

impl PriceSeries {
    /// Returns a builder with no columns set.
    #[must_use]
    pub fn builder() -> PriceSeriesBuilder {
        PriceSeriesBuilder::default()
    }

    /// Builds a series with all four price columns from row-oriented bars.
    ///
    /// # Errors
    ///
    /// [`Error::UnorderedDates`] if bar dates are not strictly increasing.
    pub fn from_bars<B: Ohlcv>(bars: &[B]) -> Result<Self> {
        let mut builder = PriceSeriesBuilder::with_capacity(bars.len());

        for bar in bars {
            builder.push(bar);
        }

        builder.build()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[must_use]
    pub fn dates(&self) -> &[Timestamp] {
        &self.dates
    }

    /// Values of a price column, `None` if the column is absent.
    ///
    /// Always `None` for [`Column::Date`]; use [`dates`](Self::dates).
    #[must_use]
    pub fn prices(&self, column: Column) -> Option<&[Price]> {
        match column {
            Column::Date => None,
            Column::Open => self.open.as_deref(),
            Column::High => self.high.as_deref(),
            Column::Low => self.low.as_deref(),
            Column::Close => self.close.as_deref(),
        }
    }

    #[must_use]
    pub fn has_column(&self, column: Column) -> bool {
        column == Column::Date || self.prices(column).is_some()
    }

    /// Checks that every listed column is present.
    ///
    /// # Errors
    ///
    /// [`Error::MissingColumn`] naming the first absent column.
    pub fn require(&self, columns: &[Column]) -> Result<()> {
        match columns.iter().find(|column| !self.has_column(**column)) {
            Some(column) => Err(Error::MissingColumn(*column)),
            None => Ok(()),
        }
    }

    /// Row views in date order. Absent columns read as `NaN`.
    pub fn bars(&self) -> impl ExactSizeIterator<Item = BarView<'_>> {
        (0..self.len()).map(|index| BarView {
            series: self,
            index,
        })
    }

    /// Row view at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<BarView<'_>> {
        (index < self.len()).then_some(BarView {
            series: self,
            index,
        })
    }
}

/// Builder for [`PriceSeries`].
#[derive(Debug, Default)]
pub struct PriceSeriesBuilder {
    dates: Option<Vec<Timestamp>>,
    open: Option<Vec<Price>>,
    high: Option<Vec<Price>>,
    low: Option<Vec<Price>>,
    close: Option<Vec<Price>>,
}

impl PriceSeriesBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            dates: Some(Vec::with_capacity(capacity)),
            open: Some(Vec::with_capacity(capacity)),
            high: Some(Vec::with_capacity(capacity)),
            low: Some(Vec::with_capacity(capacity)),
            close: Some(Vec::with_capacity(capacity)),
        }
    }

    fn push(&mut self, bar: &impl Ohlcv) {
        let rows = [
            (&mut self.open, bar.open()),
            (&mut self.high, bar.high()),
            (&mut self.low, bar.low()),
            (&mut self.close, bar.close()),
        ];

        for (column, price) in rows {
            column.get_or_insert_default().push(price);
        }

        self.dates.get_or_insert_default().push(bar.date());
    }

    #[must_use]
    pub fn dates(mut self, dates: impl Into<Vec<Timestamp>>) -> Self {
        self.dates = Some(dates.into());
        self
    }

    #[must_use]
    pub fn open(mut self, open: impl Into<Vec<Price>>) -> Self {
        self.open = Some(open.into());
        self
    }

    #[must_use]
    pub fn high(mut self, high: impl Into<Vec<Price>>) -> Self {
        self.high = Some(high.into());
        self
    }

    #[must_use]
    pub fn low(mut self, low: impl Into<Vec<Price>>) -> Self {
        self.low = Some(low.into());
        self
    }

    #[must_use]
    pub fn close(mut self, close: impl Into<Vec<Price>>) -> Self {
        self.close = Some(close.into());
        self
    }

    /// Validates and builds the series.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingColumn`] if no dates were set.
    /// - [`Error::ColumnLength`] if a price column length differs from the
    ///   number of dates.
    /// - [`Error::UnorderedDates`] if dates are not strictly increasing.
    pub fn build(self) -> Result<PriceSeries> {
        self.validate()
            .inspect_err(|err| debug!(%err, "rejected price series"))?;

        Ok(PriceSeries {
            dates: self.dates.unwrap_or_default(),
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        })
    }

    fn validate(&self) -> Result<()> {
        let dates = self
            .dates
            .as_deref()
            .ok_or(Error::MissingColumn(Column::Date))?;

        let columns = [
            (Column::Open, &self.open),
            (Column::High, &self.high),
            (Column::Low, &self.low),
            (Column::Close, &self.close),
        ];

        for (column, values) in columns {
            if let Some(values) = values
                && values.len() != dates.len()
            {
                return Err(Error::ColumnLength {
                    column,
                    expected: dates.len(),
                    actual: values.len(),
                });
            }
        }

        match dates.windows(2).position(|pair| pair[0] >= pair[1]) {
            Some(position) => Err(Error::UnorderedDates { row: position + 1 }),
            None => Ok(()),
        }
    }
}

/// Borrowed row of a [`PriceSeries`].
#[derive(Debug, Clone, Copy)]
pub struct BarView<'a> {
    series: &'a PriceSeries,
    index: usize,
}

impl BarView<'_> {
    #[inline]
    fn field(&self, column: Option<&Vec<Price>>) -> Price {
        column.map_or(f64::NAN, |values| values[self.index])
    }
}

impl Ohlcv for BarView<'_> {
    #[inline]
    fn date(&self) -> Timestamp {
        self.series.dates[self.index]
    }

    #[inline]
    fn open(&self) -> Price {
        self.field(self.series.open.as_ref())
    }

    #[inline]
    fn high(&self) -> Price {
        self.field(self.series.high.as_ref())
    }

    #[inline]
    fn low(&self) -> Price {
        self.field(self.series.low.as_ref())
    }

    #[inline]
    fn close(&self) -> Price {
        self.field(self.series.close.as_ref())
    }
}

/// Output of a batch transform: one `(date, value)` row per input date for
/// which the indicator is defined.
///
/// Warm-up rows are omitted, so the dates are always a suffix of the input
/// series dates.
///
/// With the `serde` feature, deserialization re-checks that dates are
/// strictly increasing and that there is one value per date.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "UncheckedIndicatorSeries<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct IndicatorSeries<T> {
    dates: Vec<Timestamp>,
    values: Vec<T>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedIndicatorSeries<T> {
    dates: Vec<Timestamp>,
    values: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<UncheckedIndicatorSeries<T>> for IndicatorSeries<T> {
    type Error = Error;

    fn try_from(unchecked: UncheckedIndicatorSeries<T>) -> Result<Self> {
        let UncheckedIndicatorSeries { dates, values } = unchecked;

        if values.len() != dates.len() {
            return Err(Error::ColumnLength {
                column: Column::Date,
                expected: values.len(),
                actual: dates.len(),
            });
        }

        if let Some(position) = dates.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(Error::UnorderedDates { row: position + 1 });
        }

        Ok(Self { dates, values })
    }
}

impl<T> Default for IndicatorSeries<T> {
    fn default() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> IndicatorSeries<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            dates: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, date: Timestamp, value: T) {
        debug_assert!(
            self.dates.last().is_none_or(|last| *last < date),
            "indicator rows must follow input date order"
        );
        self.dates.push(date);
        self.values.push(value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[must_use]
    pub fn dates(&self) -> &[Timestamp] {
        &self.dates
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Value at `date`, `None` if the date is absent or still warming up.
    #[must_use]
    pub fn get(&self, date: Timestamp) -> Option<&T> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|index| &self.values[index])
    }

    #[must_use]
    pub fn first(&self) -> Option<(Timestamp, &T)> {
        self.iter().next()
    }

    #[must_use]
    pub fn last(&self) -> Option<(Timestamp, &T)> {
        self.iter().next_back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Timestamp, &T)> + ExactSizeIterator {
        self.dates.iter().copied().zip(self.values.iter())
    }
}

impl<T> IntoIterator for IndicatorSeries<T> {
    type Item = (Timestamp, T);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<Timestamp>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.into_iter().zip(self.values)
    }
}
