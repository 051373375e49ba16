use thiserror::Error;

use crate::Column;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before any indicator computation starts.
///
/// Insufficient history is not an error: transforms return an empty
/// [`IndicatorSeries`](crate::IndicatorSeries) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A column required by the transform (or the `date` key) is absent.
    #[error("invalid input schema: missing column `{0}`")]
    MissingColumn(Column),

    /// A price column does not have one row per date.
    #[error("invalid input schema: column `{column}` has {actual} rows, expected {expected}")]
    ColumnLength {
        /// Offending column.
        column: Column,
        /// Number of dates in the series.
        expected: usize,
        /// Number of rows in the column.
        actual: usize,
    },

    /// Dates are not strictly increasing.
    #[error("invalid input schema: date at row {row} does not follow the previous date")]
    UnorderedDates {
        /// First row whose date is not greater than its predecessor.
        row: usize,
    },

    /// A period parameter is out of range.
    #[error("invalid parameter: {name} = {value} {reason}")]
    InvalidParameter {
        /// Parameter name as it appears on the config builder.
        name: &'static str,
        /// Rejected value.
        value: usize,
        /// Human-readable constraint.
        reason: &'static str,
    },
}

impl Error {
    /// `true` for malformed input series (missing or ragged columns,
    /// unordered dates).
    #[must_use]
    pub fn is_schema(&self) -> bool {
        !matches!(self, Self::InvalidParameter { .. })
    }
}
