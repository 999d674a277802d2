//! Request timestamps in the compact ISO 8601 forms SigV4 expects.

use {
    crate::{constants::*, SignerError},
    chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The `x-amz-date` timestamp and the `YYYYMMDD` date stamp for a single request.
///
/// Both strings come from the same instant, in UTC, without separators or fractional seconds.
/// The date stamp is always the first eight characters of the `x-amz-date` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTimestamp {
    amz_date: String,
    date: NaiveDate,
}

impl RequestTimestamp {
    /// Create a timestamp from an instant in any time zone. Sub-second precision is discarded.
    ///
    /// # Errors
    /// Returns [`SignerError::InvalidArgument`] if the year does not fit in four digits.
    pub fn new<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<Self, SignerError> {
        let now = now.with_timezone(&Utc);
        let year = now.year();
        if !(0..=MAX_TIMESTAMP_YEAR).contains(&year) {
            return Err(SignerError::invalid_argument(format!("{}{}", MSG_TIMESTAMP_OUT_OF_RANGE, year)));
        }

        Ok(Self {
            amz_date: now.format(ISO8601_COMPACT_FORMAT).to_string(),
            date: now.date_naive(),
        })
    }

    /// The `YYYYMMDDTHHMMSSZ` value used for `x-amz-date` and the string to sign.
    #[inline]
    pub fn amz_date(&self) -> &str {
        &self.amz_date
    }

    /// The `YYYYMMDD` value used in the credential scope.
    #[inline]
    pub fn date_stamp(&self) -> &str {
        &self.amz_date[..ISO8601_DATE_LENGTH]
    }

    /// The calendar date, used to derive `kDate`.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Display for RequestTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.amz_date)
    }
}
