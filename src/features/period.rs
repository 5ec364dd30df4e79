//! Sale period parsing (`YYYY-MM`).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PredictError, PredictResult};

pub const PERIOD_FIELD: &str = "month";

/// First and last `(year, month)` whose first day fits a nanosecond timestamp
/// (1677-09-21 ..= 2262-04-11).
pub const MIN_PERIOD: (i32, u32) = (1677, 10);
pub const MAX_PERIOD: (i32, u32) = (2262, 4);

// 4-digit year, 1-2 digit month; nothing else on the line.
static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<year>\d{4})-(?P<month>\d{1,2})$").expect("period regex"));

/// Parse a sale period like `2024-11` into `(year, month)`.
pub fn parse_period(raw_month: &str) -> PredictResult<(i32, u32)> {
    let invalid = || PredictError::validation(PERIOD_FIELD, "expected the format YYYY-MM");

    let caps = PERIOD_RE.captures(raw_month).ok_or_else(invalid)?;
    let year: i32 = caps["year"].parse().map_err(|_| invalid())?;
    let month: u32 = caps["month"].parse().map_err(|_| invalid())?;

    // Rejects month 0 and 13+.
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

    if !(MIN_PERIOD..=MAX_PERIOD).contains(&(year, month)) {
        return Err(PredictError::validation(
            PERIOD_FIELD,
            format!(
                "must be between {}-{:02} and {}-{:02}",
                MIN_PERIOD.0, MIN_PERIOD.1, MAX_PERIOD.0, MAX_PERIOD.1
            ),
        ));
    }

    Ok((year, month))
}
