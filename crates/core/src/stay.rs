//! Stay length and pricing.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Reject date ranges where check-out is not strictly after check-in.
pub fn validate_stay(check_in: Timestamp, check_out: Timestamp) -> Result<(), CoreError> {
    if check_out <= check_in {
        return Err(CoreError::Validation(
            "Check-out date must be after check-in date".to_string(),
        ));
    }
    Ok(())
}

/// Number of nights billed for a stay: the span in days, rounded up.
///
/// A stay of 26 hours bills two nights. Callers must have run
/// [`validate_stay`] first; a non-positive span yields `0`.
pub fn total_nights(check_in: Timestamp, check_out: Timestamp) -> i32 {
    let secs = (check_out - check_in).num_seconds();
    if secs <= 0 {
        return 0;
    }
    let nights = (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    i32::try_from(nights).unwrap_or(i32::MAX)
}

/// Total price for `nights` at `price_per_night`, rounded to cents.
pub fn total_amount(price_per_night: f64, nights: i32) -> f64 {
    round_cents(price_per_night * f64::from(nights))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Nights and amount for a room over a date range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StayQuote {
    pub total_nights: i32,
    pub total_amount: f64,
}

impl StayQuote {
    /// Validate the range and price it at `price_per_night`.
    pub fn compute(
        price_per_night: f64,
        check_in: Timestamp,
        check_out: Timestamp,
    ) -> Result<Self, CoreError> {
        validate_stay(check_in, check_out)?;
        let total_nights = total_nights(check_in, check_out);
        Ok(Self {
            total_nights,
            total_amount: total_amount(price_per_night, total_nights),
        })
    }
}

// ---------------------------------------------------------------------------
// Stay dates on the wire
// ---------------------------------------------------------------------------

/// Parse a stay date given either as an RFC 3339 timestamp or as a plain
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_stay_date(raw: &str) -> Result<Timestamp, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("Invalid date '{raw}': expected YYYY-MM-DD or RFC 3339"))
}

/// serde `deserialize_with` helper for a required stay date.
pub fn deserialize_stay_date<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_stay_date(&raw).map_err(serde::de::Error::custom)
}

/// serde `deserialize_with` helper for an optional stay date. Blank is `None`.
pub fn deserialize_optional_stay_date<'de, D>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            parse_stay_date(&raw).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn three_nights_at_100_is_300() {
        let quote = StayQuote::compute(100.0, day(2024, 1, 1), day(2024, 1, 4)).unwrap();
        assert_eq!(quote.total_nights, 3);
        assert_eq!(quote.total_amount, 300.00);
    }

    #[test]
    fn partial_day_rounds_up() {
        let check_in = day(2024, 1, 1);
        let check_out = Utc.with_ymd_and_hms(2024, 1, 2, 2, 0, 0).unwrap();
        assert_eq!(total_nights(check_in, check_out), 2);
    }

    #[test]
    fn single_night() {
        assert_eq!(total_nights(day(2024, 2, 28), day(2024, 2, 29)), 1);
    }

    #[test]
    fn same_day_rejected() {
        let result = StayQuote::compute(100.0, day(2024, 1, 1), day(2024, 1, 1));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn reversed_range_rejected() {
        assert!(validate_stay(day(2024, 1, 5), day(2024, 1, 1)).is_err());
    }

    #[test]
    fn amount_is_rounded_to_cents() {
        assert_eq!(total_amount(199.99, 3), 599.97);
        assert_eq!(total_amount(0.0, 5), 0.0);
    }

    #[test]
    fn plain_date_is_midnight_utc() {
        assert_eq!(parse_stay_date("2024-01-04").unwrap(), day(2024, 1, 4));
    }

    #[test]
    fn rfc3339_offset_is_normalized() {
        assert_eq!(
            parse_stay_date("2024-01-04T14:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 4, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn garbage_date_is_rejected() {
        assert!(parse_stay_date("next tuesday").is_err());
    }
}
