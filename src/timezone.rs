//! Utilities for dealing with timezones.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the UTC offset for the canonical timezone string `canonical_timezone`
/// (e.g., "Pacific/Auckland"), taking into account daylight savings.
///
/// Returns `None` if `canonical_timezone` is not a valid canonical timezone string.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|timezone| timezone.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get the current date in the timezone `canonical_timezone`.
///
/// Returns [crate::Error::InvalidTimezoneError] if `canonical_timezone` is not
/// a valid canonical timezone string.
pub fn current_local_date(canonical_timezone: &str) -> Result<time::Date, crate::Error> {
    get_local_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset).date())
        .ok_or_else(|| crate::Error::InvalidTimezoneError(canonical_timezone.to_owned()))
}
