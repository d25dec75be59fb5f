//! Calendar helpers for working with Sunday-to-Saturday weeks, ISO weeks, and
//! month boundaries.

use time::{Date, Month, PrimitiveDateTime, Time};

/// Get the Sunday that starts the week containing `date`.
pub fn start_of_week(date: Date) -> Date {
    let days_from_sunday = date.weekday().number_days_from_sunday();

    date - time::Duration::days(days_from_sunday as i64)
}

/// Get the last instant of the week containing `date`, i.e. the Saturday of
/// that week at 23:59:59.999.
pub fn end_of_week(date: Date) -> PrimitiveDateTime {
    let saturday = start_of_week(date) + time::Duration::days(6);
    let end_of_day = Time::from_hms_milli(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid time of day");

    saturday.with_time(end_of_day)
}

/// Get the ISO 8601 week number of `date` along with the year that week
/// belongs to.
///
/// The week year can differ from the calendar year at year boundaries. For
/// example, 2023-01-01 belongs to week 52 of 2022, and 2018-12-31 belongs to
/// week 1 of 2019.
pub fn iso_week(date: Date) -> (i32, u8) {
    let (year, week, _) = date.to_iso_week_date();

    (year, week)
}

/// Get `date` at noon.
///
/// Sales without an exact timestamp are treated as having occurred at noon on
/// their sale date so that they fall safely inside the day regardless of
/// timezone adjustments.
pub fn noon_of(date: Date) -> PrimitiveDateTime {
    date.with_time(Time::from_hms(12, 0, 0).expect("12:00:00 is a valid time of day"))
}

/// Get the number of days in `month` of `year`.
pub fn last_day_of_month(year: i32, month: Month) -> u8 {
    time::util::days_in_year_month(year, month)
}

/// Get the three letter abbreviation of `month`, e.g. "Mar" for March.
pub fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
