//! Human readable headings for the displayed period.

use time::Date;

use crate::period::{
    ViewMode,
    calendar::{end_of_week, iso_week, month_abbreviation, start_of_week},
    navigate::PeriodQuery,
};

/// Describe the period selected by `query`, e.g. "Week: 3 Mar 2024 - 9 Mar
/// 2024 (Week 10)".
pub fn format_period_heading(query: &PeriodQuery) -> String {
    let date = query.display_date;

    match query.view_mode {
        ViewMode::Daily => format!(
            "Day: {}, {} {} {}",
            date.weekday(),
            date.day(),
            date.month(),
            date.year()
        ),
        ViewMode::Weekly => {
            let (_, week) = iso_week(date);
            let start = start_of_week(date);
            let end = end_of_week(date).date();

            format!(
                "Week: {} - {} (Week {week})",
                format_short_date(start),
                format_short_date(end)
            )
        }
        ViewMode::Monthly => format!("Month: {} {}", date.month(), date.year()),
        ViewMode::Yearly => format!("Year: {}", date.year()),
    }
}

fn format_short_date(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_abbreviation(date.month()),
        date.year()
    )
}
