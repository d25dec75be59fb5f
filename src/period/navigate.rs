//! Stepping the displayed period backwards and forwards in time.

use time::{Date, Month};

use crate::period::ViewMode;

/// The period currently shown on the overview page.
///
/// Values are immutable, navigation produces a new query rather than
/// modifying the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodQuery {
    /// How sales are grouped and displayed.
    pub view_mode: ViewMode,
    /// The date that anchors the displayed period.
    pub display_date: Date,
}

impl PeriodQuery {
    /// The query shown when switching to `view_mode`: the period containing
    /// `today`.
    pub fn reset(view_mode: ViewMode, today: Date) -> Self {
        Self {
            view_mode,
            display_date: today,
        }
    }
}

/// Which way to step the displayed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Step one period back in time.
    Previous,
    /// Step one period forward in time.
    Next,
}

/// Step `query` one period in `direction`.
///
/// The daily and weekly views keep the anchor's position within the period,
/// while the monthly view snaps to the first of the month and the yearly view
/// snaps to the first of January.
pub fn navigate(query: PeriodQuery, direction: Direction) -> PeriodQuery {
    let step: i64 = match direction {
        Direction::Previous => -1,
        Direction::Next => 1,
    };

    let display_date = match query.view_mode {
        ViewMode::Daily => query.display_date + time::Duration::days(step),
        ViewMode::Weekly => query.display_date + time::Duration::days(step * 7),
        ViewMode::Monthly => {
            let (year, month) = match (direction, query.display_date.month()) {
                (Direction::Next, Month::December) => (query.display_date.year() + 1, Month::January),
                (Direction::Next, month) => (query.display_date.year(), month.next()),
                (Direction::Previous, Month::January) => {
                    (query.display_date.year() - 1, Month::December)
                }
                (Direction::Previous, month) => (query.display_date.year(), month.previous()),
            };

            Date::from_calendar_date(year, month, 1)
                .expect("the first of the month is a valid date")
        }
        ViewMode::Yearly => {
            Date::from_calendar_date(query.display_date.year() + step as i32, Month::January, 1)
                .expect("the first of January is a valid date")
        }
    };

    PeriodQuery {
        view_mode: query.view_mode,
        display_date,
    }
}

#[cfg(test)]
mod navigate_tests {
    use time::macros::date;

    use crate::period::ViewMode;

    use super::{Direction, PeriodQuery, navigate};

    fn query(view_mode: ViewMode, display_date: time::Date) -> PeriodQuery {
        PeriodQuery {
            view_mode,
            display_date,
        }
    }

    #[test]
    fn daily_steps_one_day() {
        let current = query(ViewMode::Daily, date!(2024 - 03 - 05));

        assert_eq!(
            navigate(current, Direction::Next).display_date,
            date!(2024 - 03 - 06)
        );
        assert_eq!(
            navigate(current, Direction::Previous).display_date,
            date!(2024 - 03 - 04)
        );
    }

    #[test]
    fn daily_steps_across_month_boundaries() {
        let current = query(ViewMode::Daily, date!(2024 - 02 - 29));

        assert_eq!(
            navigate(current, Direction::Next).display_date,
            date!(2024 - 03 - 01)
        );
    }

    #[test]
    fn weekly_steps_seven_days() {
        let current = query(ViewMode::Weekly, date!(2024 - 03 - 05));

        assert_eq!(
            navigate(current, Direction::Next).display_date,
            date!(2024 - 03 - 12)
        );
        assert_eq!(
            navigate(current, Direction::Previous).display_date,
            date!(2024 - 02 - 27)
        );
    }

    #[test]
    fn monthly_snaps_to_first_of_month() {
        let current = query(ViewMode::Monthly, date!(2024 - 03 - 15));

        assert_eq!(
            navigate(current, Direction::Next).display_date,
            date!(2024 - 04 - 01)
        );
        assert_eq!(
            navigate(current, Direction::Previous).display_date,
            date!(2024 - 02 - 01)
        );
    }

    #[test]
    fn monthly_wraps_december_to_january() {
        let current = query(ViewMode::Monthly, date!(2024 - 12 - 15));

        assert_eq!(
            navigate(current, Direction::Next).display_date,
            date!(2025 - 01 - 01)
        );
    }

    #[test]
    fn monthly_wraps_january_to_december() {
        let current = query(ViewMode::Monthly, date!(2024 - 01 - 15));

        assert_eq!(
            navigate(current, Direction::Previous).display_date,
            date!(2023 - 12 - 01)
        );
    }

    #[test]
    fn yearly_snaps_to_first_of_january() {
        let current = query(ViewMode::Yearly, date!(2024 - 06 - 15));

        assert_eq!(
            navigate(current, Direction::Next).display_date,
            date!(2025 - 01 - 01)
        );
        assert_eq!(
            navigate(current, Direction::Previous).display_date,
            date!(2023 - 01 - 01)
        );
    }

    #[test]
    fn next_then_previous_returns_to_the_same_period() {
        let anchored_queries = [
            query(ViewMode::Daily, date!(2024 - 03 - 05)),
            query(ViewMode::Weekly, date!(2024 - 03 - 05)),
            query(ViewMode::Monthly, date!(2024 - 03 - 01)),
            query(ViewMode::Yearly, date!(2024 - 01 - 01)),
        ];

        for current in anchored_queries {
            let round_trip = navigate(navigate(current, Direction::Next), Direction::Previous);

            assert_eq!(round_trip, current, "round trip failed for {current:?}");
        }
    }

    #[test]
    fn navigate_does_not_modify_the_input() {
        let current = query(ViewMode::Monthly, date!(2024 - 03 - 15));

        let _ = navigate(current, Direction::Next);

        assert_eq!(current.display_date, date!(2024 - 03 - 15));
    }

    #[test]
    fn reset_uses_the_given_date() {
        let reset = PeriodQuery::reset(ViewMode::Weekly, date!(2024 - 03 - 05));

        assert_eq!(reset.view_mode, ViewMode::Weekly);
        assert_eq!(reset.display_date, date!(2024 - 03 - 05));
    }
}
