//! Selecting the sales that fall within the currently displayed period.

use time::Date;

use crate::{
    period::{
        ViewMode,
        calendar::{end_of_week, start_of_week},
    },
    sale::{Sale, effective_date_time},
};

/// Check whether `sale` falls within the period selected by `view_mode` and
/// `display_date`.
///
/// The daily view compares the sale date itself, while the other views use
/// the sale's effective time (its timestamp, or noon on the sale date).
pub fn is_in_period(sale: &Sale, view_mode: ViewMode, display_date: Date) -> bool {
    match view_mode {
        ViewMode::Daily => sale.date == display_date,
        ViewMode::Weekly => {
            let sale_date = effective_date_time(sale).date();

            start_of_week(display_date) <= sale_date
                && sale_date <= end_of_week(display_date).date()
        }
        ViewMode::Monthly => {
            let sale_date = effective_date_time(sale).date();

            sale_date.month() == display_date.month() && sale_date.year() == display_date.year()
        }
        ViewMode::Yearly => effective_date_time(sale).year() == display_date.year(),
    }
}

/// Select the sales that fall within the period selected by `view_mode` and
/// `display_date`, preserving their order.
pub fn sales_in_period<'a>(
    sales: &'a [Sale],
    view_mode: ViewMode,
    display_date: Date,
) -> Vec<&'a Sale> {
    sales
        .iter()
        .filter(|sale| is_in_period(sale, view_mode, display_date))
        .collect()
}

/// Sum the amounts of the sales that fall within the period selected by
/// `view_mode` and `display_date`.
pub fn period_total(sales: &[Sale], view_mode: ViewMode, display_date: Date) -> f64 {
    sales
        .iter()
        .filter(|sale| is_in_period(sale, view_mode, display_date))
        .map(|sale| sale.amount)
        .sum()
}
