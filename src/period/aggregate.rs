//! Grouping sales into chart buckets for each view mode.

use std::collections::HashMap;

use time::{Date, PrimitiveDateTime};

use crate::{
    period::{
        ViewMode,
        calendar::{end_of_week, iso_week, last_day_of_month, month_abbreviation, start_of_week},
    },
    sale::{Sale, effective_date_time},
};

/// A group of sales plotted as a single point on the overview chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Uniquely identifies the bucket within a view mode, e.g. "2024-W10".
    pub key: String,
    /// The text shown on the chart axis, e.g. "Week 10".
    pub label: String,
    /// The sum of the amounts of the sales in the bucket.
    pub total: f64,
    /// The effective time of the first sale added to the bucket, used for
    /// sorting buckets chronologically.
    pub date: PrimitiveDateTime,
}

/// Group `sales` into buckets for `view_mode`.
///
/// Each sale lands in exactly one bucket, so the bucket totals always sum to
/// the total of `sales`. Buckets are sorted chronologically, with ties broken
/// by comparing keys.
pub fn aggregate(sales: &[&Sale], view_mode: ViewMode) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for sale in sales {
        let sale_date_time = effective_date_time(sale);
        let (key, label) = bucket_key_and_label(sale, sale_date_time.date(), view_mode);

        match index_by_key.get(&key) {
            Some(&index) => buckets[index].total += sale.amount,
            None => {
                index_by_key.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    key,
                    label,
                    total: sale.amount,
                    date: sale_date_time,
                });
            }
        }
    }

    buckets.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.key.cmp(&b.key)));

    buckets
}

fn bucket_key_and_label(sale: &Sale, sale_date: Date, view_mode: ViewMode) -> (String, String) {
    match view_mode {
        ViewMode::Daily => {
            let key = sale.date.to_string();
            let label = format!(
                "{:02} {}",
                sale.date.day(),
                month_abbreviation(sale.date.month())
            );

            (key, label)
        }
        ViewMode::Weekly => {
            let (week_year, week) = iso_week(sale_date);

            (format!("{week_year}-W{week}"), format!("Week {week}"))
        }
        ViewMode::Monthly => {
            let (_, week) = iso_week(sale_date);
            let key = format!(
                "{}-{:02}-W{week}",
                sale_date.year(),
                sale_date.month() as u8
            );

            // Clip the week to the month so that the label never names days
            // from a neighbouring month.
            let first_of_month = 1;
            let last_of_month = last_day_of_month(sale_date.year(), sale_date.month());
            let week_start = start_of_week(sale_date);
            let week_end = end_of_week(sale_date).date();

            let label_start = if week_start.month() == sale_date.month() {
                week_start.day()
            } else {
                first_of_month
            };
            let label_end = if week_end.month() == sale_date.month() {
                week_end.day()
            } else {
                last_of_month
            };

            (key, format!("{label_start:02} - {label_end:02}"))
        }
        ViewMode::Yearly => {
            let key = format!("{}-{:02}", sale_date.year(), sale_date.month() as u8);

            (key, sale_date.month().to_string())
        }
    }
}
