//! Defines the sale record and how it is stored in the application database.

use rusqlite::{Connection, Row};
use time::{Date, PrimitiveDateTime};

use crate::{Error, database_id::SaleID, period::calendar::noon_of};

/// A single sale that has been recorded in the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    /// The ID of the sale.
    pub id: SaleID,
    /// The amount of money received, must be a positive number.
    pub amount: f64,
    /// The date the sale happened on.
    pub date: Date,
    /// The exact time the sale was recorded at, if known.
    pub timestamp: Option<PrimitiveDateTime>,
}

/// The number of rows affected by a query.
type RowsAffected = usize;

/// Get the point in time a sale is treated as having happened at.
///
/// Sales with a recorded timestamp use it directly. Sales without one are
/// placed at noon on their sale date so that they fall inside the correct day
/// even after small timezone adjustments.
pub fn effective_date_time(sale: &Sale) -> PrimitiveDateTime {
    sale.timestamp.unwrap_or_else(|| noon_of(sale.date))
}

/// Create the sale table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_sale_table(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                timestamp TEXT
            )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_date ON sale(date)",
        (),
    )?;

    Ok(())
}

/// Record a sale of `amount` on `date` in the database.
///
/// `timestamp` is the exact time the sale was recorded at, if known.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `amount` is zero, negative, or not a
/// finite number, or [Error::SqlError] if there is an SQL error.
pub fn create_sale(
    amount: f64,
    date: Date,
    timestamp: Option<PrimitiveDateTime>,
    connection: &Connection,
) -> Result<Sale, Error> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount(amount));
    }

    let sale = connection
        .prepare(
            "INSERT INTO sale (amount, date, timestamp)
            VALUES (?1, ?2, ?3)
            RETURNING id, amount, date, timestamp",
        )?
        .query_row((amount, date, timestamp), map_sale_row)?;

    Ok(sale)
}

/// Delete the sale with `id` from the database.
///
/// Returns the number of rows deleted, which is zero if no sale with `id`
/// exists.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn delete_sale(id: SaleID, connection: &Connection) -> Result<RowsAffected, Error> {
    let rows_affected = connection.execute("DELETE FROM sale WHERE id = ?1", (id.as_i64(),))?;

    Ok(rows_affected)
}

/// Retrieve all sales from the database, most recently recorded first.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn get_all_sales(connection: &Connection) -> Result<Vec<Sale>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, timestamp FROM sale
            ORDER BY COALESCE(timestamp, date) DESC, id DESC",
        )?
        .query_map((), map_sale_row)?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

fn map_sale_row(row: &Row) -> Result<Sale, rusqlite::Error> {
    let id = SaleID::new(row.get(0)?);
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let timestamp = row.get(3)?;

    Ok(Sale {
        id,
        amount,
        date,
        timestamp,
    })
}


#[cfg(test)]
mod effective_date_time_tests {
    use time::macros::{date, datetime};

    use crate::database_id::SaleID;

    use super::{Sale, effective_date_time};

    #[test]
    fn uses_timestamp_when_present() {
        let sale = Sale {
            id: SaleID::new(1),
            amount: 10.0,
            date: date!(2024 - 03 - 05),
            timestamp: Some(datetime!(2024-03-05 17:42:01)),
        };

        assert_eq!(effective_date_time(&sale), datetime!(2024-03-05 17:42:01));
    }

    #[test]
    fn falls_back_to_noon_on_sale_date() {
        let sale = Sale {
            id: SaleID::new(1),
            amount: 10.0,
            date: date!(2024 - 03 - 05),
            timestamp: None,
        };

        assert_eq!(effective_date_time(&sale), datetime!(2024-03-05 12:00));
    }
}
