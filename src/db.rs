//! Database initialization.

use rusqlite::Connection;

use crate::{Error, sale::create_sale_table, user::create_user_table};

/// Create the application tables in the database if they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_user_table(connection)?;
    create_sale_table(connection)?;

    Ok(())
}
