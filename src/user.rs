//! The user of the application and its corresponding database functions.
//!
//! The application is single-user, so at most one row ever exists in the user
//! table.

use std::fmt::Display;

use rusqlite::Connection;

use crate::{Error, password::PasswordHash};

/// The ID of the application user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    ///
    /// Callers are responsible for ensuring that the ID refers to a user that
    /// exists in the database.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the ID as an integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The ID of the user.
    pub id: UserID,
    /// The user's hashed and salted password.
    pub password_hash: PasswordHash,
}

/// Create the user table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_user_table(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (id INTEGER PRIMARY KEY, password TEXT NOT NULL)",
        (),
    )?;

    Ok(())
}

/// Create the application user in the database.
///
/// # Errors
/// Returns [Error::UserAlreadyExists] if a user has already been registered,
/// or [Error::SqlError] if there is some other SQL error.
pub fn create_user(password_hash: PasswordHash, connection: &Connection) -> Result<User, Error> {
    if count_users(connection)? > 0 {
        return Err(Error::UserAlreadyExists);
    }

    connection.execute(
        "INSERT INTO user (password) VALUES (:password)",
        &[(":password", &password_hash.to_string())],
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User { id, password_hash })
}

/// Retrieve the user with `id` from the database.
///
/// # Errors
/// Returns [Error::NotFound] if there is no user with `id`, or
/// [Error::SqlError] if there is some other SQL error.
pub fn get_user_by_id(id: UserID, connection: &Connection) -> Result<User, Error> {
    let user = connection
        .prepare("SELECT id, password FROM user WHERE id = :id")?
        .query_row(&[(":id", &id.as_i64())], |row| {
            let id = UserID::new(row.get(0)?);
            let password_hash = PasswordHash::new_unchecked(&row.get::<usize, String>(1)?);

            Ok(User { id, password_hash })
        })?;

    Ok(user)
}

/// Retrieve the sole application user from the database.
///
/// # Errors
/// Returns [Error::NotFound] if no user has been registered, or
/// [Error::SqlError] if there is some other SQL error.
pub fn get_sole_user(connection: &Connection) -> Result<User, Error> {
    let user = connection
        .prepare("SELECT id, password FROM user LIMIT 1")?
        .query_row((), |row| {
            let id = UserID::new(row.get(0)?);
            let password_hash = PasswordHash::new_unchecked(&row.get::<usize, String>(1)?);

            Ok(User { id, password_hash })
        })?;

    Ok(user)
}

/// Replace the password hash of the sole application user.
///
/// # Errors
/// Returns [Error::NotFound] if no user has been registered, or
/// [Error::SqlError] if there is some other SQL error.
pub fn update_sole_user_password(
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<(), Error> {
    let user = get_sole_user(connection)?;

    connection.execute(
        "UPDATE user SET password = :password WHERE id = :id",
        rusqlite::named_params! {
            ":password": password_hash.to_string(),
            ":id": user.id.as_i64(),
        },
    )?;

    Ok(())
}

/// Count the number of registered users.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    let count = connection
        .prepare("SELECT COUNT(id) FROM user")?
        .query_row((), |row| row.get::<_, i64>(0))?;

    Ok(count as usize)
}
