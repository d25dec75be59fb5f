//! The state shared between route handlers.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{Error, db};

/// The state shared between all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key used to sign and encrypt the auth cookie.
    pub cookie_key: Key,
    /// How long the auth cookie lasts before the user has to log in again.
    pub cookie_duration: Duration,
    /// The canonical timezone string (e.g. "Pacific/Auckland") used to
    /// determine the current local date.
    pub local_timezone: String,
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create the application state, initializing the database tables if they
    /// do not exist.
    ///
    /// `cookie_secret` is hashed to derive the cookie signing key, so it can
    /// be any sufficiently long string.
    ///
    /// # Errors
    /// Returns an error if the database could not be initialized.
    pub fn new(
        db_connection: Connection,
        cookie_secret: &str,
        local_timezone: &str,
        cookie_duration: Duration,
    ) -> Result<Self, Error> {
        db::initialize(&db_connection)?;

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration,
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

/// Derive a cookie signing key from `secret`.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
