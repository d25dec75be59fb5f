//! The log-in page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error,
    alert::Alert,
    auth::cookie::set_auth_cookie,
    auth::redirect::is_safe_redirect_url,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, link, loading_spinner, log_in_register,
        password_input,
    },
    shared_templates::render,
    timezone::get_local_offset,
    user::{count_users, get_sole_user},
};

/// The state needed to log in the user.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key used to sign and encrypt the auth cookie.
    pub cookie_key: Key,
    /// How long the auth cookie lasts before the user has to log in again.
    pub cookie_duration: Duration,
    /// The canonical timezone string used for cookie expiry times.
    pub local_timezone: String,
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// How long the session lasts when the user ticks "Remember me".
const REMEMBER_ME_DURATION: Duration = Duration::days(7);

#[derive(Debug, Deserialize)]
pub struct LogInQuery {
    redirect_url: Option<String>,
}

/// The data submitted by the log-in form.
#[derive(Debug, Deserialize)]
pub struct LogInForm {
    /// The password entered by the user.
    pub password: String,
    /// Set when the user ticks the "Remember me" checkbox.
    pub remember_me: Option<String>,
    /// The page to go to after logging in.
    pub redirect_url: Option<String>,
}

/// Render the log-in page.
///
/// If no user has been registered yet, redirects to the registration page
/// instead.
pub async fn get_log_in_page(
    State(state): State<LogInState>,
    Query(query): Query<LogInQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match count_users(&connection) {
        Ok(0) => return Redirect::to(endpoints::REGISTER_VIEW).into_response(),
        Ok(_) => {}
        Err(error) => return error.into_response(),
    }

    let form = html! {
        form class="flex flex-col gap-4"
            hx-post=(endpoints::LOG_IN_API)
            hx-target-error="#alert-container"
            hx-swap="none" {
            (password_input("", 1, "Enter your password"))
            label class=(FORM_LABEL_STYLE) {
                input type="checkbox" name="remember_me" class="mr-2";
                "Remember me"
            }
            @if let Some(redirect_url) = &query.redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }
            button type="submit" class=(BUTTON_PRIMARY_STYLE) {
                "Log in"
                (loading_spinner())
            }
        }
    };

    render(StatusCode::OK, log_in_register("Log in", form))
}

/// Log in the user and set the auth cookie.
///
/// Responds with an HX-Redirect to the page the user was trying to reach, or
/// the overview page by default.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(form): Form<LogInForm>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        return Error::InvalidTimezoneError(state.local_timezone.clone()).into_alert_response();
    };

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_alert_response();
            }
        };

        match get_sole_user(&connection) {
            Ok(user) => user,
            Err(Error::NotFound) => {
                return render(
                    StatusCode::UNAUTHORIZED,
                    Alert::error(
                        "No user registered",
                        "Register a user before logging in.",
                    )
                    .into_html(),
                );
            }
            Err(error) => return error.into_alert_response(),
        }
    };

    match user.password_hash.verify(&form.password) {
        Ok(true) => {}
        Ok(false) => {
            return render(
                StatusCode::UNAUTHORIZED,
                Alert::error("Incorrect password", "Check your password and try again.")
                    .into_html(),
            );
        }
        Err(error) => return Error::HashingError(error.to_string()).into_alert_response(),
    }

    let cookie_duration = if form.remember_me.is_some() {
        REMEMBER_ME_DURATION
    } else {
        state.cookie_duration
    };

    let jar = match set_auth_cookie(jar, user.id, cookie_duration, local_offset) {
        Ok(jar) => jar,
        Err(error) => return error.into_alert_response(),
    };

    let redirect_url = form
        .redirect_url
        .as_deref()
        .filter(|redirect_url| is_safe_redirect_url(redirect_url))
        .unwrap_or(endpoints::OVERVIEW_VIEW);

    (
        jar,
        HxRedirect(redirect_url.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// Create a link to the log-in page, shown on the registration page.
pub fn log_in_link() -> maud::Markup {
    html! {
        p class="text-gray-600" {
            "Already have an account? "
            (link(endpoints::LOG_IN_VIEW, "Log in"))
        }
    }
}
