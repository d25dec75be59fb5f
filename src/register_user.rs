//! The registration page and endpoint for creating the application user.
//!
//! The application is single-user, so registration closes once a user exists.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
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
    auth::{log_in_link, set_auth_cookie},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_INPUT_STYLE, FORM_LABEL_STYLE, loading_spinner,
        log_in_register, password_input,
    },
    password::{DEFAULT_COST, PasswordHash, ValidatedPassword},
    shared_templates::render,
    timezone::get_local_offset,
    user::{count_users, create_user},
};

/// The minimum password length shown on the registration form.
const MIN_PASSWORD_LENGTH: usize = 8;

/// The state needed to register the application user.
#[derive(Debug, Clone)]
pub struct RegisterState {
    /// The key used to sign and encrypt the auth cookie.
    pub cookie_key: Key,
    /// How long the auth cookie lasts before the user has to log in again.
    pub cookie_duration: Duration,
    /// The canonical timezone string used for cookie expiry times.
    pub local_timezone: String,
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<RegisterState> for Key {
    fn from_ref(state: &RegisterState) -> Self {
        state.cookie_key.clone()
    }
}

/// The data submitted by the registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// The password entered by the user.
    pub password: String,
    /// The password entered a second time to catch typos.
    pub confirm_password: String,
}

/// Render the registration page.
///
/// If a user has already been registered, redirects to the log-in page
/// instead.
pub async fn get_register_page(State(state): State<RegisterState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match count_users(&connection) {
        Ok(0) => {}
        Ok(_) => return Redirect::to(endpoints::LOG_IN_VIEW).into_response(),
        Err(error) => return error.into_response(),
    }

    let form = html! {
        form class="flex flex-col gap-4"
            hx-post=(endpoints::USERS)
            hx-target-error="#alert-container"
            hx-swap="none" {
            (password_input("", MIN_PASSWORD_LENGTH, "Enter a password of at least 8 characters"))
            label for="confirm_password" class=(FORM_LABEL_STYLE) { "Confirm password" }
            input
                id="confirm_password"
                name="confirm_password"
                type="password"
                minlength=(MIN_PASSWORD_LENGTH)
                class=(FORM_INPUT_STYLE)
                required;
            button type="submit" class=(BUTTON_PRIMARY_STYLE) {
                "Register"
                (loading_spinner())
            }
            (log_in_link())
        }
    };

    render(StatusCode::OK, log_in_register("Register", form))
}

/// Create the application user and log them in.
pub async fn post_register(
    State(state): State<RegisterState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.confirm_password {
        return render(
            StatusCode::BAD_REQUEST,
            Alert::error(
                "Passwords do not match",
                "Enter the same password in both fields.",
            )
            .into_html(),
        );
    }

    let validated_password = match ValidatedPassword::new(&form.password) {
        Ok(validated_password) => validated_password,
        Err(Error::TooWeak(feedback)) => {
            return render(
                StatusCode::BAD_REQUEST,
                Alert::error("Password is too weak", &feedback).into_html(),
            );
        }
        Err(error) => return error.into_alert_response(),
    };

    let password_hash = match PasswordHash::new(validated_password, DEFAULT_COST) {
        Ok(password_hash) => password_hash,
        Err(error) => return error.into_alert_response(),
    };

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

        match create_user(password_hash, &connection) {
            Ok(user) => user,
            Err(Error::UserAlreadyExists) => {
                return render(
                    StatusCode::CONFLICT,
                    Alert::error(
                        "Registration is closed",
                        "A user is already registered. Log in instead.",
                    )
                    .into_html(),
                );
            }
            Err(error) => return error.into_alert_response(),
        }
    };

    let jar = match set_auth_cookie(jar, user.id, state.cookie_duration, local_offset) {
        Ok(jar) => jar,
        Err(error) => return error.into_alert_response(),
    };

    (
        jar,
        HxRedirect(endpoints::OVERVIEW_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}


#[cfg(test)]
mod post_register_tests {
    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
    };
    use axum_extra::extract::{Form, PrivateCookieJar};
    use rusqlite::Connection;
    use time::Duration;

    use crate::{
        AppState, endpoints,
        password::PasswordHash,
        test_utils::assert_hx_redirect,
        user::{count_users, create_user},
    };

    use super::{RegisterForm, RegisterState, post_register};

    fn get_test_state() -> RegisterState {
        let state = AppState::new(
            Connection::open_in_memory().expect("could not open database connection"),
            "wow much secret",
            "Etc/UTC",
            Duration::minutes(5),
        )
        .expect("could not create app state");

        RegisterState::from_ref(&state)
    }

    fn get_test_jar(state: &RegisterState) -> PrivateCookieJar {
        PrivateCookieJar::new(state.cookie_key.clone())
    }

    #[tokio::test]
    async fn register_creates_user_and_logs_in() {
        let state = get_test_state();
        let jar = get_test_jar(&state);
        let db_connection = state.db_connection.clone();

        let response = post_register(
            State(state),
            jar,
            Form(RegisterForm {
                password: "correcthorsebatterystaple".to_owned(),
                confirm_password: "correcthorsebatterystaple".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::OVERVIEW_VIEW);
        assert!(response.headers().contains_key("set-cookie"));

        let connection = db_connection.lock().expect("could not lock database");
        assert_eq!(count_users(&connection), Ok(1));
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords() {
        let state = get_test_state();
        let jar = get_test_jar(&state);

        let response = post_register(
            State(state),
            jar,
            Form(RegisterForm {
                password: "correcthorsebatterystaple".to_owned(),
                confirm_password: "correcthorsebatterystapler".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_rejects_weak_passwords() {
        let state = get_test_state();
        let jar = get_test_jar(&state);

        let response = post_register(
            State(state),
            jar,
            Form(RegisterForm {
                password: "password123".to_owned(),
                confirm_password: "password123".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_is_closed_once_a_user_exists() {
        let state = get_test_state();
        let jar = get_test_jar(&state);

        {
            let connection = state.db_connection.lock().expect("could not lock database");
            create_user(PasswordHash::new_unchecked("hunter2"), &connection)
                .expect("could not create user");
        }

        let response = post_register(
            State(state),
            jar,
            Form(RegisterForm {
                password: "correcthorsebatterystaple".to_owned(),
                confirm_password: "correcthorsebatterystaple".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
