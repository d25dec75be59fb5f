//! Middleware that ensures only a logged-in user can access protected routes.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState, Error,
    auth::cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
    auth::redirect::build_log_in_redirect_url,
    timezone::get_local_offset,
};

/// The state needed to authenticate requests.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The key used to sign and encrypt the auth cookie.
    pub cookie_key: Key,
    /// How long the auth cookie lasts before the user has to log in again.
    pub cookie_duration: Duration,
    /// The canonical timezone string used for cookie expiry times.
    pub local_timezone: String,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: fn(&str) -> Response,
) -> Response {
    let log_in_url = build_log_in_redirect_url(&request);

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        return Error::InvalidTimezoneError(state.local_timezone.clone()).into_response();
    };

    let (mut parts, body) = request.into_parts();

    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(_) => return get_redirect(&log_in_url),
    };

    let token = match get_token_from_cookies(&jar) {
        Ok(token) => token,
        Err(_) => return get_redirect(&log_in_url),
    };

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(token.user_id);

    let response = next.run(request).await;

    // Keep the session alive while the user is active.
    match extend_auth_cookie_duration_if_needed(jar, state.cookie_duration, local_offset) {
        Ok(jar) => (jar, response).into_response(),
        Err(error) => {
            tracing::error!("could not extend the auth cookie: {error}");
            response
        }
    }
}

/// Redirect requests without a valid auth cookie to the log-in page.
///
/// On success, the ID of the logged-in user is added to the request
/// extensions.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |log_in_url| {
        Redirect::to(log_in_url).into_response()
    })
    .await
}

/// Like [auth_guard], but for routes called by HTMX.
///
/// HTMX ignores HTTP redirects on non-2xx responses, so the redirect is sent
/// as an HX-Redirect header with a 200 status instead.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |log_in_url| {
        (HxRedirect(log_in_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
