//! Storing the auth token in a private (encrypted) cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::{Error, auth::token::Token, user::UserID};

/// The name of the cookie that holds the auth token.
pub const COOKIE_TOKEN: &str = "token";

/// Get the auth token from the cookie jar.
///
/// # Errors
/// Returns [Error::CookieMissing] if the cookie is missing, cannot be parsed,
/// or has expired.
pub fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;

    let token: Token =
        serde_json::from_str(cookie.value()).map_err(|_| Error::CookieMissing)?;

    if token.expires_at <= OffsetDateTime::now_utc() {
        return Err(Error::CookieMissing);
    }

    Ok(token)
}

/// Add an auth cookie for `user_id` to the cookie jar that expires after
/// `duration`.
///
/// `local_offset` is the UTC offset of the server's local timezone, used so
/// that the expiry the browser sees matches local time.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if the expiry date-time could not be
/// formatted.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
    local_offset: UtcOffset,
) -> Result<PrivateCookieJar, Error> {
    let expires_at = OffsetDateTime::now_utc().to_offset(local_offset) + duration;
    let token = Token {
        user_id,
        expires_at,
    };

    let token_string = serde_json::to_string(&token)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), expires_at.to_string()))?;

    let cookie = Cookie::build((COOKIE_TOKEN, token_string))
        .path("/")
        .same_site(SameSite::Strict)
        .http_only(true)
        .secure(true)
        .expires(expires_at)
        .build();

    Ok(jar.add(cookie))
}

/// Re-issue the auth cookie with a new expiry of now plus `duration` if less
/// than half of `duration` remains on the current token.
///
/// Returns the jar unchanged if there is no valid token or the token does not
/// need extending yet.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if the new expiry date-time could not
/// be formatted.
pub fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
    local_offset: UtcOffset,
) -> Result<PrivateCookieJar, Error> {
    let token = match get_token_from_cookies(&jar) {
        Ok(token) => token,
        Err(_) => return Ok(jar),
    };

    let remaining = token.expires_at - OffsetDateTime::now_utc();

    if remaining < duration / 2 {
        set_auth_cookie(jar, token.user_id, duration, local_offset)
    } else {
        Ok(jar)
    }
}

/// Replace the auth cookie with one that the browser will discard
/// immediately, logging the user out.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let cookie = Cookie::build((COOKIE_TOKEN, "deleted"))
        .path("/")
        .same_site(SameSite::Strict)
        .http_only(true)
        .secure(true)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .max_age(Duration::ZERO)
        .build();

    jar.add(cookie)
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use time::{Duration, OffsetDateTime, UtcOffset};

    use crate::{Error, user::UserID};

    use super::{
        COOKIE_TOKEN, extend_auth_cookie_duration_if_needed, get_token_from_cookies,
        invalidate_auth_cookie, set_auth_cookie,
    };

    fn get_test_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(Key::generate())
    }

    #[test]
    fn set_auth_cookie_stores_retrievable_token() {
        let jar = set_auth_cookie(
            get_test_jar(),
            UserID::new(1),
            Duration::minutes(5),
            UtcOffset::UTC,
        )
        .expect("could not set auth cookie");

        let token = get_token_from_cookies(&jar).expect("could not get token from cookies");

        assert_eq!(token.user_id, UserID::new(1));
        assert!(token.expires_at > OffsetDateTime::now_utc());
    }

    #[test]
    fn get_token_fails_on_empty_jar() {
        assert_eq!(
            get_token_from_cookies(&get_test_jar()),
            Err(Error::CookieMissing)
        );
    }

    #[test]
    fn get_token_fails_on_expired_token() {
        let jar = set_auth_cookie(
            get_test_jar(),
            UserID::new(1),
            Duration::minutes(-5),
            UtcOffset::UTC,
        )
        .expect("could not set auth cookie");

        assert_eq!(get_token_from_cookies(&jar), Err(Error::CookieMissing));
    }

    #[test]
    fn extend_renews_token_close_to_expiry() {
        let jar = set_auth_cookie(
            get_test_jar(),
            UserID::new(1),
            Duration::minutes(1),
            UtcOffset::UTC,
        )
        .expect("could not set auth cookie");
        let original_expiry = get_token_from_cookies(&jar)
            .expect("could not get token")
            .expires_at;

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::hours(1), UtcOffset::UTC)
            .expect("could not extend auth cookie");
        let new_expiry = get_token_from_cookies(&jar)
            .expect("could not get token")
            .expires_at;

        assert!(new_expiry > original_expiry);
    }

    #[test]
    fn extend_leaves_fresh_token_alone() {
        let jar = set_auth_cookie(
            get_test_jar(),
            UserID::new(1),
            Duration::hours(1),
            UtcOffset::UTC,
        )
        .expect("could not set auth cookie");
        let original_expiry = get_token_from_cookies(&jar)
            .expect("could not get token")
            .expires_at;

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::hours(1), UtcOffset::UTC)
            .expect("could not extend auth cookie");
        let new_expiry = get_token_from_cookies(&jar)
            .expect("could not get token")
            .expires_at;

        assert_eq!(new_expiry, original_expiry);
    }

    #[test]
    fn invalidate_makes_token_unretrievable() {
        let jar = set_auth_cookie(
            get_test_jar(),
            UserID::new(1),
            Duration::minutes(5),
            UtcOffset::UTC,
        )
        .expect("could not set auth cookie");

        let jar = invalidate_auth_cookie(jar);

        assert_eq!(get_token_from_cookies(&jar), Err(Error::CookieMissing));
        assert_eq!(
            jar.get(COOKIE_TOKEN).map(|cookie| cookie.value().to_owned()),
            Some("deleted".to_owned())
        );
    }
}
