//! Middleware for logging request bodies during development.

use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The maximum number of body bytes that will be buffered for logging.
pub const LOG_BODY_LENGTH_LIMIT: usize = 2048;

/// Log the bodies of form submissions at the debug level with passwords
/// redacted.
///
/// Bodies other than URL-encoded forms are passed through untouched.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/x-www-form-urlencoded"));

    if !is_form {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, LOG_BODY_LENGTH_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::debug!("could not buffer request body for logging: {error}");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    tracing::debug!(
        "request body: {}",
        redact_password(&String::from_utf8_lossy(&bytes))
    );

    let request = Request::from_parts(parts, Body::from(bytes));

    next.run(request).await
}

/// Replace the values of password fields in the URL-encoded `body` so that
/// passwords never end up in the logs.
fn redact_password(body: &str) -> String {
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(body) {
        Ok(pairs) => pairs,
        Err(_) => return body.to_owned(),
    };

    let redacted: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(key, value)| {
            if key == "password" || key == "confirm_password" {
                (key, "[REDACTED]".to_owned())
            } else {
                (key, value)
            }
        })
        .collect();

    serde_urlencoded::to_string(&redacted).unwrap_or_else(|_| body.to_owned())
}
