//! Helpers for asserting on HTTP responses in tests.

use axum::response::Response;

/// Assert that `response` redirects to `url` via the HX-Redirect header.
#[track_caller]
pub fn assert_hx_redirect(response: &Response, url: &str) {
    let hx_redirect = response
        .headers()
        .get("HX-Redirect")
        .map(|header_value| header_value.to_str().unwrap_or_default());

    assert_eq!(hx_redirect, Some(url), "response does not redirect to {url}");
}
