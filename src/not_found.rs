//! The 404 Not Found page.

use axum::{
    http::StatusCode,
    response::Response,
};

use crate::{html::error_view, shared_templates::render};

/// Create the response for a request to a route that does not exist.
pub fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "The page you are looking for does not exist.",
            "Check the URL for typos or head back to the home page.",
        ),
    )
}

/// The fallback route handler for requests that match no other route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}
