//! Helpers for rendering HTML responses.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::Markup;

/// Render `markup` as an HTML response with the given `status_code`.
pub fn render(status_code: StatusCode, markup: Markup) -> Response {
    (status_code, Html(markup.into_string())).into_response()
}

#[cfg(test)]
mod render_tests {
    use axum::http::StatusCode;
    use maud::html;

    use super::render;

    #[test]
    fn render_sets_status_code() {
        let response = render(StatusCode::NOT_FOUND, html! { p { "nothing here" } });

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
