//! Shared helpers for tests.

mod form;
mod html;
mod http;

pub use form::{assert_form_input, assert_hx_endpoint, must_get_form};
pub use html::parse_html_document;
pub use http::assert_hx_redirect;
