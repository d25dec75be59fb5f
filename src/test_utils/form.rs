//! Helpers for asserting on HTML forms in tests.

use scraper::{ElementRef, Html, Selector};

/// Get the first form in `html`, panicking if there is none.
#[track_caller]
pub fn must_get_form(html: &Html) -> ElementRef<'_> {
    let selector = Selector::parse("form").expect("could not parse selector");

    html.select(&selector).next().expect("no form found in page")
}

/// Assert that `form` submits to `endpoint` via HTMX.
#[track_caller]
pub fn assert_hx_endpoint(form: &ElementRef, endpoint: &str) {
    let hx_post = form.value().attr("hx-post");

    assert_eq!(
        hx_post,
        Some(endpoint),
        "form does not post to {endpoint} via HTMX"
    );
}

/// Assert that `form` contains an input with the given `name` and
/// `input_type`.
#[track_caller]
pub fn assert_form_input(form: &ElementRef, name: &str, input_type: &str) {
    let selector = Selector::parse(&format!("input[name=\"{name}\"][type=\"{input_type}\"]"))
        .expect("could not parse selector");

    assert!(
        form.select(&selector).next().is_some(),
        "no {input_type} input named {name} found in form"
    );
}
