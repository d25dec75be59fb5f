//! Building the URL that sends an unauthenticated user to the log-in page and
//! back to where they were afterwards.

use axum::{extract::Request, http::Uri};
use serde::Serialize;

use crate::endpoints;

#[derive(Serialize)]
struct RedirectQuery<'a> {
    redirect_url: &'a str,
}

/// Check that `redirect_url` is a path within this application, so that the
/// log-in page never redirects the user to another site.
pub(crate) fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    match redirect_url.parse::<Uri>() {
        Ok(uri) => uri.path() != endpoints::LOG_IN_VIEW,
        Err(_) => false,
    }
}

/// Build the log-in page URL with `target_url` as the post-log-in redirect,
/// dropping the redirect if `target_url` is not a safe application path.
pub fn build_log_in_redirect_url_from_target(target_url: &str) -> String {
    if !is_safe_redirect_url(target_url) {
        return endpoints::LOG_IN_VIEW.to_owned();
    }

    match serde_urlencoded::to_string(RedirectQuery {
        redirect_url: target_url,
    }) {
        Ok(query) => format!("{}?{query}", endpoints::LOG_IN_VIEW),
        Err(_) => endpoints::LOG_IN_VIEW.to_owned(),
    }
}

/// Build the log-in page URL for an unauthenticated `request`.
///
/// Requests made by HTMX to API routes use the page URL from the
/// HX-Current-URL header, since the request URI points at the API route
/// rather than the page the user was on.
pub fn build_log_in_redirect_url(request: &Request) -> String {
    let target_url = if request.uri().path().starts_with("/api") {
        request
            .headers()
            .get("HX-Current-URL")
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|current_url| current_url.parse::<Uri>().ok())
            .map(|uri| match uri.path_and_query() {
                Some(path_and_query) => path_and_query.to_string(),
                None => uri.path().to_owned(),
            })
    } else {
        request
            .uri()
            .path_and_query()
            .map(|path_and_query| path_and_query.to_string())
    };

    match target_url {
        Some(target_url) => build_log_in_redirect_url_from_target(&target_url),
        None => endpoints::LOG_IN_VIEW.to_owned(),
    }
}

#[cfg(test)]
mod redirect_tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, build_log_in_redirect_url_from_target};

    #[test]
    fn target_url_is_urlencoded_into_query() {
        let url = build_log_in_redirect_url_from_target("/overview?view=weekly&date=2024-03-05");

        assert_eq!(
            url,
            format!(
                "{}?redirect_url=%2Foverview%3Fview%3Dweekly%26date%3D2024-03-05",
                endpoints::LOG_IN_VIEW
            )
        );
    }

    #[test]
    fn external_urls_are_rejected() {
        for target in ["https://example.com", "//example.com", "example.com"] {
            assert_eq!(
                build_log_in_redirect_url_from_target(target),
                endpoints::LOG_IN_VIEW,
                "{target} should not be used as a redirect"
            );
        }
    }

    #[test]
    fn log_in_page_is_not_used_as_redirect_target() {
        assert_eq!(
            build_log_in_redirect_url_from_target(endpoints::LOG_IN_VIEW),
            endpoints::LOG_IN_VIEW
        );
    }

    #[test]
    fn page_requests_use_the_request_uri() {
        let request = Request::builder()
            .uri("/sales")
            .body(Body::empty())
            .expect("could not build request");

        assert_eq!(
            build_log_in_redirect_url(&request),
            format!("{}?redirect_url=%2Fsales", endpoints::LOG_IN_VIEW)
        );
    }

    #[test]
    fn api_requests_use_the_hx_current_url_header() {
        let request = Request::builder()
            .uri("/api/sales")
            .header("HX-Current-URL", "https://localhost:3000/sales")
            .body(Body::empty())
            .expect("could not build request");

        assert_eq!(
            build_log_in_redirect_url(&request),
            format!("{}?redirect_url=%2Fsales", endpoints::LOG_IN_VIEW)
        );
    }

    #[test]
    fn api_requests_without_header_fall_back_to_plain_log_in_url() {
        let request = Request::builder()
            .uri("/api/sales")
            .body(Body::empty())
            .expect("could not build request");

        assert_eq!(build_log_in_redirect_url(&request), endpoints::LOG_IN_VIEW);
    }
}
