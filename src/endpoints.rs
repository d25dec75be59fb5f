//! The endpoints for the HTTP server.

/// The route for the root of the application, redirects to the overview page.
pub const ROOT: &str = "/";

/// The route for the overview page showing sales grouped by period.
pub const OVERVIEW_VIEW: &str = "/overview";

/// The route for the page listing recorded sales.
pub const SALES_VIEW: &str = "/sales";

/// The route for the log-in page.
pub const LOG_IN_VIEW: &str = "/log_in";

/// The route for logging in a user via the REST API.
pub const LOG_IN_API: &str = "/api/log_in";

/// The route for logging out the current user.
pub const LOG_OUT: &str = "/api/log_out";

/// The route for the registration page.
pub const REGISTER_VIEW: &str = "/register";

/// The route for creating the application user via the REST API.
pub const USERS: &str = "/api/users";

/// The route for creating a sale via the REST API.
pub const SALES_API: &str = "/api/sales";

/// The route for deleting a sale via the REST API.
pub const DELETE_SALE: &str = "/api/sales/{sale_id}";

/// The route for a dummy page for testing internal server error handling.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for static files such as scripts and stylesheets.
pub const STATIC: &str = "/static";

/// The route for checking whether the server is a teapot.
pub const COFFEE: &str = "/coffee";

/// Replace the ID path parameter in `endpoint_path` with `id`.
///
/// For example, `format_endpoint("/api/sales/{sale_id}", 42)` produces
/// "/api/sales/42".
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let start = endpoint_path.find('{');
    let end = endpoint_path.find('}');

    match (start, end) {
        (Some(start), Some(end)) => {
            let mut result = endpoint_path[..start].to_owned();
            result.push_str(&id.to_string());
            result.push_str(&endpoint_path[end + 1..]);

            result
        }
        _ => endpoint_path.to_owned(),
    }
}
