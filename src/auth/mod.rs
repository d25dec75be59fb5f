//! Authentication for the application: the auth token cookie, the middleware
//! that guards protected routes, and the log-in endpoints.

mod cookie;
mod log_in;
mod middleware;
mod redirect;
mod token;

pub use cookie::{invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, log_in_link, post_log_in};
pub use middleware::{auth_guard, auth_guard_hx};
