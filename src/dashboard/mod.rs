//! The overview page and its charts.

mod charts;
mod handlers;

pub use handlers::get_overview_page;
