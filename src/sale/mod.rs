//! The sale record, its database functions, and its HTTP endpoints.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod sales_page;

pub use core::{
    Sale, create_sale, create_sale_table, delete_sale, effective_date_time, get_all_sales,
};
pub use create_endpoint::create_sale_endpoint;
pub use delete_endpoint::delete_sale_endpoint;
pub use sales_page::get_sales_page;
