//! The page listing recorded sales.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_INPUT_STYLE, FORM_LABEL_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_STYLE, base, format_currency, loading_spinner,
    },
    navigation::NavBar,
    sale::{Sale, get_all_sales},
    shared_templates::render,
    timezone::current_local_date,
};

/// The state needed to render the sales page.
#[derive(Debug, Clone)]
pub struct SalesPageState {
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone string used to determine today's date.
    pub local_timezone: String,
}

impl FromRef<AppState> for SalesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the sales page: a form for recording a sale and a table of all
/// recorded sales, most recent first.
pub async fn get_sales_page(State(state): State<SalesPageState>) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let sales = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_all_sales(&connection) {
            Ok(sales) => sales,
            Err(error) => return error.into_response(),
        }
    };

    let content = html! {
        (NavBar::new(endpoints::SALES_VIEW).into_html())
        main class=(PAGE_CONTAINER_STYLE) {
            h1 class="text-2xl font-bold text-gray-800" { "Sales" }
            (new_sale_form(today))
            (sales_table(&sales))
        }
    };

    render(StatusCode::OK, base("Sales", &[], &content))
}

fn new_sale_form(today: time::Date) -> Markup {
    html! {
        form class="flex flex-col md:flex-row items-end gap-4 bg-white p-4 rounded-lg shadow-sm"
            hx-post=(endpoints::SALES_API)
            hx-target-error="#alert-container"
            hx-swap="none" {
            div class="flex flex-col" {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    id="amount"
                    name="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    class=(FORM_INPUT_STYLE)
                    required;
            }
            div class="flex flex-col" {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="date"
                    name="date"
                    type="date"
                    value=(today)
                    max=(today)
                    class=(FORM_INPUT_STYLE)
                    required;
            }
            button type="submit" class=(BUTTON_PRIMARY_STYLE) {
                "Add sale"
                (loading_spinner())
            }
        }
    }
}

fn sales_table(sales: &[Sale]) -> Markup {
    if sales.is_empty() {
        return html! {
            p class="text-gray-600" { "No sales recorded yet. Add your first sale above." }
        };
    }

    html! {
        table class=(TABLE_STYLE) {
            thead {
                tr {
                    th class=(TABLE_HEADER_STYLE) { "Date" }
                    th class=(TABLE_HEADER_STYLE) { "Amount" }
                    th class=(TABLE_HEADER_STYLE) { "" }
                }
            }
            tbody {
                @for sale in sales {
                    (sale_row(sale))
                }
            }
        }
    }
}

fn sale_row(sale: &Sale) -> Markup {
    html! {
        tr id=(format!("sale-{}", sale.id)) {
            td class=(TABLE_CELL_STYLE) { (sale.date) }
            td class=(TABLE_CELL_STYLE) { (format_currency(sale.amount)) }
            td class=(TABLE_CELL_STYLE) {
                button class="text-red-600 hover:text-red-800"
                    hx-delete=(format_endpoint(endpoints::DELETE_SALE, sale.id.as_i64()))
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container" {
                    "Delete"
                }
            }
        }
    }
}

#[cfg(test)]
mod sales_page_tests {
    use axum::extract::{FromRef, State};
    use rusqlite::Connection;
    use scraper::Selector;
    use time::{Duration, macros::date};

    use crate::{
        AppState, endpoints,
        sale::create_sale,
        test_utils::{assert_hx_endpoint, must_get_form, parse_html_document},
    };

    use super::{SalesPageState, get_sales_page};

    fn get_test_state() -> SalesPageState {
        let state = AppState::new(
            Connection::open_in_memory().expect("could not open database connection"),
            "wow much secret",
            "Etc/UTC",
            Duration::minutes(5),
        )
        .expect("could not create app state");

        SalesPageState::from_ref(&state)
    }

    #[tokio::test]
    async fn sales_page_contains_new_sale_form() {
        let response = get_sales_page(State(get_test_state())).await;

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);

        assert_hx_endpoint(&form, endpoints::SALES_API);
    }

    #[tokio::test]
    async fn sales_page_lists_recorded_sales() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().expect("could not lock database");
            create_sale(50.75, date!(2024 - 03 - 05), None, &connection)
                .expect("could not create sale");
            create_sale(20.0, date!(2024 - 03 - 12), None, &connection)
                .expect("could not create sale");
        }

        let response = get_sales_page(State(state)).await;
        let html = parse_html_document(response).await;

        let row_selector = Selector::parse("tbody tr").expect("could not parse selector");
        assert_eq!(html.select(&row_selector).count(), 2);

        let page_text = html.html();
        assert!(page_text.contains("$50.75"));
        assert!(page_text.contains("$20.00"));
    }

    #[tokio::test]
    async fn sales_rows_have_delete_buttons() {
        let state = get_test_state();
        let sale = {
            let connection = state.db_connection.lock().expect("could not lock database");
            create_sale(50.75, date!(2024 - 03 - 05), None, &connection)
                .expect("could not create sale")
        };

        let response = get_sales_page(State(state)).await;
        let html = parse_html_document(response).await;

        let delete_url = endpoints::format_endpoint(endpoints::DELETE_SALE, sale.id.as_i64());
        let selector = Selector::parse(&format!("button[hx-delete=\"{delete_url}\"]"))
            .expect("could not parse selector");
        assert!(html.select(&selector).next().is_some());
    }

    #[tokio::test]
    async fn empty_sales_page_shows_placeholder() {
        let response = get_sales_page(State(get_test_state())).await;
        let html = parse_html_document(response).await;

        assert!(html.html().contains("No sales recorded yet"));
    }
}
