//! The overview page showing sales grouped by day, week, month, or year.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    dashboard::charts::{OverviewChart, charts_script, charts_view, sales_chart},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_INPUT_STYLE, FORM_LABEL_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_STYLE, base,
        format_currency, loading_spinner,
    },
    navigation::NavBar,
    period::{
        ViewMode,
        aggregate::aggregate,
        filter::{period_total, sales_in_period},
        format::format_period_heading,
        navigate::{Direction, PeriodQuery, navigate},
    },
    sale::{Sale, get_all_sales},
    shared_templates::render,
    timezone::current_local_date,
};

/// The state needed to render the overview page.
#[derive(Debug, Clone)]
pub struct OverviewState {
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone string used to determine today's date.
    pub local_timezone: String,
}

impl FromRef<AppState> for OverviewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string of the overview page.
///
/// Both parameters are optional: leaving out the view shows the daily view
/// and leaving out the date shows the period containing today. The view
/// selector links omit the date so that switching views always returns to
/// the current period.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    /// How sales should be grouped and displayed.
    pub view: Option<ViewMode>,
    /// The date that anchors the displayed period.
    pub date: Option<Date>,
}

/// Render the overview page for the period in the query string.
pub async fn get_overview_page(
    State(state): State<OverviewState>,
    Query(query): Query<OverviewQuery>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let view_mode = query.view.unwrap_or_default();
    let period_query = match query.date {
        Some(date) => PeriodQuery {
            view_mode,
            display_date: date,
        },
        None => PeriodQuery::reset(view_mode, today),
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

    let sales_in_view = sales_in_period(&sales, period_query.view_mode, period_query.display_date);
    let buckets = aggregate(&sales_in_view, period_query.view_mode);
    let total = period_total(&sales, period_query.view_mode, period_query.display_date);
    let heading = format_period_heading(&period_query);

    let charts = [OverviewChart {
        id: "sales-chart",
        options: sales_chart(&buckets, &heading).to_string(),
    }];

    // Skip the chart scripts when there is nothing to plot, since the chart
    // container is not rendered either.
    let head_elements = if sales_in_view.is_empty() {
        vec![]
    } else {
        vec![
            HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
            charts_script(&charts),
        ]
    };

    let content = html! {
        (NavBar::new(endpoints::OVERVIEW_VIEW).into_html())
        main class=(PAGE_CONTAINER_STYLE) {
            (view_selector(period_query.view_mode))
            (period_navigation(&period_query, &heading))
            p class="text-lg text-gray-800" {
                "Total: "
                span class="font-bold" { (format_currency(total)) }
            }
            (quick_add_form())
            @if sales_in_view.is_empty() {
                p class="text-gray-600" { "No sales in this period." }
            } @else {
                (charts_view(&charts))
                (period_sales_table(&sales_in_view))
            }
        }
    };

    render(StatusCode::OK, base("Overview", &head_elements, &content))
}

// Posts only an amount, so the sale is recorded for today.
fn quick_add_form() -> Markup {
    html! {
        form class="flex items-end gap-4 bg-white p-4 rounded-lg shadow-sm"
            hx-post=(endpoints::SALES_API)
            hx-target-error="#alert-container"
            hx-swap="none" {
            div class="flex flex-col" {
                label for="amount" class=(FORM_LABEL_STYLE) { "Record a sale today" }
                input
                    id="amount"
                    name="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    class=(FORM_INPUT_STYLE)
                    required;
            }
            button type="submit" class=(BUTTON_PRIMARY_STYLE) {
                "Add"
                (loading_spinner())
            }
        }
    }
}

fn overview_url(query: &PeriodQuery) -> String {
    format!(
        "{}?view={}&date={}",
        endpoints::OVERVIEW_VIEW,
        query.view_mode,
        query.display_date
    )
}

fn view_selector(current_view: ViewMode) -> Markup {
    html! {
        nav class="flex gap-2" aria-label="View mode" {
            @for view_mode in ViewMode::ALL {
                @let style = if view_mode == current_view {
                    "px-4 py-2 rounded-sm bg-blue-500 text-white font-bold"
                } else {
                    "px-4 py-2 rounded-sm bg-white text-gray-700 hover:bg-blue-100"
                };
                a href=(format!("{}?view={}", endpoints::OVERVIEW_VIEW, view_mode))
                    class=(style)
                    aria-current=[(view_mode == current_view).then_some("page")] {
                    (view_mode.button_label())
                }
            }
        }
    }
}

fn period_navigation(query: &PeriodQuery, heading: &str) -> Markup {
    let previous_url = overview_url(&navigate(*query, Direction::Previous));
    let next_url = overview_url(&navigate(*query, Direction::Next));

    html! {
        div class="flex items-center gap-4" {
            a href=(previous_url) rel="prev" class="text-blue-600 hover:text-blue-800 text-xl" {
                "\u{2039}"
            }
            h1 class="text-xl font-semibold text-gray-800" { (heading) }
            a href=(next_url) rel="next" class="text-blue-600 hover:text-blue-800 text-xl" {
                "\u{203A}"
            }
        }
    }
}

fn period_sales_table(sales: &[&Sale]) -> Markup {
    html! {
        table class=(TABLE_STYLE) {
            thead {
                tr {
                    th class=(TABLE_HEADER_STYLE) { "Date" }
                    th class=(TABLE_HEADER_STYLE) { "Amount" }
                }
            }
            tbody {
                @for sale in sales {
                    tr {
                        td class=(TABLE_CELL_STYLE) { (sale.date) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(sale.amount)) }
                    }
                }
            }
        }
    }
}
