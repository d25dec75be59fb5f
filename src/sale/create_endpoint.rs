//! The endpoint for recording a sale.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    endpoints,
    period::calendar::noon_of,
    sale::create_sale,
    timezone::current_local_date,
};

/// The state needed to record a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleState {
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone string used to determine today's date.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateSaleState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The data submitted by the new sale form.
// The date is optional so that the quick-add form can omit it, in which case
// the sale is recorded for today.
#[derive(Debug, Deserialize)]
pub struct CreateSaleForm {
    /// The amount of money received, must be a positive number.
    pub amount: f64,
    /// The date the sale happened on. Defaults to today.
    pub date: Option<Date>,
}

/// Record a sale and redirect to the sales page.
///
/// Sales are timestamped at noon on their sale date so that they sort and
/// group consistently.
pub async fn create_sale_endpoint(
    State(state): State<CreateSaleState>,
    Form(form): Form<CreateSaleForm>,
) -> Response {
    let date = match form.date {
        Some(date) => date,
        None => match current_local_date(&state.local_timezone) {
            Ok(date) => date,
            Err(error) => return error.into_alert_response(),
        },
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_sale(form.amount, date, Some(noon_of(date)), &connection) {
        Ok(_) => (
            HxRedirect(endpoints::SALES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod create_sale_endpoint_tests {
    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::{Duration, macros::date, macros::datetime};

    use crate::{
        AppState, endpoints,
        sale::get_all_sales,
        test_utils::assert_hx_redirect,
    };

    use super::{CreateSaleForm, CreateSaleState, create_sale_endpoint};

    fn get_test_state() -> CreateSaleState {
        let state = AppState::new(
            Connection::open_in_memory().expect("could not open database connection"),
            "wow much secret",
            "Etc/UTC",
            Duration::minutes(5),
        )
        .expect("could not create app state");

        CreateSaleState::from_ref(&state)
    }

    #[tokio::test]
    async fn valid_sale_is_recorded_and_redirects() {
        let state = get_test_state();
        let db_connection = state.db_connection.clone();

        let response = create_sale_endpoint(
            State(state),
            Form(CreateSaleForm {
                amount: 50.75,
                date: Some(date!(2024 - 03 - 05)),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::SALES_VIEW);

        let connection = db_connection.lock().expect("could not lock database");
        let sales = get_all_sales(&connection).expect("could not get sales");
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].amount, 50.75);
        assert_eq!(sales[0].date, date!(2024 - 03 - 05));
        assert_eq!(sales[0].timestamp, Some(datetime!(2024-03-05 12:00)));
    }

    #[tokio::test]
    async fn missing_date_defaults_to_today() {
        let state = get_test_state();
        let db_connection = state.db_connection.clone();
        let today = crate::timezone::current_local_date("Etc/UTC").expect("could not get today");

        let response = create_sale_endpoint(
            State(state),
            Form(CreateSaleForm {
                amount: 20.0,
                date: None,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let connection = db_connection.lock().expect("could not lock database");
        let sales = get_all_sales(&connection).expect("could not get sales");
        assert_eq!(sales[0].date, today);
    }

    #[test]
    fn form_deserializes_from_urlencoded_body() {
        let form: CreateSaleForm = serde_html_form::from_str("amount=50.75&date=2024-03-05")
            .expect("could not deserialize form");

        assert_eq!(form.amount, 50.75);
        assert_eq!(form.date, Some(date!(2024 - 03 - 05)));
    }

    #[test]
    fn form_without_date_deserializes_to_none() {
        let form: CreateSaleForm =
            serde_html_form::from_str("amount=20").expect("could not deserialize form");

        assert_eq!(form.amount, 20.0);
        assert_eq!(form.date, None);
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let state = get_test_state();
        let db_connection = state.db_connection.clone();

        let response = create_sale_endpoint(
            State(state),
            Form(CreateSaleForm {
                amount: -5.0,
                date: Some(date!(2024 - 03 - 05)),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let connection = db_connection.lock().expect("could not lock database");
        assert_eq!(get_all_sales(&connection), Ok(vec![]));
    }
}
