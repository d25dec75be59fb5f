//! The endpoint for deleting a sale.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::SaleID, sale::delete_sale};

/// The state needed to delete a sale.
#[derive(Debug, Clone)]
pub struct DeleteSaleState {
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteSaleState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete the sale with the ID in the request path.
///
/// On success the response body is empty with a 200 status so that HTMX
/// swaps out the sale's table row.
pub async fn delete_sale_endpoint(
    State(state): State<DeleteSaleState>,
    Path(sale_id): Path<i64>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_sale(SaleID::new(sale_id), &connection) {
        Ok(0) => Error::DeleteMissingSale.into_alert_response(),
        Ok(_) => Html("").into_response(),
        Err(error) => error.into_alert_response(),
    }
}
