//! Ties the route handlers to the endpoints.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, auth_guard_hx, get_log_in_page, post_log_in},
    dashboard::get_overview_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    log_out::get_log_out,
    logging::logging_middleware,
    not_found::get_404_not_found,
    register_user::{get_register_page, post_register},
    sale::{create_sale_endpoint, delete_sale_endpoint, get_sales_page},
};

/// Create the router for the application.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(post_register))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_page_routes = Router::new()
        .route(endpoints::OVERVIEW_VIEW, get(get_overview_page))
        .route(endpoints::SALES_VIEW, get(get_sales_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    let protected_api_routes = Router::new()
        .route(endpoints::SALES_API, post(create_sale_endpoint))
        .route(endpoints::DELETE_SALE, delete(delete_sale_endpoint))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx));

    Router::new()
        .merge(unprotected_routes)
        .merge(protected_page_routes)
        .merge(protected_api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Redirect requests for the application root to the overview page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::OVERVIEW_VIEW)
}

async fn get_coffee() -> Response {
    StatusCode::IM_A_TEAPOT.into_response()
}

#[cfg(test)]
mod root_route_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::Duration;

    use crate::{AppState, endpoints};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().expect("could not open database connection"),
            "wow much secret",
            "Etc/UTC",
            Duration::minutes(5),
        )
        .expect("could not create app state");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn root_redirects_to_overview() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(
            response
                .header("location")
                .to_str()
                .expect("location header is not valid UTF-8"),
            endpoints::OVERVIEW_VIEW
        );
    }

    #[tokio::test]
    async fn overview_requires_logging_in() {
        let server = get_test_server();

        let response = server.get(endpoints::OVERVIEW_VIEW).await;

        response.assert_status_see_other();
        assert!(
            response
                .header("location")
                .to_str()
                .expect("location header is not valid UTF-8")
                .starts_with(endpoints::LOG_IN_VIEW)
        );
    }

    #[tokio::test]
    async fn unknown_route_returns_not_found_page() {
        let server = get_test_server();

        let response = server.get("/does_not_exist").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn the_server_is_a_teapot() {
        let server = get_test_server();

        let response = server.get(endpoints::COFFEE).await;

        assert_eq!(
            response.status_code(),
            axum::http::StatusCode::IM_A_TEAPOT
        );
    }
}
