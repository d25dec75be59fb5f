//! The application server.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};

use axum::extract::{MatchedPath, Request};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use clap::Parser;
use rusqlite::Connection;
use time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use salestrack_rs::{AppState, build_router, graceful_shutdown};

/// How long a session lasts when the user does not tick "Remember me".
const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(30);

#[derive(Parser)]
#[command(version, about = "A web app for recording and exploring sales.")]
struct Args {
    /// The path to the SQLite database file. The file is created if it does
    /// not exist.
    #[arg(long, default_value = "sales.db")]
    db_path: PathBuf,

    /// The directory containing the TLS certificate (cert.pem) and private
    /// key (key.pem).
    #[arg(long, default_value = "certs")]
    cert_path: PathBuf,

    /// The port to serve the application on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone of the server, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,
}

/// Log INFO and above to stdout and everything from DEBUG up to a log file.
fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    match std::fs::File::create("debug.log") {
        Ok(log_file) => {
            let file_log = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file));

            tracing_subscriber::registry()
                .with(
                    stdout_log
                        .with_filter(LevelFilter::INFO)
                        .and_then(file_log.with_filter(LevelFilter::DEBUG)),
                )
                .init();
        }
        Err(error) => {
            tracing_subscriber::registry()
                .with(stdout_log.with_filter(LevelFilter::INFO))
                .init();
            tracing::warn!("could not create debug.log, file logging is disabled: {error}");
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let secret =
        std::env::var("SECRET").expect("the SECRET environment variable must be set");

    let db_connection = Connection::open(&args.db_path).unwrap_or_else(|error| {
        panic!(
            "could not open the database at {}: {error}",
            args.db_path.display()
        )
    });

    let state = AppState::new(db_connection, &secret, &args.timezone, DEFAULT_COOKIE_DURATION)
        .expect("could not create the application state");

    let tls_config = RustlsConfig::from_pem_file(
        args.cert_path.join("cert.pem"),
        args.cert_path.join("key.pem"),
    )
    .await
    .unwrap_or_else(|error| {
        panic!(
            "could not load the TLS certificate from {}: {error}",
            args.cert_path.display()
        )
    });

    let router = build_router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);

                tracing::debug_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    matched_path,
                )
            })
            // Error responses are already logged where they occur.
            .on_failure(()),
    );

    #[cfg(debug_assertions)]
    let router = router.layer(tower_livereload::LiveReloadLayer::new());

    let address = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), args.port);
    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    tracing::info!("Serving on https://{address}");

    axum_server::bind_rustls(address, tls_config)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("the server encountered an unrecoverable error");
}
