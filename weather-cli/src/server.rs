use std::{collections::HashMap, net::SocketAddr, path::Path};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};
use weather_core::{WeatherLookup, WeatherResponse};

/// Routes for the pages, their assets and `GET /weather`.
pub fn router(lookup: WeatherLookup, public_dir: &Path) -> Router {
    Router::new()
        .route("/weather", get(weather))
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service("/about", ServeFile::new(public_dir.join("about.html")))
        .route_service("/help", ServeFile::new(public_dir.join("help.html")))
        .route("/help/{*article}", get(help_not_found))
        .nest_service("/css", ServeDir::new(public_dir.join("css")))
        .nest_service("/js", ServeDir::new(public_dir.join("js")))
        .fallback(page_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(lookup)
}

/// Domain errors are reported in the body with status 200.
///
/// The query is taken as a plain map so a repeated `address` (last one wins)
/// still gets a JSON answer instead of an extractor rejection.
async fn weather(
    State(lookup): State<WeatherLookup>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<WeatherResponse> {
    let address = query.get("address").map(String::as_str);
    Json(lookup.lookup_weather(address).await)
}

async fn help_not_found() -> impl IntoResponse {
    not_found_page("Help article not found")
}

async fn page_not_found() -> impl IntoResponse {
    not_found_page("Page not found")
}

fn not_found_page(message: &str) -> (StatusCode, Html<String>) {
    let body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>404</title>
    <link rel="stylesheet" href="/css/styles.css">
</head>
<body>
    <div class="main-content">
        <h1>404</h1>
        <p>{message}</p>
        <a href="/">Back to the weather search</a>
    </div>
</body>
</html>
"#
    );
    (StatusCode::NOT_FOUND, Html(body))
}

pub async fn run(port: u16, lookup: WeatherLookup, public_dir: &Path) -> anyhow::Result<()> {
    let app = router(lookup, public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server is up on port {port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, running until killed: {e}");
        std::future::pending::<()>().await;
    }
}
