use anyhow::Context;
use axum::http::{self, HeaderValue, Method};
use dotenvy::dotenv;
use env_logger::Builder;
use log::LevelFilter;
use server::{app, state::AppState, utils::config::CONFIG};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

fn init_logger() {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .filter_module("gabi_engine", LevelFilter::Debug)
        .filter_module("tower_http", LevelFilter::Debug)
        .filter_module("axum", LevelFilter::Debug)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Warning: failed to load .env: {}", e);
    }

    init_logger();

    let origin = CONFIG
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid GABI_ALLOWED_ORIGIN: {}", CONFIG.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin([origin])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([http::header::CONTENT_TYPE]);

    let app = app::create_app_with_state(AppState::from_config(&CONFIG))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                tracing::info_span!(
                    "HTTP request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        );

    let addr = CONFIG.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    log::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
