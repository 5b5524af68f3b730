use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_DIR: &str = "storage/logs";

/// Logs every request with a generated request id, its matched route, the
/// response status and the latency. The level follows the status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = uuid::Uuid::new_v4();

    info!(%request_id, %method, %path, "Incoming request");

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    match status {
        500..=599 => error!(%request_id, %method, %path, status, latency_ms, "Server error"),
        400..=499 => warn!(%request_id, %method, %path, status, latency_ms, "Client error"),
        _ => info!(%request_id, %method, %path, status, latency_ms, "Request completed"),
    }

    response
}

/// Installs the global subscriber: a compact console layer filtered by
/// `RUST_LOG`, a daily error log and a daily JSON log under `LOG_DIR`
/// (default `storage/logs`).
pub fn init_tracing() -> anyhow::Result<()> {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    std::fs::create_dir_all(&log_dir)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,tower_http=warn,sqlx=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            &log_dir,
            "lessonhub.log",
        ))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_layer = fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            &log_dir,
            "lessonhub.json",
        ))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()?;

    info!(%log_dir, "Tracing initialized");
    Ok(())
}
