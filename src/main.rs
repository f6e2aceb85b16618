//! Attendance Dashboard Server
//!
//! Run with: cargo run --bin attendance
//!
//! # Configuration
//!
//! Read from `--config`, else the first of
//! `~/.config/attendance/config.toml`, `/etc/attendance/config.toml` and
//! `./config.toml`. Environment variables override the file:
//! - `ATTENDANCE_HOST`, `ATTENDANCE_PORT`: Address to bind (default: 0.0.0.0:8090)
//! - `ATTENDANCE_BACKEND_URL`: Attendance backend (default: http://localhost:3000)
//! - `ATTENDANCE_LOGIN_ROUTE`: Where signed-out users go (default: /login)
//! - `ATTENDANCE_OCR_COMMAND`, `ATTENDANCE_OCR_LANGUAGE`: Tesseract invocation
//! - `ATTENDANCE_LOG_LEVEL`, `ATTENDANCE_LOG_FORMAT`: Logging (`RUST_LOG` wins)

use anyhow::Context;
use attendance::{config::Config, logging, web};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "attendance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Student attendance dashboard server")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::resolve(args.config.as_deref()).context("Failed to load configuration")?;
    logging::init_tracing(&config.logging);

    tracing::info!("Starting attendance dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.backend.url);
    tracing::info!("Login route: {}", config.server.login_route);

    let state = web::AppState::from_config(&config)?;
    web::serve(state).await?;

    Ok(())
}
