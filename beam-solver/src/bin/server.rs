//! Beam Solver HTTP Server

use anyhow::Context;

use beam_solver::analysis::AnalysisOptions;
use beam_solver::service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8086".to_string());
    let addr = format!("{}:{}", host, port);

    let app = service::router(AnalysisOptions::default());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log::info!("Beam Solver Server listening on http://{}", addr);
    println!("Beam Solver Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Validation:   POST /api/v1/validate");
    println!("  Analysis:     POST /api/v1/analyze");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
