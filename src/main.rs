// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use base_app_server::{
    api::router,
    cli::{render_summary, Cli},
    logging,
    state::AppState,
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration errors abort startup before anything binds.
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Summary goes to stdout before logging starts; logs go to stderr.
    if cli.check {
        return match render_summary(&config) {
            Ok(json) => {
                println!("{json}");
                logging::init(&config);
                logging::report_startup(&config);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render configuration summary: {e}");
                ExitCode::FAILURE
            }
        };
    }

    logging::init(&config);
    logging::report_startup(&config);

    let addr = config.listen_addr;
    let app = router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "Server listening (docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
