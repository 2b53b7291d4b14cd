// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! APEMS server binary.

use clap::{Parser, Subcommand};
use std::time::Duration;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};

use apems_server::{create_app_state, create_router};
use apems_server_db::SessionStore;

/// APEMS - administrative records-management server.
#[derive(Parser, Debug)]
#[command(name = "apems-server", about = "APEMS records-management server", version)]
struct Args {
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("apems-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = apems_server_config::load_config()?;

	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting apems-server"
	);

	let pool = apems_server_db::create_pool(&config.database.url).await?;
	apems_server_db::ensure_schema(&pool).await?;

	let state = create_app_state(pool.clone(), &config);

	// Periodic expired-session sweep.
	{
		let session_repo = state.session_repo.clone();
		let interval = Duration::from_secs(config.auth.session_cleanup_interval_secs);
		tokio::spawn(async move {
			let mut ticker = tokio::time::interval(interval);
			ticker.tick().await;
			loop {
				ticker.tick().await;
				match session_repo.purge_expired().await {
					Ok(0) => {}
					Ok(n) => tracing::info!(purged = n, "expired sessions removed"),
					Err(e) => tracing::error!(error = %e, "session cleanup failed"),
				}
			}
		});
	}

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
