// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Health check endpoint.

use axum::{extract::State, http::StatusCode, Json};

use crate::api::AppState;

/// `GET /healthz` - liveness plus a database ping.
pub async fn healthz(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
	let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

	let status = if db_ok {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};

	(
		status,
		Json(serde_json::json!({
			"status": if db_ok { "ok" } else { "degraded" },
			"database": db_ok,
		})),
	)
}
