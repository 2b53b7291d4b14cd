// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	middleware::{from_fn, from_fn_with_state},
	routing::{get, post},
	Router,
};
use sqlx::SqlitePool;

use apems_server_config::{AuthConfig, ServerConfig};
use apems_server_db::{ActorRepository, AuditRepository, RecordRepository, SessionRepository};

use crate::auth_middleware::{require_auth_layer, session_layer, RequirePortal};
use crate::routes;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub actor_repo: Arc<ActorRepository>,
	pub session_repo: Arc<SessionRepository>,
	pub record_repo: Arc<RecordRepository>,
	pub audit_repo: Arc<AuditRepository>,
	pub auth_config: AuthConfig,
}

/// Build the application state from a pool and resolved config.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	AppState {
		actor_repo: Arc::new(ActorRepository::new(pool.clone())),
		session_repo: Arc::new(SessionRepository::new(pool.clone())),
		record_repo: Arc::new(RecordRepository::new(pool.clone())),
		audit_repo: Arc::new(AuditRepository::new(pool.clone())),
		auth_config: config.auth.clone(),
		pool,
	}
}

fn user_portal() -> Router<AppState> {
	Router::new()
		.route(
			"/{kind}",
			get(routes::records::list_records).post(routes::records::create_record),
		)
		.route(
			"/{kind}/{id}",
			get(routes::records::get_record).put(routes::records::update_record),
		)
		.route("/{kind}/{id}/archive", post(routes::records::archive_record))
		.route_layer(RequirePortal::user())
		.layer(from_fn(require_auth_layer))
}

fn admin_portal() -> Router<AppState> {
	Router::new()
		.route("/audit", get(routes::admin::list_audit))
		.route("/{kind}", get(routes::admin::list_records))
		.route("/{kind}/{id}", get(routes::admin::get_record))
		.route_layer(RequirePortal::admin())
		.layer(from_fn(require_auth_layer))
}

/// Create the full router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/healthz", get(routes::health::healthz))
		.route("/login", post(routes::auth::login))
		.route("/logout", post(routes::auth::logout))
		.nest("/user", user_portal())
		.nest("/admin", admin_portal())
		.layer(from_fn_with_state(state.clone(), session_layer))
		.with_state(state)
}
