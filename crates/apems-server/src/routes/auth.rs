// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Login and logout handlers.

use axum::{
	extract::State,
	http::{header, HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use chrono::Duration;

use apems_server_api::{LoginRequest, LoginResponse};
use apems_server_auth::{extract_session_cookie, verify_password, Portal, Role, SESSION_COOKIE_NAME};
use apems_server_db::{ActorStore, SessionStore};

use crate::api::AppState;
use crate::error::ServerError;

const BAD_CREDENTIALS: &str = "Invalid email or password.";

fn session_cookie(state: &AppState, token: &str, max_age_secs: i64) -> String {
	let mut cookie = format!(
		"{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
	);
	if state.auth_config.secure_cookies {
		cookie.push_str("; Secure");
	}
	cookie
}

/// `POST /login`
///
/// Verifies credentials, opens a session, and answers 303 to the actor's
/// portal with the session cookie set. Credential failures are reported as
/// a password-keyed validation error without revealing which part failed.
#[tracing::instrument(skip_all, fields(email = %body.email))]
pub async fn login(
	State(state): State<AppState>,
	Json(body): Json<LoginRequest>,
) -> Result<Response, ServerError> {
	let Some(actor) = state.actor_repo.get_by_email(&body.email).await? else {
		tracing::info!("login rejected: unknown email");
		return Err(ServerError::validation_field("password", BAD_CREDENTIALS));
	};

	let verified = verify_password(&actor.password_hash, &body.password)
		.map_err(|e| ServerError::Internal(format!("password verification failed: {e}")))?;
	if !verified {
		tracing::info!(actor_id = %actor.id, "login rejected: password mismatch");
		return Err(ServerError::validation_field("password", BAD_CREDENTIALS));
	}

	let ttl = Duration::hours(state.auth_config.session_ttl_hours as i64);
	let created = state.session_repo.create(&actor.id, ttl).await?;

	let portal = match actor.role {
		Role::Admin => Portal::Admin,
		Role::User => Portal::User,
	};
	let cookie = session_cookie(&state, &created.token, ttl.num_seconds());

	tracing::info!(actor_id = %actor.id, role = ?actor.role, "login succeeded");

	let body = LoginResponse {
		actor: actor.to_profile(),
		portal: portal.prefix().to_string(),
	};
	Ok((
		StatusCode::SEE_OTHER,
		[
			(header::LOCATION, portal.prefix().to_string()),
			(header::SET_COOKIE, cookie),
		],
		Json(body),
	)
		.into_response())
}

/// `POST /logout`
///
/// Deletes the session (if any), clears the cookie, and sends the caller
/// back to `/`. Always succeeds; logging out twice is not an error.
pub async fn logout(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Response, ServerError> {
	if let Some(token) = extract_session_cookie(&headers) {
		state.session_repo.delete_by_token(&token).await?;
	}

	let cleared = session_cookie(&state, "", 0);
	Ok((
		StatusCode::SEE_OTHER,
		[
			(header::LOCATION, "/".to_string()),
			(header::SET_COOKIE, cleared),
		],
	)
		.into_response())
}
