// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Session resolution and portal gating middleware.
//!
//! Authorization is two-tier:
//!
//! 1. `session_layer` resolves the session cookie into an [`AuthContext`]
//!    request extension on every request.
//! 2. `require_auth_layer` plus the [`RequirePortal`] route layer gate the
//!    portal subtrees: anonymous requests are redirected to `/`, and an
//!    authenticated actor on the wrong portal gets 403. Role eligibility is
//!    blanket; it does not depend on which record is addressed.
//!
//! Record-level ownership checks stay in the handlers, where the record's
//! attributes are known.

use axum::{
	body::Body,
	extract::State,
	http::{Request, StatusCode},
	middleware::Next,
	response::{IntoResponse, Redirect, Response},
	Json,
};
use pin_project_lite::pin_project;
use std::{
	future::Future,
	pin::Pin,
	task::{Context, Poll},
};
use tower::{Layer, Service};

use apems_server_api::ApiErrorBody;
use apems_server_auth::{extract_session_cookie, AuthContext, CurrentActor, Portal, Role};
use apems_server_db::{ActorStore, SessionStore};

use crate::api::AppState;

/// Resolve the session cookie into an [`AuthContext`] extension.
///
/// Never rejects; downstream layers decide what an anonymous request means.
pub async fn session_layer(
	State(state): State<AppState>,
	mut req: Request<Body>,
	next: Next,
) -> Response {
	// Pull the token out before awaiting; the request body must not be
	// borrowed across the store lookups.
	let token = extract_session_cookie(req.headers());
	let auth_ctx = match resolve_session(&state, token).await {
		Ok(ctx) => ctx,
		Err(e) => {
			tracing::error!(error = %e, "session resolution failed");
			AuthContext::unauthenticated()
		}
	};

	req.extensions_mut().insert(auth_ctx);
	next.run(req).await
}

async fn resolve_session(
	state: &AppState,
	token: Option<String>,
) -> Result<AuthContext, apems_server_db::DbError> {
	let Some(token) = token else {
		return Ok(AuthContext::unauthenticated());
	};

	let Some(session) = state.session_repo.find_valid_by_token(&token).await? else {
		tracing::debug!("session cookie present but no live session");
		return Ok(AuthContext::unauthenticated());
	};

	let Some(actor) = state.actor_repo.get_by_id(&session.actor_id).await? else {
		tracing::warn!(actor_id = %session.actor_id, "session references a missing actor");
		return Ok(AuthContext::unauthenticated());
	};

	Ok(AuthContext::authenticated(CurrentActor::from_session(
		actor, session.id,
	)))
}

/// Reject anonymous requests with a redirect to `/`.
///
/// This runs in front of both portals. An anonymous request is never told
/// 403; it is sent back to the login page.
pub async fn require_auth_layer(req: Request<Body>, next: Next) -> Response {
	let authenticated = req
		.extensions()
		.get::<AuthContext>()
		.map(|ctx| ctx.is_authenticated)
		.unwrap_or(false);

	if !authenticated {
		tracing::debug!(path = %req.uri().path(), "anonymous request redirected to /");
		return Redirect::to("/").into_response();
	}

	next.run(req).await
}

/// Route layer that pins a subtree to one portal.
///
/// Eligibility is by role alone: admins are excluded from the user portal
/// wholesale, and users from the admin portal.
#[derive(Clone)]
pub struct RequirePortal {
	portal: Portal,
}

impl RequirePortal {
	pub fn user() -> Self {
		Self {
			portal: Portal::User,
		}
	}

	pub fn admin() -> Self {
		Self {
			portal: Portal::Admin,
		}
	}
}

impl<S> Layer<S> for RequirePortal {
	type Service = RequirePortalService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequirePortalService {
			inner,
			portal: self.portal,
		}
	}
}

/// Service wrapper for [`RequirePortal`].
#[derive(Clone)]
pub struct RequirePortalService<S> {
	inner: S,
	portal: Portal,
}

impl<S> Service<Request<Body>> for RequirePortalService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = RequirePortalFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let auth_ctx = req
			.extensions()
			.get::<AuthContext>()
			.cloned()
			.unwrap_or_else(AuthContext::unauthenticated);

		let Some(current) = auth_ctx.actor() else {
			tracing::debug!(portal = ?self.portal, "portal check: not authenticated");
			return RequirePortalFuture::Rejected {
				resp: Some(Redirect::to("/").into_response()),
			};
		};

		let eligible = match (self.portal, current.actor.role) {
			(Portal::User, Role::User) => true,
			(Portal::Admin, Role::Admin) => true,
			_ => false,
		};

		if !eligible {
			tracing::info!(
				actor_id = %current.actor.id,
				role = ?current.actor.role,
				portal = ?self.portal,
				"portal check denied: role not eligible"
			);
			return RequirePortalFuture::Rejected {
				resp: Some(forbidden_response()),
			};
		}

		tracing::debug!(actor_id = %current.actor.id, portal = ?self.portal, "portal check passed");

		RequirePortalFuture::Inner {
			fut: self.inner.call(req),
		}
	}
}

pin_project! {
	/// Future for [`RequirePortalService`].
	#[project = RequirePortalFutureProj]
	pub enum RequirePortalFuture<F> {
		Inner { #[pin] fut: F },
		Rejected { resp: Option<Response> },
	}
}

impl<F, E> Future for RequirePortalFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			RequirePortalFutureProj::Inner { fut } => fut.poll(cx),
			RequirePortalFutureProj::Rejected { resp } => {
				Poll::Ready(Ok(resp.take().expect("polled after completion")))
			}
		}
	}
}

fn forbidden_response() -> Response {
	(
		StatusCode::FORBIDDEN,
		Json(ApiErrorBody::new("forbidden", "Insufficient permissions")),
	)
		.into_response()
}
