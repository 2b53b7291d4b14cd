// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Request auth context and session-cookie extraction.
//!
//! This module provides:
//! - [`CurrentActor`] - authenticated actor context extracted from requests
//! - [`AuthContext`] - auth state for request processing
//! - Helpers for extracting the session token from the Cookie header
//!
//! # Security notes
//!
//! - Session tokens are carried in an HttpOnly cookie and never logged
//! - An absent/invalid session yields an unauthenticated context, which the
//!   route layer answers with a redirect to `/` (never a 403)

use http::header::COOKIE;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::types::SessionId;

/// Default name for the session cookie.
pub const SESSION_COOKIE_NAME: &str = "apems_session";

/// The currently authenticated actor, extracted from request context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentActor {
	/// The authenticated actor.
	pub actor: Actor,
	/// The session this request authenticated with.
	pub session_id: SessionId,
}

impl CurrentActor {
	pub fn from_session(actor: Actor, session_id: SessionId) -> Self {
		Self { actor, session_id }
	}
}

/// Authentication state for request processing.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	/// Whether the request is authenticated.
	pub is_authenticated: bool,
	/// The current actor, if authenticated.
	pub current_actor: Option<CurrentActor>,
}

impl AuthContext {
	/// Create a new unauthenticated context.
	pub fn unauthenticated() -> Self {
		Self {
			is_authenticated: false,
			current_actor: None,
		}
	}

	/// Create a new authenticated context.
	pub fn authenticated(current_actor: CurrentActor) -> Self {
		Self {
			is_authenticated: true,
			current_actor: Some(current_actor),
		}
	}

	/// Get the current actor, if authenticated.
	pub fn actor(&self) -> Option<&CurrentActor> {
		self.current_actor.as_ref()
	}

	/// Require authentication, returning the current actor or an error.
	pub fn require_actor(&self) -> Result<&CurrentActor, AuthRequired> {
		self.current_actor.as_ref().ok_or(AuthRequired)
	}
}

/// Error returned when authentication is required but not present.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequired;

impl std::fmt::Display for AuthRequired {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "authentication required")
	}
}

impl std::error::Error for AuthRequired {}

/// Extract the session token from the Cookie header.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
	extract_session_cookie_with_name(headers, SESSION_COOKIE_NAME)
}

/// Extract the session token from the Cookie header with a custom cookie name.
pub fn extract_session_cookie_with_name(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get(COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.find_map(|cookie| {
			let cookie = cookie.trim();
			let (name, value) = cookie.split_once('=')?;

			if name == cookie_name {
				Some(value.to_string())
			} else {
				None
			}
		})
}
