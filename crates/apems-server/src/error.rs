// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Server error type and its HTTP mapping.
//!
//! The one rule that must never regress: an unauthenticated request is
//! answered with a redirect to `/`, never with 403. Forbidden is reserved
//! for authenticated actors who fail the access policy.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Redirect, Response},
	Json,
};
use thiserror::Error;

use apems_server_api::{ApiErrorBody, ValidationErrorBody};
use apems_server_db::DbError;

#[derive(Debug, Error)]
pub enum ServerError {
	#[error("authentication required")]
	Unauthenticated,

	#[error("forbidden: {0}")]
	Forbidden(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("validation failed")]
	Validation(ValidationErrorBody),

	#[error("conflict: {0}")]
	Conflict(String),

	#[error("database error: {0}")]
	Database(#[from] DbError),

	#[error("internal error: {0}")]
	Internal(String),
}

impl ServerError {
	pub fn forbidden(message: impl Into<String>) -> Self {
		Self::Forbidden(message.into())
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound(message.into())
	}

	pub fn conflict(message: impl Into<String>) -> Self {
		Self::Conflict(message.into())
	}

	/// Single-field validation failure, the common case.
	pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation(ValidationErrorBody::new().with_field(field, message))
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		match self {
			ServerError::Unauthenticated => Redirect::to("/").into_response(),
			ServerError::Forbidden(message) => (
				StatusCode::FORBIDDEN,
				Json(ApiErrorBody::new("forbidden", message)),
			)
				.into_response(),
			ServerError::NotFound(message) => (
				StatusCode::NOT_FOUND,
				Json(ApiErrorBody::new("not_found", message)),
			)
				.into_response(),
			ServerError::Validation(body) => {
				(StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
			}
			ServerError::Conflict(message) => (
				StatusCode::CONFLICT,
				Json(ApiErrorBody::new("conflict", message)),
			)
				.into_response(),
			ServerError::Database(e) => {
				tracing::error!(error = %e, "database error while handling request");
				internal_error_response()
			}
			ServerError::Internal(message) => {
				tracing::error!(message, "internal error while handling request");
				internal_error_response()
			}
		}
	}
}

fn internal_error_response() -> Response {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		Json(ApiErrorBody::new("internal", "Internal server error")),
	)
		.into_response()
}
