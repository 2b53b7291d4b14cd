// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Request validation helpers.

use apems_server_api::{CreateRecordRequest, UpdateRecordRequest, ValidationErrorBody};
use apems_server_auth::RecordKind;

use crate::error::ServerError;

pub const MAX_TITLE_LEN: usize = 512;

/// Default and maximum page sizes for listings.
pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 200;

/// Clamp pagination parameters into (page, per_page, offset).
pub fn pagination(page: Option<u32>, per_page: Option<u32>) -> (u32, u32, u32) {
	let page = page.unwrap_or(1).max(1);
	let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
	let offset = page.saturating_sub(1).saturating_mul(per_page);
	(page, per_page, offset)
}

fn check_title(errors: ValidationErrorBody, title: &str) -> ValidationErrorBody {
	let trimmed = title.trim();
	if trimmed.is_empty() {
		errors.with_field("title", "Title must not be empty.")
	} else if trimmed.len() > MAX_TITLE_LEN {
		errors.with_field("title", "Title is too long.")
	} else {
		errors
	}
}

fn check_detail(errors: ValidationErrorBody, detail: &serde_json::Value) -> ValidationErrorBody {
	if detail.is_object() || detail.is_null() {
		errors
	} else {
		errors.with_field("detail", "Detail must be a JSON object.")
	}
}

/// Validate a create request for the given kind. Only modalities may carry a
/// `project_id`; for modalities it is required.
pub fn validate_create(kind: RecordKind, req: &CreateRecordRequest) -> Result<(), ServerError> {
	let mut errors = ValidationErrorBody::new();
	errors = check_title(errors, &req.title);
	errors = check_detail(errors, &req.detail);

	match (kind, &req.project_id) {
		(RecordKind::Modality, None) => {
			errors = errors.with_field("project_id", "A modality must reference a project.");
		}
		(k, Some(_)) if k != RecordKind::Modality => {
			errors = errors.with_field(
				"project_id",
				"Only modalities may reference a project.",
			);
		}
		_ => {}
	}

	if errors.is_empty() {
		Ok(())
	} else {
		Err(ServerError::Validation(errors))
	}
}

pub fn validate_update(req: &UpdateRecordRequest) -> Result<(), ServerError> {
	let mut errors = ValidationErrorBody::new();
	errors = check_title(errors, &req.title);
	errors = check_detail(errors, &req.detail);

	if errors.is_empty() {
		Ok(())
	} else {
		Err(ServerError::Validation(errors))
	}
}
