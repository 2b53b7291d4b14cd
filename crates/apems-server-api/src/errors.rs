// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generic `{error, message}` body used by non-validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
	pub error: String,
	pub message: String,
}

impl ApiErrorBody {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}
}

/// Field-keyed validation failure body.
///
/// Archive password failures use this shape with the message keyed under
/// `password`, so form frontends can render the error next to the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorBody {
	pub error: String,
	pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorBody {
	pub fn new() -> Self {
		Self {
			error: "validation_failed".to_string(),
			errors: BTreeMap::new(),
		}
	}

	pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
		self.errors
			.entry(field.into())
			.or_default()
			.push(message.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}
}

impl Default for ValidationErrorBody {
	fn default() -> Self {
		Self::new()
	}
}
