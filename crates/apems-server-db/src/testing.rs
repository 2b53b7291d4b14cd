// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Test utilities for database testing.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::schema::ensure_schema;

/// Create an in-memory SQLite pool with the full schema applied.
///
/// A single connection is used so every query in a test sees the same
/// in-memory database.
pub async fn create_apems_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::new()
		.filename(":memory:")
		.create_if_missing(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.expect("failed to create in-memory test pool");

	ensure_schema(&pool).await.expect("failed to apply schema");
	pool
}
