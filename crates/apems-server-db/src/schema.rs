// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Schema bootstrap.
//!
//! The server ensures its tables exist at startup; statements are
//! idempotent so repeated boots are safe.

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

/// Create all APEMS tables and indexes if they do not exist.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS actors (
			id TEXT PRIMARY KEY,
			display_name TEXT NOT NULL,
			email TEXT NOT NULL UNIQUE,
			password_hash TEXT NOT NULL,
			role TEXT NOT NULL CHECK (role IN ('admin', 'user')),
			campus_college_id TEXT NOT NULL,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS records (
			id TEXT PRIMARY KEY,
			kind TEXT NOT NULL CHECK (kind IN (
				'award', 'international_partner', 'modality',
				'impact_assessment', 'project'
			)),
			owner_id TEXT NOT NULL REFERENCES actors(id),
			campus_college_id TEXT NOT NULL,
			title TEXT NOT NULL,
			detail TEXT NOT NULL,
			project_id TEXT REFERENCES records(id),
			state TEXT NOT NULL DEFAULT 'active' CHECK (state IN ('active', 'archived')),
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_records_owner ON records(owner_id, kind, state)",
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS sessions (
			id TEXT PRIMARY KEY,
			actor_id TEXT NOT NULL REFERENCES actors(id) ON DELETE CASCADE,
			token_hash TEXT NOT NULL,
			created_at TEXT NOT NULL,
			expires_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_token_hash ON sessions(token_hash)")
		.execute(pool)
		.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS archive_audit (
			id TEXT PRIMARY KEY,
			record_id TEXT NOT NULL,
			record_kind TEXT NOT NULL,
			actor_id TEXT NOT NULL,
			occurred_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	tracing::debug!("schema ensured");
	Ok(())
}
