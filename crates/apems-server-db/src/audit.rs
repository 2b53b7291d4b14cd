// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Archive audit trail.
//!
//! Append-only: one row per successful archive transition, written by the
//! caller that won the compare-and-set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use apems_server_auth::{ActorId, RecordId, RecordKind};

use crate::actor::parse_timestamp;
use crate::error::DbError;

/// One archive event.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArchiveAuditEntry {
	pub record_id: RecordId,
	pub record_kind: RecordKind,
	pub actor_id: ActorId,
	pub occurred_at: DateTime<Utc>,
}

/// Trait for audit database operations.
#[async_trait]
pub trait AuditStore: Send + Sync {
	async fn append(&self, entry: &ArchiveAuditEntry) -> Result<(), DbError>;

	/// Newest-first page of archive events, with the total event count.
	async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<ArchiveAuditEntry>, u64), DbError>;
}

/// SQLite implementation of [`AuditStore`].
#[derive(Clone)]
pub struct AuditRepository {
	pool: SqlitePool,
}

impl AuditRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ArchiveAuditEntry, DbError> {
	let record_id: String = row.get("record_id");
	let record_kind: String = row.get("record_kind");
	let actor_id: String = row.get("actor_id");
	let occurred_at: String = row.get("occurred_at");

	Ok(ArchiveAuditEntry {
		record_id: RecordId::parse(&record_id)
			.map_err(|e| DbError::Internal(format!("bad record id: {e}")))?,
		record_kind: RecordKind::parse(&record_kind)
			.ok_or_else(|| DbError::Internal(format!("unknown record kind: {record_kind}")))?,
		actor_id: ActorId::parse(&actor_id)
			.map_err(|e| DbError::Internal(format!("bad actor id: {e}")))?,
		occurred_at: parse_timestamp(&occurred_at)?,
	})
}

#[async_trait]
impl AuditStore for AuditRepository {
	#[tracing::instrument(skip(self, entry), fields(record_id = %entry.record_id, actor_id = %entry.actor_id))]
	async fn append(&self, entry: &ArchiveAuditEntry) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO archive_audit (id, record_id, record_kind, actor_id, occurred_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(Uuid::new_v4().to_string())
		.bind(entry.record_id.to_string())
		.bind(entry.record_kind.as_str())
		.bind(entry.actor_id.to_string())
		.bind(entry.occurred_at.to_rfc3339())
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<ArchiveAuditEntry>, u64), DbError> {
		let rows = sqlx::query(
			"SELECT record_id, record_kind, actor_id, occurred_at FROM archive_audit \
			 ORDER BY occurred_at DESC LIMIT ? OFFSET ?",
		)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.pool)
		.await?;

		let entries = rows
			.iter()
			.map(entry_from_row)
			.collect::<Result<Vec<_>, _>>()?;

		let row = sqlx::query("SELECT COUNT(*) as cnt FROM archive_audit")
			.fetch_one(&self.pool)
			.await?;
		let total: i64 = row.get("cnt");

		Ok((entries, total as u64))
	}
}
