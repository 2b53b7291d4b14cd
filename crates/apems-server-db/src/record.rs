// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Record repository.
//!
//! All five record kinds live in one kind-discriminated table; the domain
//! payload is an opaque JSON column. The archive transition is a
//! compare-and-set UPDATE guarded on `state = 'active'`, so under
//! concurrent archive attempts exactly one caller observes the
//! false→true transition and every other caller gets a deterministic
//! [`ArchiveOutcome::AlreadyArchived`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, Row};

use apems_server_auth::{ActorId, CampusCollegeId, RecordAttrs, RecordId, RecordKind, RecordState};

use crate::actor::parse_timestamp;
use crate::error::DbError;

/// A record of any kind.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Record {
	pub id: RecordId,
	pub kind: RecordKind,
	pub owner_id: ActorId,
	pub campus_college_id: CampusCollegeId,
	pub title: String,
	pub detail: serde_json::Value,
	/// Referenced project; set only for modalities.
	pub project_id: Option<RecordId>,
	pub state: RecordState,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Record {
	/// The attributes the access policy evaluates.
	pub fn attrs(&self) -> RecordAttrs {
		RecordAttrs::new(self.id, self.kind, self.owner_id)
			.with_campus_college(self.campus_college_id)
			.with_state(self.state)
	}
}

/// Fields needed to create a record.
#[derive(Debug, Clone)]
pub struct NewRecord {
	pub kind: RecordKind,
	pub owner_id: ActorId,
	pub campus_college_id: CampusCollegeId,
	pub title: String,
	pub detail: serde_json::Value,
	pub project_id: Option<RecordId>,
}

/// Editable fields of a record.
#[derive(Debug, Clone)]
pub struct RecordUpdate {
	pub title: String,
	pub detail: serde_json::Value,
}

/// Reference from a modality to its project, as rendered in listings.
///
/// When the project has been archived the id and title are withheld so the
/// listing cannot link through; only `available: false` remains.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProjectRef {
	pub id: Option<RecordId>,
	pub title: Option<String>,
	pub available: bool,
}

/// Listing row for a record.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordSummary {
	pub id: RecordId,
	pub kind: RecordKind,
	pub owner_id: ActorId,
	pub campus_college_id: CampusCollegeId,
	pub title: String,
	pub state: RecordState,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub project: Option<ProjectRef>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Result of a compare-and-set archive attempt.
#[derive(Debug, Clone)]
pub enum ArchiveOutcome {
	/// This caller observed the active→archived transition.
	Archived(Record),
	/// The record was already archived before this attempt.
	AlreadyArchived,
	/// No record with that id exists.
	NotFound,
}

/// Result of an update attempt against an active record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
	Updated,
	/// The record exists but is archived (terminal, not editable).
	Archived,
	NotFound,
}

/// Trait for record database operations.
#[async_trait]
pub trait RecordStore: Send + Sync {
	async fn insert(&self, new_record: &NewRecord) -> Result<Record, DbError>;

	async fn get(&self, id: &RecordId) -> Result<Option<Record>, DbError>;

	/// Update title/detail of an active record. Archived records are
	/// terminal and refuse edits.
	async fn update(&self, id: &RecordId, update: &RecordUpdate) -> Result<UpdateOutcome, DbError>;

	/// Compare-and-set archive: `UPDATE ... WHERE id = ? AND state = 'active'`.
	async fn archive(&self, id: &RecordId) -> Result<ArchiveOutcome, DbError>;

	/// Owner-scoped active listing for the user portal.
	async fn list_for_owner(
		&self,
		owner_id: &ActorId,
		kind: RecordKind,
		limit: u32,
		offset: u32,
	) -> Result<Vec<RecordSummary>, DbError>;

	async fn count_for_owner(&self, owner_id: &ActorId, kind: RecordKind) -> Result<u64, DbError>;

	/// Admin listing across owners, optionally campus-college filtered and
	/// optionally including archived records.
	async fn list_all(
		&self,
		kind: RecordKind,
		campus_college: Option<&CampusCollegeId>,
		include_archived: bool,
		limit: u32,
		offset: u32,
	) -> Result<Vec<RecordSummary>, DbError>;

	async fn count_all(
		&self,
		kind: RecordKind,
		campus_college: Option<&CampusCollegeId>,
		include_archived: bool,
	) -> Result<u64, DbError>;
}

/// SQLite implementation of [`RecordStore`].
#[derive(Clone)]
pub struct RecordRepository {
	pool: SqlitePool,
}

impl RecordRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Record, DbError> {
	let id: String = row.get("id");
	let kind: String = row.get("kind");
	let owner_id: String = row.get("owner_id");
	let campus_college_id: String = row.get("campus_college_id");
	let detail: String = row.get("detail");
	let project_id: Option<String> = row.get("project_id");
	let state: String = row.get("state");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Record {
		id: RecordId::parse(&id).map_err(|e| DbError::Internal(format!("bad record id: {e}")))?,
		kind: RecordKind::parse(&kind)
			.ok_or_else(|| DbError::Internal(format!("unknown record kind: {kind}")))?,
		owner_id: ActorId::parse(&owner_id)
			.map_err(|e| DbError::Internal(format!("bad owner id: {e}")))?,
		campus_college_id: CampusCollegeId::parse(&campus_college_id)
			.map_err(|e| DbError::Internal(format!("bad campus_college id: {e}")))?,
		title: row.get("title"),
		detail: serde_json::from_str(&detail)?,
		project_id: project_id
			.map(|p| RecordId::parse(&p))
			.transpose()
			.map_err(|e| DbError::Internal(format!("bad project id: {e}")))?,
		state: RecordState::parse(&state)
			.ok_or_else(|| DbError::Internal(format!("unknown record state: {state}")))?,
		created_at: parse_timestamp(&created_at)?,
		updated_at: parse_timestamp(&updated_at)?,
	})
}

fn summary_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<RecordSummary, DbError> {
	let id: String = row.get("id");
	let kind: String = row.get("kind");
	let owner_id: String = row.get("owner_id");
	let campus_college_id: String = row.get("campus_college_id");
	let state: String = row.get("state");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	let project_id: Option<String> = row.get("ref_project_id");
	let project = match project_id {
		Some(pid) => {
			let project_state: Option<String> = row.get("ref_project_state");
			let archived = project_state.as_deref() == Some("archived");
			if archived {
				// Withhold the link target so the listing renders
				// "unavailable" instead of linking through.
				Some(ProjectRef {
					id: None,
					title: None,
					available: false,
				})
			} else {
				let title: Option<String> = row.get("ref_project_title");
				Some(ProjectRef {
					id: Some(
						RecordId::parse(&pid)
							.map_err(|e| DbError::Internal(format!("bad project id: {e}")))?,
					),
					title,
					available: true,
				})
			}
		}
		None => None,
	};

	Ok(RecordSummary {
		id: RecordId::parse(&id).map_err(|e| DbError::Internal(format!("bad record id: {e}")))?,
		kind: RecordKind::parse(&kind)
			.ok_or_else(|| DbError::Internal(format!("unknown record kind: {kind}")))?,
		owner_id: ActorId::parse(&owner_id)
			.map_err(|e| DbError::Internal(format!("bad owner id: {e}")))?,
		campus_college_id: CampusCollegeId::parse(&campus_college_id)
			.map_err(|e| DbError::Internal(format!("bad campus_college id: {e}")))?,
		title: row.get("title"),
		state: RecordState::parse(&state)
			.ok_or_else(|| DbError::Internal(format!("unknown record state: {state}")))?,
		project,
		created_at: parse_timestamp(&created_at)?,
		updated_at: parse_timestamp(&updated_at)?,
	})
}

const SUMMARY_SELECT: &str = r#"
	SELECT
		r.id, r.kind, r.owner_id, r.campus_college_id, r.title, r.state,
		r.created_at, r.updated_at,
		r.project_id AS ref_project_id,
		p.title AS ref_project_title,
		p.state AS ref_project_state
	FROM records r
	LEFT JOIN records p ON p.id = r.project_id
"#;

#[async_trait]
impl RecordStore for RecordRepository {
	#[tracing::instrument(skip(self, new_record), fields(kind = %new_record.kind, owner_id = %new_record.owner_id))]
	async fn insert(&self, new_record: &NewRecord) -> Result<Record, DbError> {
		let now = Utc::now();
		let record = Record {
			id: RecordId::generate(),
			kind: new_record.kind,
			owner_id: new_record.owner_id,
			campus_college_id: new_record.campus_college_id,
			title: new_record.title.clone(),
			detail: new_record.detail.clone(),
			project_id: new_record.project_id,
			state: RecordState::Active,
			created_at: now,
			updated_at: now,
		};

		sqlx::query(
			r#"
			INSERT INTO records (
				id, kind, owner_id, campus_college_id, title, detail,
				project_id, state, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(record.id.to_string())
		.bind(record.kind.as_str())
		.bind(record.owner_id.to_string())
		.bind(record.campus_college_id.to_string())
		.bind(&record.title)
		.bind(serde_json::to_string(&record.detail)?)
		.bind(record.project_id.map(|p| p.to_string()))
		.bind(record.state.as_str())
		.bind(record.created_at.to_rfc3339())
		.bind(record.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(record_id = %record.id, "record inserted");
		Ok(record)
	}

	async fn get(&self, id: &RecordId) -> Result<Option<Record>, DbError> {
		let row = sqlx::query("SELECT * FROM records WHERE id = ?")
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.as_ref().map(record_from_row).transpose()
	}

	async fn update(&self, id: &RecordId, update: &RecordUpdate) -> Result<UpdateOutcome, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE records
			SET title = ?, detail = ?, updated_at = ?
			WHERE id = ? AND state = 'active'
			"#,
		)
		.bind(&update.title)
		.bind(serde_json::to_string(&update.detail)?)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() > 0 {
			return Ok(UpdateOutcome::Updated);
		}

		// Zero rows: the record is either missing or archived.
		match self.get(id).await? {
			Some(record) if record.state.is_archived() => Ok(UpdateOutcome::Archived),
			Some(_) => Err(DbError::Internal(format!(
				"active record {id} refused update"
			))),
			None => Ok(UpdateOutcome::NotFound),
		}
	}

	#[tracing::instrument(skip(self))]
	async fn archive(&self, id: &RecordId) -> Result<ArchiveOutcome, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE records
			SET state = 'archived', updated_at = ?
			WHERE id = ? AND state = 'active'
			"#,
		)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() > 0 {
			let record = self.get(id).await?.ok_or_else(|| {
				DbError::Internal(format!("record {id} vanished after archive"))
			})?;
			tracing::info!(record_id = %id, kind = %record.kind, "record archived");
			return Ok(ArchiveOutcome::Archived(record));
		}

		// Zero rows: classify deterministically. A concurrent winner
		// leaves the record in the archived state; a bad id leaves
		// nothing.
		match self.get(id).await? {
			Some(record) if record.state.is_archived() => Ok(ArchiveOutcome::AlreadyArchived),
			Some(_) => Err(DbError::Conflict(format!(
				"record {id} active but CAS archive affected no rows"
			))),
			None => Ok(ArchiveOutcome::NotFound),
		}
	}

	async fn list_for_owner(
		&self,
		owner_id: &ActorId,
		kind: RecordKind,
		limit: u32,
		offset: u32,
	) -> Result<Vec<RecordSummary>, DbError> {
		let sql = format!(
			"{SUMMARY_SELECT} WHERE r.owner_id = ? AND r.kind = ? AND r.state = 'active' \
			 ORDER BY r.created_at DESC LIMIT ? OFFSET ?"
		);
		let rows = sqlx::query(&sql)
			.bind(owner_id.to_string())
			.bind(kind.as_str())
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?;

		rows.iter().map(summary_from_row).collect()
	}

	async fn count_for_owner(&self, owner_id: &ActorId, kind: RecordKind) -> Result<u64, DbError> {
		let row = sqlx::query(
			"SELECT COUNT(*) as cnt FROM records \
			 WHERE owner_id = ? AND kind = ? AND state = 'active'",
		)
		.bind(owner_id.to_string())
		.bind(kind.as_str())
		.fetch_one(&self.pool)
		.await?;

		let count: i64 = row.get("cnt");
		Ok(count as u64)
	}

	async fn list_all(
		&self,
		kind: RecordKind,
		campus_college: Option<&CampusCollegeId>,
		include_archived: bool,
		limit: u32,
		offset: u32,
	) -> Result<Vec<RecordSummary>, DbError> {
		let mut conditions = vec!["r.kind = ?".to_string()];
		if campus_college.is_some() {
			conditions.push("r.campus_college_id = ?".to_string());
		}
		if !include_archived {
			conditions.push("r.state = 'active'".to_string());
		}
		let sql = format!(
			"{SUMMARY_SELECT} WHERE {} ORDER BY r.created_at DESC LIMIT ? OFFSET ?",
			conditions.join(" AND ")
		);

		let mut query = sqlx::query(&sql).bind(kind.as_str());
		if let Some(cc) = campus_college {
			query = query.bind(cc.to_string());
		}
		let rows = query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

		rows.iter().map(summary_from_row).collect()
	}

	async fn count_all(
		&self,
		kind: RecordKind,
		campus_college: Option<&CampusCollegeId>,
		include_archived: bool,
	) -> Result<u64, DbError> {
		let mut conditions = vec!["kind = ?".to_string()];
		if campus_college.is_some() {
			conditions.push("campus_college_id = ?".to_string());
		}
		if !include_archived {
			conditions.push("state = 'active'".to_string());
		}
		let sql = format!(
			"SELECT COUNT(*) as cnt FROM records WHERE {}",
			conditions.join(" AND ")
		);

		let mut query = sqlx::query(&sql).bind(kind.as_str());
		if let Some(cc) = campus_college {
			query = query.bind(cc.to_string());
		}
		let row = query.fetch_one(&self.pool).await?;

		let count: i64 = row.get("cnt");
		Ok(count as u64)
	}
}
