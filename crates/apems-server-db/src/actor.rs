// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Actor repository.
//!
//! Account provisioning is out of scope for the portals; `insert` exists
//! for seeding and tests. The login flow reads by email, everything else
//! reads by id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, Row};

use apems_server_auth::{Actor, ActorId, CampusCollegeId, Role};

use crate::error::DbError;

/// Fields needed to provision an actor.
#[derive(Debug, Clone)]
pub struct NewActor {
	pub display_name: String,
	pub email: String,
	pub password_hash: String,
	pub role: Role,
	pub campus_college_id: CampusCollegeId,
}

/// Trait for actor database operations.
#[async_trait]
pub trait ActorStore: Send + Sync {
	async fn insert(&self, new_actor: &NewActor) -> Result<Actor, DbError>;
	async fn get_by_id(&self, id: &ActorId) -> Result<Option<Actor>, DbError>;
	async fn get_by_email(&self, email: &str) -> Result<Option<Actor>, DbError>;
}

/// SQLite implementation of [`ActorStore`].
#[derive(Clone)]
pub struct ActorRepository {
	pool: SqlitePool,
}

impl ActorRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

fn actor_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Actor, DbError> {
	let id: String = row.get("id");
	let role: String = row.get("role");
	let campus_college_id: String = row.get("campus_college_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Actor {
		id: ActorId::parse(&id).map_err(|e| DbError::Internal(format!("bad actor id: {e}")))?,
		display_name: row.get("display_name"),
		email: row.get("email"),
		password_hash: row.get("password_hash"),
		role: Role::parse(&role)
			.ok_or_else(|| DbError::Internal(format!("unknown role: {role}")))?,
		campus_college_id: CampusCollegeId::parse(&campus_college_id)
			.map_err(|e| DbError::Internal(format!("bad campus_college id: {e}")))?,
		created_at: parse_timestamp(&created_at)?,
		updated_at: parse_timestamp(&updated_at)?,
	})
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(s)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("bad timestamp {s:?}: {e}")))
}

#[async_trait]
impl ActorStore for ActorRepository {
	#[tracing::instrument(skip(self, new_actor), fields(email = %new_actor.email))]
	async fn insert(&self, new_actor: &NewActor) -> Result<Actor, DbError> {
		let actor = Actor {
			id: ActorId::generate(),
			display_name: new_actor.display_name.clone(),
			email: new_actor.email.clone(),
			password_hash: new_actor.password_hash.clone(),
			role: new_actor.role,
			campus_college_id: new_actor.campus_college_id,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		};

		sqlx::query(
			r#"
			INSERT INTO actors (
				id, display_name, email, password_hash, role,
				campus_college_id, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(actor.id.to_string())
		.bind(&actor.display_name)
		.bind(&actor.email)
		.bind(&actor.password_hash)
		.bind(actor.role.as_str())
		.bind(actor.campus_college_id.to_string())
		.bind(actor.created_at.to_rfc3339())
		.bind(actor.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(actor_id = %actor.id, "actor inserted");
		Ok(actor)
	}

	async fn get_by_id(&self, id: &ActorId) -> Result<Option<Actor>, DbError> {
		let row = sqlx::query("SELECT * FROM actors WHERE id = ?")
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.as_ref().map(actor_from_row).transpose()
	}

	async fn get_by_email(&self, email: &str) -> Result<Option<Actor>, DbError> {
		let row = sqlx::query("SELECT * FROM actors WHERE email = ?")
			.bind(email)
			.fetch_optional(&self.pool)
			.await?;

		row.as_ref().map(actor_from_row).transpose()
	}
}
