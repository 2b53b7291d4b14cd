// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Session repository.
//!
//! Bearer tokens are random 32-byte values handed to the browser as a
//! cookie; only the SHA-256 hash of a token is stored, so a leaked
//! database never yields usable sessions.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::{sqlite::SqlitePool, Row};

use apems_server_auth::{ActorId, SessionId};

use crate::actor::parse_timestamp;
use crate::error::DbError;

/// A stored session. The plaintext token never touches this struct.
#[derive(Debug, Clone)]
pub struct Session {
	pub id: SessionId,
	pub actor_id: ActorId,
	pub token_hash: String,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
}

impl Session {
	pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
		self.expires_at <= now
	}
}

/// A freshly created session along with its plaintext token.
///
/// The token exists only in this value; hand it to the client and drop it.
#[derive(Debug)]
pub struct CreatedSession {
	pub session: Session,
	pub token: String,
}

fn hash_token(token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

fn generate_token() -> String {
	let mut bytes = [0u8; 32];
	rand::thread_rng().fill_bytes(&mut bytes);
	hex::encode(bytes)
}

/// Trait for session database operations.
#[async_trait]
pub trait SessionStore: Send + Sync {
	/// Create a session for an actor with the given time-to-live.
	async fn create(&self, actor_id: &ActorId, ttl: Duration) -> Result<CreatedSession, DbError>;

	/// Look up a live session by its plaintext token. Expired sessions are
	/// treated as absent.
	async fn find_valid_by_token(&self, token: &str) -> Result<Option<Session>, DbError>;

	/// Delete the session belonging to a plaintext token, if any.
	async fn delete_by_token(&self, token: &str) -> Result<(), DbError>;

	/// Remove all expired sessions. Returns the number deleted.
	async fn purge_expired(&self) -> Result<u64, DbError>;
}

/// SQLite implementation of [`SessionStore`].
#[derive(Clone)]
pub struct SessionRepository {
	pool: SqlitePool,
}

impl SessionRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

fn session_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Session, DbError> {
	let id: String = row.get("id");
	let actor_id: String = row.get("actor_id");
	let created_at: String = row.get("created_at");
	let expires_at: String = row.get("expires_at");

	Ok(Session {
		id: SessionId::parse(&id).map_err(|e| DbError::Internal(format!("bad session id: {e}")))?,
		actor_id: ActorId::parse(&actor_id)
			.map_err(|e| DbError::Internal(format!("bad actor id: {e}")))?,
		token_hash: row.get("token_hash"),
		created_at: parse_timestamp(&created_at)?,
		expires_at: parse_timestamp(&expires_at)?,
	})
}

#[async_trait]
impl SessionStore for SessionRepository {
	#[tracing::instrument(skip(self))]
	async fn create(&self, actor_id: &ActorId, ttl: Duration) -> Result<CreatedSession, DbError> {
		let now = Utc::now();
		let token = generate_token();
		let session = Session {
			id: SessionId::generate(),
			actor_id: *actor_id,
			token_hash: hash_token(&token),
			created_at: now,
			expires_at: now + ttl,
		};

		sqlx::query(
			r#"
			INSERT INTO sessions (id, actor_id, token_hash, created_at, expires_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(session.id.to_string())
		.bind(session.actor_id.to_string())
		.bind(&session.token_hash)
		.bind(session.created_at.to_rfc3339())
		.bind(session.expires_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(session_id = %session.id, "session created");
		Ok(CreatedSession { session, token })
	}

	async fn find_valid_by_token(&self, token: &str) -> Result<Option<Session>, DbError> {
		let row = sqlx::query("SELECT * FROM sessions WHERE token_hash = ?")
			.bind(hash_token(token))
			.fetch_optional(&self.pool)
			.await?;

		let session = match row.as_ref().map(session_from_row).transpose()? {
			Some(s) => s,
			None => return Ok(None),
		};

		if session.is_expired(Utc::now()) {
			return Ok(None);
		}
		Ok(Some(session))
	}

	async fn delete_by_token(&self, token: &str) -> Result<(), DbError> {
		sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
			.bind(hash_token(token))
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn purge_expired(&self) -> Result<u64, DbError> {
		let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
			.bind(Utc::now().to_rfc3339())
			.execute(&self.pool)
			.await?;
		Ok(result.rows_affected())
	}
}
