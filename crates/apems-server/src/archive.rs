// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! The archive transition guard.
//!
//! Archiving is the only destructive-looking operation in the system, so it
//! is gated twice: the caller must pass the ownership policy for the record,
//! and must re-confirm their own password in the same request. The state
//! transition itself is a compare-and-set in the record store, so two
//! racing archives resolve to one winner and one `AlreadyArchived`.
//!
//! Guard order is fixed: existence, then policy, then password, then CAS.
//! A wrong password therefore leaves the record untouched, and a non-owner
//! never learns whether their password was right.

use chrono::Utc;

use apems_server_auth::{verify_password, Actor, ActorAttrs, Portal, RecordId, RecordKind};
use apems_server_db::{ArchiveAuditEntry, ArchiveOutcome, AuditStore, Record, RecordStore};

use crate::error::ServerError;

const PASSWORD_REQUIRED: &str = "Password is required to archive a record.";
const PASSWORD_INVALID: &str = "Password is incorrect.";

/// Run the full archive guard for `record_id` on behalf of `actor`.
///
/// Returns the archived record on the winning transition.
#[tracing::instrument(skip_all, fields(record_id = %record_id, actor_id = %actor.id, portal = ?portal))]
pub async fn archive_record(
	records: &dyn RecordStore,
	audit: &dyn AuditStore,
	actor: &Actor,
	portal: Portal,
	kind: RecordKind,
	record_id: &RecordId,
	password: Option<&str>,
) -> Result<Record, ServerError> {
	let Some(record) = records.get(record_id).await? else {
		return Err(ServerError::not_found("record not found"));
	};
	// A record addressed under the wrong kind slug does not exist as far
	// as the caller is concerned.
	if record.kind != kind {
		return Err(ServerError::not_found("record not found"));
	}

	let actor_attrs = ActorAttrs::from(actor);
	if !apems_server_auth::can_access(&actor_attrs, portal, &record.attrs()) {
		tracing::info!("archive denied by access policy");
		return Err(ServerError::forbidden("Insufficient permissions"));
	}

	// Whitespace-only counts as missing; the form field was not really
	// filled in.
	let password = password.map(str::trim).filter(|p| !p.is_empty());
	let Some(password) = password else {
		return Err(ServerError::validation_field("password", PASSWORD_REQUIRED));
	};

	let verified = verify_password(&actor.password_hash, password)
		.map_err(|e| ServerError::Internal(format!("password verification failed: {e}")))?;
	if !verified {
		tracing::info!("archive denied: password mismatch");
		return Err(ServerError::validation_field("password", PASSWORD_INVALID));
	}

	match records.archive(record_id).await? {
		ArchiveOutcome::Archived(archived) => {
			audit
				.append(&ArchiveAuditEntry {
					record_id: archived.id,
					record_kind: archived.kind,
					actor_id: actor.id,
					occurred_at: Utc::now(),
				})
				.await?;
			tracing::info!(kind = %archived.kind, "record archived");
			Ok(archived)
		}
		ArchiveOutcome::AlreadyArchived => {
			Err(ServerError::conflict("Record is already archived"))
		}
		ArchiveOutcome::NotFound => Err(ServerError::not_found("record not found")),
	}
}
