// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use apems_server_auth::{ActorId, RecordId, RecordKind};
use apems_server_db::ArchiveAuditEntry;

/// One archive event in the admin audit listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntryResponse {
	pub record_id: RecordId,
	pub record_kind: RecordKind,
	pub actor_id: ActorId,
	pub occurred_at: DateTime<Utc>,
}

impl From<ArchiveAuditEntry> for AuditEntryResponse {
	fn from(e: ArchiveAuditEntry) -> Self {
		Self {
			record_id: e.record_id,
			record_kind: e.record_kind,
			actor_id: e.actor_id,
			occurred_at: e.occurred_at,
		}
	}
}

/// Query parameters for the audit listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAuditParams {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub per_page: Option<u32>,
}

/// Response for the audit listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAuditResponse {
	pub entries: Vec<AuditEntryResponse>,
	pub total: u64,
	pub page: u32,
	pub per_page: u32,
}
