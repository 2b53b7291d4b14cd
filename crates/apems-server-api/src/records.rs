// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use apems_server_auth::{ActorId, CampusCollegeId, RecordId, RecordKind, RecordState};
use apems_server_db::{ProjectRef, Record, RecordSummary};

/// Request body for creating a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordRequest {
	pub title: String,
	/// Kind-specific payload; stored opaquely.
	#[serde(default)]
	pub detail: serde_json::Value,
	/// For modalities only: the project this modality belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project_id: Option<RecordId>,
}

/// Request body for updating a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
	pub title: String,
	#[serde(default)]
	pub detail: serde_json::Value,
}

/// Request body for archiving a record. The password re-confirmation is
/// required for every archive, no exceptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecordRequest {
	#[serde(default)]
	pub password: Option<String>,
}

/// A full record in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
	pub id: RecordId,
	pub kind: RecordKind,
	pub owner_id: ActorId,
	pub campus_college_id: CampusCollegeId,
	pub title: String,
	pub detail: serde_json::Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project_id: Option<RecordId>,
	pub state: RecordState,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Record> for RecordResponse {
	fn from(r: Record) -> Self {
		Self {
			id: r.id,
			kind: r.kind,
			owner_id: r.owner_id,
			campus_college_id: r.campus_college_id,
			title: r.title,
			detail: r.detail,
			project_id: r.project_id,
			state: r.state,
			created_at: r.created_at,
			updated_at: r.updated_at,
		}
	}
}

/// A listing row in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummaryResponse {
	pub id: RecordId,
	pub kind: RecordKind,
	pub owner_id: ActorId,
	pub campus_college_id: CampusCollegeId,
	pub title: String,
	pub state: RecordState,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project: Option<ProjectRefResponse>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Modality-to-project reference in listings. When the project is archived
/// the id and title are absent and `available` is false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRefResponse {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<RecordId>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	pub available: bool,
}

impl From<ProjectRef> for ProjectRefResponse {
	fn from(p: ProjectRef) -> Self {
		Self {
			id: p.id,
			title: p.title,
			available: p.available,
		}
	}
}

impl From<RecordSummary> for RecordSummaryResponse {
	fn from(s: RecordSummary) -> Self {
		Self {
			id: s.id,
			kind: s.kind,
			owner_id: s.owner_id,
			campus_college_id: s.campus_college_id,
			title: s.title,
			state: s.state,
			project: s.project.map(ProjectRefResponse::from),
			created_at: s.created_at,
			updated_at: s.updated_at,
		}
	}
}

/// Query parameters for record listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecordsParams {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub per_page: Option<u32>,
	/// Admin listings only: restrict to one campus-college.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub campus_college_id: Option<CampusCollegeId>,
	/// Admin listings only: include archived records.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub include_archived: Option<bool>,
}

/// Response for record listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecordsResponse {
	pub records: Vec<RecordSummaryResponse>,
	pub total: u64,
	pub page: u32,
	pub per_page: u32,
}
