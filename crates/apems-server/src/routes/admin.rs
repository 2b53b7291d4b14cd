// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Admin-portal handlers: read-side oversight across all owners.
//!
//! Admin access is not scoped to ownership; the campus-college filter is a
//! listing convenience, not a permission boundary.

use axum::{
	extract::{Path, Query, State},
	Extension, Json,
};

use apems_server_api::{
	AuditEntryResponse, ListAuditParams, ListAuditResponse, ListRecordsParams, ListRecordsResponse,
	RecordResponse, RecordSummaryResponse,
};
use apems_server_auth::{can_access, ActorAttrs, AuthContext, Portal, RecordId, RecordKind};
use apems_server_db::{AuditStore, RecordStore};

use crate::api::AppState;
use crate::error::ServerError;
use crate::validation::pagination;

fn resolve_kind(slug: &str) -> Result<RecordKind, ServerError> {
	RecordKind::from_slug(slug).ok_or_else(|| ServerError::not_found("unknown record kind"))
}

/// `GET /admin/{kind}` - listing across owners.
pub async fn list_records(
	State(state): State<AppState>,
	Path(kind): Path<String>,
	Query(params): Query<ListRecordsParams>,
) -> Result<Json<ListRecordsResponse>, ServerError> {
	let kind = resolve_kind(&kind)?;
	let (page, per_page, offset) = pagination(params.page, params.per_page);
	let include_archived = params.include_archived.unwrap_or(false);

	let records = state
		.record_repo
		.list_all(
			kind,
			params.campus_college_id.as_ref(),
			include_archived,
			per_page,
			offset,
		)
		.await?;
	let total = state
		.record_repo
		.count_all(kind, params.campus_college_id.as_ref(), include_archived)
		.await?;

	Ok(Json(ListRecordsResponse {
		records: records.into_iter().map(RecordSummaryResponse::from).collect(),
		total,
		page,
		per_page,
	}))
}

/// `GET /admin/{kind}/{id}` - detail view of any record.
pub async fn get_record(
	State(state): State<AppState>,
	Extension(ctx): Extension<AuthContext>,
	Path((kind, id)): Path<(String, String)>,
) -> Result<Json<RecordResponse>, ServerError> {
	let kind = resolve_kind(&kind)?;
	let id = RecordId::parse(&id).map_err(|_| ServerError::not_found("record not found"))?;
	let current = ctx
		.require_actor()
		.map_err(|_| ServerError::Unauthenticated)?;

	let Some(record) = state.record_repo.get(&id).await? else {
		return Err(ServerError::not_found("record not found"));
	};
	if record.kind != kind {
		return Err(ServerError::not_found("record not found"));
	}

	let actor_attrs = ActorAttrs::from(&current.actor);
	if !can_access(&actor_attrs, Portal::Admin, &record.attrs()) {
		return Err(ServerError::forbidden("Insufficient permissions"));
	}

	Ok(Json(RecordResponse::from(record)))
}

/// `GET /admin/audit` - the archive audit trail, newest first.
pub async fn list_audit(
	State(state): State<AppState>,
	Query(params): Query<ListAuditParams>,
) -> Result<Json<ListAuditResponse>, ServerError> {
	let (page, per_page, offset) = pagination(params.page, params.per_page);

	let (entries, total) = state.audit_repo.list(per_page, offset).await?;

	Ok(Json(ListAuditResponse {
		entries: entries.into_iter().map(AuditEntryResponse::from).collect(),
		total,
		page,
		per_page,
	}))
}
