// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! User-portal record handlers, generic over the kind slug.
//!
//! Every handler resolves the `{kind}` path segment against the static slug
//! registry (unknown slug → 404) and runs the ownership policy against the
//! addressed record: a non-owner gets 403 for a record that exists, 404 for
//! one that does not.

use axum::{
	extract::{Path, Query, State},
	http::{header, StatusCode},
	response::{IntoResponse, Response},
	Extension, Json,
};

use apems_server_api::{
	ArchiveRecordRequest, CreateRecordRequest, ListRecordsParams, ListRecordsResponse,
	RecordResponse, RecordSummaryResponse, UpdateRecordRequest,
};
use apems_server_auth::{
	can_access, ActorAttrs, AuthContext, CurrentActor, Portal, RecordId, RecordKind, RecordState,
};
use apems_server_db::{NewRecord, Record, RecordStore, RecordUpdate, UpdateOutcome};

use crate::api::AppState;
use crate::archive;
use crate::error::ServerError;
use crate::validation::{pagination, validate_create, validate_update};

fn resolve_kind(slug: &str) -> Result<RecordKind, ServerError> {
	RecordKind::from_slug(slug).ok_or_else(|| ServerError::not_found("unknown record kind"))
}

fn resolve_id(id: &str) -> Result<RecordId, ServerError> {
	RecordId::parse(id).map_err(|_| ServerError::not_found("record not found"))
}

fn require_actor(ctx: &AuthContext) -> Result<&CurrentActor, ServerError> {
	ctx.require_actor().map_err(|_| ServerError::Unauthenticated)
}

/// Load a record and apply the user-portal ownership policy.
///
/// Kind mismatches and missing records are both 404; an existing record the
/// actor does not own is 403.
async fn load_owned(
	state: &AppState,
	actor_attrs: &ActorAttrs,
	kind: RecordKind,
	id: &RecordId,
) -> Result<Record, ServerError> {
	let Some(record) = state.record_repo.get(id).await? else {
		return Err(ServerError::not_found("record not found"));
	};
	if record.kind != kind {
		return Err(ServerError::not_found("record not found"));
	}
	if !can_access(actor_attrs, Portal::User, &record.attrs()) {
		tracing::info!(
			actor_id = %actor_attrs.actor_id,
			kind = %record.kind,
			record_id = %record.id,
			"access denied by ownership policy"
		);
		return Err(ServerError::forbidden("Insufficient permissions"));
	}
	Ok(record)
}

/// `GET /user/{kind}` - owner-scoped listing of active records.
pub async fn list_records(
	State(state): State<AppState>,
	Extension(ctx): Extension<AuthContext>,
	Path(kind): Path<String>,
	Query(params): Query<ListRecordsParams>,
) -> Result<Json<ListRecordsResponse>, ServerError> {
	let kind = resolve_kind(&kind)?;
	let current = require_actor(&ctx)?;
	let (page, per_page, offset) = pagination(params.page, params.per_page);

	let records = state
		.record_repo
		.list_for_owner(&current.actor.id, kind, per_page, offset)
		.await?;
	let total = state
		.record_repo
		.count_for_owner(&current.actor.id, kind)
		.await?;

	Ok(Json(ListRecordsResponse {
		records: records.into_iter().map(RecordSummaryResponse::from).collect(),
		total,
		page,
		per_page,
	}))
}

/// `POST /user/{kind}` - create a record owned by the caller.
#[tracing::instrument(skip_all, fields(kind = %kind))]
pub async fn create_record(
	State(state): State<AppState>,
	Extension(ctx): Extension<AuthContext>,
	Path(kind): Path<String>,
	Json(body): Json<CreateRecordRequest>,
) -> Result<Response, ServerError> {
	let kind = resolve_kind(&kind)?;
	let current = require_actor(&ctx)?;
	validate_create(kind, &body)?;

	// A modality's project must be the caller's own active project. The
	// rejection message does not distinguish missing, foreign, and archived
	// projects.
	if let Some(project_id) = body.project_id {
		let actor_attrs = ActorAttrs::from(&current.actor);
		match load_owned(&state, &actor_attrs, RecordKind::Project, &project_id).await {
			Ok(project) if project.state == RecordState::Active => {}
			Ok(_) | Err(ServerError::NotFound(_)) | Err(ServerError::Forbidden(_)) => {
				return Err(ServerError::validation_field(
					"project_id",
					"Project is not available.",
				));
			}
			Err(e) => return Err(e),
		}
	}

	let record = state
		.record_repo
		.insert(&NewRecord {
			kind,
			owner_id: current.actor.id,
			campus_college_id: current.actor.campus_college_id,
			title: body.title.trim().to_string(),
			detail: body.detail,
			project_id: body.project_id,
		})
		.await?;

	Ok((StatusCode::CREATED, Json(RecordResponse::from(record))).into_response())
}

/// `GET /user/{kind}/{id}` - owner-only detail view.
pub async fn get_record(
	State(state): State<AppState>,
	Extension(ctx): Extension<AuthContext>,
	Path((kind, id)): Path<(String, String)>,
) -> Result<Json<RecordResponse>, ServerError> {
	let kind = resolve_kind(&kind)?;
	let id = resolve_id(&id)?;
	let current = require_actor(&ctx)?;
	let actor_attrs = ActorAttrs::from(&current.actor);

	let record = load_owned(&state, &actor_attrs, kind, &id).await?;
	Ok(Json(RecordResponse::from(record)))
}

/// `PUT /user/{kind}/{id}` - edit an active record's title and detail.
#[tracing::instrument(skip_all, fields(kind = %kind, id = %id))]
pub async fn update_record(
	State(state): State<AppState>,
	Extension(ctx): Extension<AuthContext>,
	Path((kind, id)): Path<(String, String)>,
	Json(body): Json<UpdateRecordRequest>,
) -> Result<Json<RecordResponse>, ServerError> {
	let kind = resolve_kind(&kind)?;
	let id = resolve_id(&id)?;
	let current = require_actor(&ctx)?;
	validate_update(&body)?;
	let actor_attrs = ActorAttrs::from(&current.actor);

	load_owned(&state, &actor_attrs, kind, &id).await?;

	let outcome = state
		.record_repo
		.update(
			&id,
			&RecordUpdate {
				title: body.title.trim().to_string(),
				detail: body.detail,
			},
		)
		.await?;

	match outcome {
		UpdateOutcome::Updated => {
			let record = state
				.record_repo
				.get(&id)
				.await?
				.ok_or_else(|| ServerError::Internal("record vanished after update".to_string()))?;
			Ok(Json(RecordResponse::from(record)))
		}
		UpdateOutcome::Archived => Err(ServerError::conflict(
			"Archived records cannot be edited",
		)),
		UpdateOutcome::NotFound => Err(ServerError::not_found("record not found")),
	}
}

/// `POST /user/{kind}/{id}/archive` - the password-gated one-way transition.
///
/// On success answers 303 to the kind's listing route.
pub async fn archive_record(
	State(state): State<AppState>,
	Extension(ctx): Extension<AuthContext>,
	Path((kind, id)): Path<(String, String)>,
	Json(body): Json<ArchiveRecordRequest>,
) -> Result<Response, ServerError> {
	let kind = resolve_kind(&kind)?;
	let id = resolve_id(&id)?;
	let current = require_actor(&ctx)?;

	archive::archive_record(
		&*state.record_repo,
		&*state.audit_repo,
		&current.actor,
		Portal::User,
		kind,
		&id,
		body.password.as_deref(),
	)
	.await?;

	Ok((
		StatusCode::SEE_OTHER,
		[(header::LOCATION, kind.listing_path(Portal::User))],
	)
		.into_response())
}
