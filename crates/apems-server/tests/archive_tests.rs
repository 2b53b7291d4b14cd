// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! End-to-end tests for the password-gated archive transition.
//!
//! - A wrong or missing password leaves the record untouched and reports a
//!   password-keyed validation error
//! - A successful archive answers 303 to the kind's listing, flips the state
//!   once, and writes one audit row
//! - Re-archiving and concurrent archiving resolve to 409 for the loser

use axum::http::StatusCode;

use apems_server_auth::{RecordKind, RecordState};
use apems_server_db::{AuditStore, RecordStore};

#[path = "authz/support.rs"]
mod support;

use support::{body_json, create_record_for, TestApp, PASSWORD_A, PASSWORD_B};

async fn record_state(app: &TestApp, id: &apems_server_auth::RecordId) -> RecordState {
	app.state.record_repo.get(id).await.unwrap().unwrap().state
}

#[tokio::test]
async fn archive_with_correct_password_succeeds() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;

	let response = app
		.post(
			&format!("/user/awards/{id}/archive"),
			Some(&app.fixtures.owner_a),
			serde_json::json!({"password": PASSWORD_A}),
		)
		.await;

	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(response.headers().get("location").unwrap(), "/user/awards");
	assert_eq!(record_state(&app, &id).await, RecordState::Archived);

	let (entries, total) = app.state.audit_repo.list(50, 0).await.unwrap();
	assert_eq!(total, 1);
	assert_eq!(entries[0].record_id, id);
	assert_eq!(entries[0].actor_id, app.fixtures.owner_a.actor.id);
}

#[tokio::test]
async fn archived_record_disappears_from_owner_listing() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;

	app.post(
		&format!("/user/awards/{id}/archive"),
		Some(&app.fixtures.owner_a),
		serde_json::json!({"password": PASSWORD_A}),
	)
	.await;

	let response = app.get("/user/awards", Some(&app.fixtures.owner_a)).await;
	let json = body_json(response).await;
	assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn wrong_password_leaves_record_active() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;

	let response = app
		.post(
			&format!("/user/awards/{id}/archive"),
			Some(&app.fixtures.owner_a),
			serde_json::json!({"password": "not-the-password"}),
		)
		.await;

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
	let json = body_json(response).await;
	assert!(json["errors"]["password"][0].as_str().unwrap().contains("incorrect"));
	assert_eq!(record_state(&app, &id).await, RecordState::Active);

	let (_, total) = app.state.audit_repo.list(50, 0).await.unwrap();
	assert_eq!(total, 0);
}

#[tokio::test]
async fn missing_or_blank_password_is_a_validation_error() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;

	for body in [serde_json::json!({}), serde_json::json!({"password": "   "})] {
		let response = app
			.post(
				&format!("/user/awards/{id}/archive"),
				Some(&app.fixtures.owner_a),
				body,
			)
			.await;
		assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
		let json = body_json(response).await;
		assert!(json["errors"]["password"].is_array());
	}

	assert_eq!(record_state(&app, &id).await, RecordState::Active);
}

#[tokio::test]
async fn non_owner_cannot_archive_even_with_their_own_password() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;

	// owner_b submits owner_b's correct password; ownership fails first.
	let response = app
		.post(
			&format!("/user/awards/{id}/archive"),
			Some(&app.fixtures.owner_b),
			serde_json::json!({"password": PASSWORD_B}),
		)
		.await;

	assert_eq!(response.status(), StatusCode::FORBIDDEN);
	assert_eq!(record_state(&app, &id).await, RecordState::Active);
}

#[tokio::test]
async fn second_archive_attempt_conflicts() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;
	let path = format!("/user/awards/{id}/archive");
	let body = serde_json::json!({"password": PASSWORD_A});

	let first = app
		.post(&path, Some(&app.fixtures.owner_a), body.clone())
		.await;
	assert_eq!(first.status(), StatusCode::SEE_OTHER);

	let second = app.post(&path, Some(&app.fixtures.owner_a), body).await;
	assert_eq!(second.status(), StatusCode::CONFLICT);

	// Still exactly one audit row.
	let (_, total) = app.state.audit_repo.list(50, 0).await.unwrap();
	assert_eq!(total, 1);
}

#[tokio::test]
async fn concurrent_archives_have_one_winner() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;
	let path = format!("/user/awards/{id}/archive");
	let body = serde_json::json!({"password": PASSWORD_A});

	let (a, b) = futures::join!(
		app.post(&path, Some(&app.fixtures.owner_a), body.clone()),
		app.post(&path, Some(&app.fixtures.owner_a), body.clone()),
	);

	let statuses = [a.status(), b.status()];
	assert_eq!(
		statuses.iter().filter(|s| **s == StatusCode::SEE_OTHER).count(),
		1,
		"exactly one archive wins: {statuses:?}"
	);
	assert_eq!(
		statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
		1,
		"the other observes the terminal state: {statuses:?}"
	);

	assert_eq!(record_state(&app, &id).await, RecordState::Archived);
	let (_, total) = app.state.audit_repo.list(50, 0).await.unwrap();
	assert_eq!(total, 1);
}

#[tokio::test]
async fn archived_record_refuses_edits() {
	let app = TestApp::new().await;
	let id = app.fixtures.award_a.id;

	app.post(
		&format!("/user/awards/{id}/archive"),
		Some(&app.fixtures.owner_a),
		serde_json::json!({"password": PASSWORD_A}),
	)
	.await;

	let response = app
		.put(
			&format!("/user/awards/{id}"),
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "Too late", "detail": {}}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn archiving_a_project_marks_dependent_modalities_unavailable() {
	let app = TestApp::new().await;

	let project =
		create_record_for(&app.state, &app.fixtures.owner_a, RecordKind::Project, "Proj").await;
	let create = app
		.post(
			"/user/modalities",
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "Exchange", "detail": {}, "project_id": project.id}),
		)
		.await;
	assert_eq!(create.status(), StatusCode::CREATED);

	// The dependent modality never blocks the project archive.
	let response = app
		.post(
			&format!("/user/projects/{}/archive", project.id),
			Some(&app.fixtures.owner_a),
			serde_json::json!({"password": PASSWORD_A}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);

	let response = app.get("/user/modalities", Some(&app.fixtures.owner_a)).await;
	let json = body_json(response).await;
	assert_eq!(json["records"][0]["project"]["available"], false);
	assert!(json["records"][0]["project"]["id"].is_null());
}
