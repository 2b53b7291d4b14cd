// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Authorization tests for the user portal.
//!
//! - Owners reach only their own records; a non-owner gets 403 for a record
//!   that exists and 404 for one that does not
//! - Anonymous requests are redirected to `/`, never answered with 403
//! - Admins are excluded from the user portal wholesale
//! - The decision is uniform across all five record kinds

use axum::http::{Method, StatusCode};

use apems_server_auth::{RecordId, RecordKind};

use super::support::{body_json, create_record_for, run_authz_cases, AuthzCase, TestApp};

// ============================================================================
// GET /user/{kind} - List records
// ============================================================================

#[tokio::test]
async fn owner_can_list_own_awards() {
	let app = TestApp::new().await;
	let cases = [AuthzCase {
		name: "owner_can_list_own_awards",
		method: Method::GET,
		path: "/user/awards".to_string(),
		actor: Some(app.fixtures.owner_a.clone()),
		body: None,
		expected_status: StatusCode::OK,
	}];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn anonymous_is_redirected_not_forbidden() {
	let app = TestApp::new().await;
	let cases = [
		AuthzCase {
			name: "anonymous_list",
			method: Method::GET,
			path: "/user/awards".to_string(),
			actor: None,
			body: None,
			expected_status: StatusCode::SEE_OTHER,
		},
		AuthzCase {
			name: "anonymous_detail",
			method: Method::GET,
			path: format!("/user/awards/{}", app.fixtures.award_a.id),
			actor: None,
			body: None,
			expected_status: StatusCode::SEE_OTHER,
		},
		AuthzCase {
			name: "anonymous_archive",
			method: Method::POST,
			path: format!("/user/awards/{}/archive", app.fixtures.award_a.id),
			actor: None,
			body: Some(serde_json::json!({"password": "anything"})),
			expected_status: StatusCode::SEE_OTHER,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn anonymous_redirect_targets_root() {
	let app = TestApp::new().await;
	let response = app.get("/user/awards", None).await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn listing_is_scoped_to_owner() {
	let app = TestApp::new().await;

	let response = app.get("/user/awards", Some(&app.fixtures.owner_a)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;

	let records = json["records"].as_array().expect("records should be array");
	assert_eq!(records.len(), 1);
	assert_eq!(
		records[0]["id"].as_str().unwrap(),
		app.fixtures.award_a.id.to_string()
	);
}

#[tokio::test]
async fn unknown_kind_slug_is_not_found() {
	let app = TestApp::new().await;
	let cases = [AuthzCase {
		name: "unknown_kind_slug",
		method: Method::GET,
		path: "/user/gadgets".to_string(),
		actor: Some(app.fixtures.owner_a.clone()),
		body: None,
		expected_status: StatusCode::NOT_FOUND,
	}];
	run_authz_cases(&app, &cases).await;
}

// ============================================================================
// GET /user/{kind}/{id} - Detail
// ============================================================================

#[tokio::test]
async fn owner_can_get_own_record() {
	let app = TestApp::new().await;
	let cases = [AuthzCase {
		name: "owner_can_get_own_record",
		method: Method::GET,
		path: format!("/user/awards/{}", app.fixtures.award_a.id),
		actor: Some(app.fixtures.owner_a.clone()),
		body: None,
		expected_status: StatusCode::OK,
	}];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn non_owner_gets_forbidden_for_existing_record() {
	let app = TestApp::new().await;
	let cases = [AuthzCase {
		name: "non_owner_gets_forbidden",
		method: Method::GET,
		path: format!("/user/awards/{}", app.fixtures.award_a.id),
		actor: Some(app.fixtures.owner_b.clone()),
		body: None,
		expected_status: StatusCode::FORBIDDEN,
	}];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn unknown_record_id_is_not_found() {
	let app = TestApp::new().await;
	let cases = [AuthzCase {
		name: "unknown_record_id",
		method: Method::GET,
		path: format!("/user/awards/{}", RecordId::generate()),
		actor: Some(app.fixtures.owner_a.clone()),
		body: None,
		expected_status: StatusCode::NOT_FOUND,
	}];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn record_under_wrong_kind_slug_is_not_found() {
	let app = TestApp::new().await;
	// award_a exists, but not as a project
	let cases = [AuthzCase {
		name: "wrong_kind_slug",
		method: Method::GET,
		path: format!("/user/projects/{}", app.fixtures.award_a.id),
		actor: Some(app.fixtures.owner_a.clone()),
		body: None,
		expected_status: StatusCode::NOT_FOUND,
	}];
	run_authz_cases(&app, &cases).await;
}

// ============================================================================
// Admin exclusion from the user portal
// ============================================================================

#[tokio::test]
async fn admin_cannot_enter_user_portal() {
	let app = TestApp::new().await;
	let cases = [
		AuthzCase {
			name: "admin_cannot_list_user_portal",
			method: Method::GET,
			path: "/user/awards".to_string(),
			actor: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_cannot_get_user_portal_record",
			method: Method::GET,
			path: format!("/user/awards/{}", app.fixtures.award_a.id),
			actor: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_cannot_create_in_user_portal",
			method: Method::POST,
			path: "/user/awards".to_string(),
			actor: Some(app.fixtures.admin.clone()),
			body: Some(serde_json::json!({"title": "Admin award", "detail": {}})),
			expected_status: StatusCode::FORBIDDEN,
		},
	];
	run_authz_cases(&app, &cases).await;
}

// ============================================================================
// Uniformity across kinds
// ============================================================================

#[tokio::test]
async fn ownership_decision_is_uniform_across_kinds() {
	let app = TestApp::new().await;

	for kind in [
		RecordKind::Award,
		RecordKind::InternationalPartner,
		RecordKind::ImpactAssessment,
		RecordKind::Project,
	] {
		let record = create_record_for(&app.state, &app.fixtures.owner_a, kind, "Uniform").await;
		let path = format!("/user/{}/{}", kind.slug(), record.id);

		let response = app.get(&path, Some(&app.fixtures.owner_a)).await;
		assert_eq!(response.status(), StatusCode::OK, "owner on {kind}");

		let response = app.get(&path, Some(&app.fixtures.owner_b)).await;
		assert_eq!(response.status(), StatusCode::FORBIDDEN, "non-owner on {kind}");

		let response = app.get(&path, None).await;
		assert_eq!(response.status(), StatusCode::SEE_OTHER, "anonymous on {kind}");
	}
}

// ============================================================================
// CRUD semantics
// ============================================================================

#[tokio::test]
async fn create_then_list_roundtrip() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/user/partners",
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "Partner University", "detail": {"country": "JP"}}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let created = body_json(response).await;
	assert_eq!(created["kind"], "international_partner");
	assert_eq!(created["state"], "active");

	let response = app.get("/user/partners", Some(&app.fixtures.owner_a)).await;
	let json = body_json(response).await;
	assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn create_rejects_empty_title() {
	let app = TestApp::new().await;
	let response = app
		.post(
			"/user/awards",
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "   ", "detail": {}}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
	let json = body_json(response).await;
	assert!(json["errors"]["title"].is_array());
}

#[tokio::test]
async fn modality_requires_an_owned_active_project() {
	let app = TestApp::new().await;

	// No project at all
	let response = app
		.post(
			"/user/modalities",
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "Exchange", "detail": {}}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	// Someone else's project
	let project_b =
		create_record_for(&app.state, &app.fixtures.owner_b, RecordKind::Project, "B proj").await;
	let response = app
		.post(
			"/user/modalities",
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "Exchange", "detail": {}, "project_id": project_b.id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	// Own active project
	let project_a =
		create_record_for(&app.state, &app.fixtures.owner_a, RecordKind::Project, "A proj").await;
	let response = app
		.post(
			"/user/modalities",
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "Exchange", "detail": {}, "project_id": project_a.id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn non_owner_cannot_update_record() {
	let app = TestApp::new().await;
	let response = app
		.put(
			&format!("/user/awards/{}", app.fixtures.award_a.id),
			Some(&app.fixtures.owner_b),
			serde_json::json!({"title": "Hijacked", "detail": {}}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_can_update_own_record() {
	let app = TestApp::new().await;
	let response = app
		.put(
			&format!("/user/awards/{}", app.fixtures.award_a.id),
			Some(&app.fixtures.owner_a),
			serde_json::json!({"title": "Renamed award", "detail": {"year": 2026}}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["title"], "Renamed award");
}
