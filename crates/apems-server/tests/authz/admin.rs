// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Authorization tests for the admin portal.
//!
//! - Users are excluded from the admin portal wholesale
//! - Admin listings span all owners and can filter by campus-college
//! - Archived records appear only when asked for

use axum::http::{Method, StatusCode};

use apems_server_db::RecordStore;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn user_cannot_enter_admin_portal() {
	let app = TestApp::new().await;
	let cases = [
		AuthzCase {
			name: "user_cannot_list_admin_portal",
			method: Method::GET,
			path: "/admin/awards".to_string(),
			actor: Some(app.fixtures.owner_a.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "user_cannot_read_audit",
			method: Method::GET,
			path: "/admin/audit".to_string(),
			actor: Some(app.fixtures.owner_a.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn anonymous_is_redirected_from_admin_portal() {
	let app = TestApp::new().await;
	let response = app.get("/admin/awards", None).await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn admin_listing_spans_all_owners() {
	let app = TestApp::new().await;

	let response = app.get("/admin/awards", Some(&app.fixtures.admin)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["total"], 2);
}

#[tokio::test]
async fn admin_can_get_any_record() {
	let app = TestApp::new().await;
	let cases = [
		AuthzCase {
			name: "admin_gets_owner_a_record",
			method: Method::GET,
			path: format!("/admin/awards/{}", app.fixtures.award_a.id),
			actor: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin_gets_owner_b_record",
			method: Method::GET,
			path: format!("/admin/awards/{}", app.fixtures.award_b.id),
			actor: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn admin_listing_filters_by_campus_college() {
	let app = TestApp::new().await;

	let path = format!(
		"/admin/awards?campus_college_id={}",
		app.fixtures.campus_a
	);
	let response = app.get(&path, Some(&app.fixtures.admin)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["total"], 1);
	assert_eq!(
		json["records"][0]["id"].as_str().unwrap(),
		app.fixtures.award_a.id.to_string()
	);
}

#[tokio::test]
async fn admin_listing_includes_archived_only_on_request() {
	let app = TestApp::new().await;
	app.state
		.record_repo
		.archive(&app.fixtures.award_a.id)
		.await
		.unwrap();

	let response = app.get("/admin/awards", Some(&app.fixtures.admin)).await;
	let json = body_json(response).await;
	assert_eq!(json["total"], 1);

	let response = app
		.get("/admin/awards?include_archived=true", Some(&app.fixtures.admin))
		.await;
	let json = body_json(response).await;
	assert_eq!(json["total"], 2);
}
