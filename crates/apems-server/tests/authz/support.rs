// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

use axum::{
	body::Body,
	http::{header::HeaderName, header::HeaderValue, Method, Request, StatusCode},
	response::Response,
	Router,
};
use chrono::Duration;
use serde::Serialize;
use tower::ServiceExt;

use apems_server::{create_app_state, create_router, AppState};
use apems_server_auth::{hash_password, Actor, CampusCollegeId, RecordKind, Role, SESSION_COOKIE_NAME};
use apems_server_config::ServerConfig;
use apems_server_db::{
	testing::create_apems_test_pool, ActorStore, NewActor, NewRecord, Record, RecordStore,
	SessionStore,
};

pub const PASSWORD_A: &str = "owner-a-password";
pub const PASSWORD_B: &str = "owner-b-password";
pub const PASSWORD_ADMIN: &str = "admin-password";

#[derive(Clone)]
pub struct TestActor {
	pub actor: Actor,
	pub session_token: String,
}

impl TestActor {
	pub fn auth_header(&self) -> (HeaderName, HeaderValue) {
		(
			HeaderName::from_static("cookie"),
			HeaderValue::from_str(&format!("{SESSION_COOKIE_NAME}={}", self.session_token))
				.unwrap(),
		)
	}
}

/// Two user-role owners in different campus-colleges, one admin, and one
/// active record per owner.
pub struct Fixtures {
	pub owner_a: TestActor,
	pub owner_b: TestActor,
	pub admin: TestActor,
	pub campus_a: CampusCollegeId,
	pub campus_b: CampusCollegeId,
	pub award_a: Record,
	pub award_b: Record,
}

pub struct TestApp {
	pub router: Router,
	pub fixtures: Fixtures,
	pub state: AppState,
}

impl TestApp {
	pub async fn new() -> Self {
		let pool = create_apems_test_pool().await;
		let config = ServerConfig::default();
		let state = create_app_state(pool, &config);
		let fixtures = create_fixtures(&state).await;
		let router = create_router(state.clone());

		Self {
			router,
			fixtures,
			state,
		}
	}

	pub async fn get(&self, path: &str, actor: Option<&TestActor>) -> Response<Body> {
		self
			.request(Method::GET, path, actor, Option::<()>::None)
			.await
	}

	pub async fn post(
		&self,
		path: &str,
		actor: Option<&TestActor>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::POST, path, actor, Some(body)).await
	}

	pub async fn put(
		&self,
		path: &str,
		actor: Option<&TestActor>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::PUT, path, actor, Some(body)).await
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		actor: Option<&TestActor>,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(test_actor) = actor {
			let (name, value) = test_actor.auth_header();
			builder = builder.header(name, value);
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();
		self.router.clone().oneshot(request).await.unwrap()
	}
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub actor: Option<TestActor>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = match (&case.method, &case.body) {
			(m, Some(body)) if *m == Method::POST => {
				app.post(&case.path, case.actor.as_ref(), body.clone()).await
			}
			(m, Some(body)) if *m == Method::PUT => {
				app.put(&case.path, case.actor.as_ref(), body.clone()).await
			}
			_ => app.get(&case.path, case.actor.as_ref()).await,
		};

		if response.status() != case.expected_status {
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}

async fn create_test_actor(
	state: &AppState,
	email: &str,
	name: &str,
	password: &str,
	role: Role,
	campus: CampusCollegeId,
) -> TestActor {
	let actor = state
		.actor_repo
		.insert(&NewActor {
			display_name: name.to_string(),
			email: email.to_string(),
			password_hash: hash_password(password).unwrap(),
			role,
			campus_college_id: campus,
		})
		.await
		.unwrap();

	let created = state
		.session_repo
		.create(&actor.id, Duration::hours(8))
		.await
		.unwrap();

	TestActor {
		actor,
		session_token: created.token,
	}
}

pub async fn create_record_for(
	state: &AppState,
	owner: &TestActor,
	kind: RecordKind,
	title: &str,
) -> Record {
	state
		.record_repo
		.insert(&NewRecord {
			kind,
			owner_id: owner.actor.id,
			campus_college_id: owner.actor.campus_college_id,
			title: title.to_string(),
			detail: serde_json::json!({}),
			project_id: None,
		})
		.await
		.unwrap()
}

async fn create_fixtures(state: &AppState) -> Fixtures {
	let campus_a = CampusCollegeId::generate();
	let campus_b = CampusCollegeId::generate();

	let owner_a = create_test_actor(
		state,
		"owner-a@example.edu",
		"Owner A",
		PASSWORD_A,
		Role::User,
		campus_a,
	)
	.await;
	let owner_b = create_test_actor(
		state,
		"owner-b@example.edu",
		"Owner B",
		PASSWORD_B,
		Role::User,
		campus_b,
	)
	.await;
	let admin = create_test_actor(
		state,
		"admin@example.edu",
		"Admin",
		PASSWORD_ADMIN,
		Role::Admin,
		campus_a,
	)
	.await;

	let award_a = create_record_for(state, &owner_a, RecordKind::Award, "Award A").await;
	let award_b = create_record_for(state, &owner_b, RecordKind::Award, "Award B").await;

	Fixtures {
		owner_a,
		owner_b,
		admin,
		campus_a,
		campus_b,
		award_a,
		award_b,
	}
}
