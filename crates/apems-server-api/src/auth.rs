// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use apems_server_auth::ActorProfile;

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

/// Response for a successful login. The session token travels in the
/// `Set-Cookie` header, not the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
	pub actor: ActorProfile,
	/// Portal landing path for this actor ("/admin" or "/user").
	pub portal: String,
}
