// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Actor (account) entity.
//!
//! Actors are provisioned out of band; this core only reads them. The
//! stored credential hash never leaves this struct except through
//! [`crate::password::verify_password`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ActorId, CampusCollegeId, Role};

/// An account in the system.
///
/// # PII handling
///
/// `display_name` and `email` are PII and should be redacted in logs;
/// `password_hash` must never be serialized into a response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
	/// Unique identifier for this actor.
	pub id: ActorId,

	/// Display name shown in the UI.
	pub display_name: String,

	/// Login email, unique across actors.
	pub email: String,

	/// Argon2 PHC string for the actor's password.
	#[serde(skip_serializing)]
	pub password_hash: String,

	/// Account role; decides portal eligibility.
	pub role: Role,

	/// The campus-college this actor belongs to.
	pub campus_college_id: CampusCollegeId,

	/// When the account was created.
	pub created_at: DateTime<Utc>,

	/// When the account was last updated.
	pub updated_at: DateTime<Utc>,
}

impl Actor {
	pub fn is_admin(&self) -> bool {
		self.role == Role::Admin
	}

	/// Creates a public view of this actor, safe to embed in responses.
	pub fn to_profile(&self) -> ActorProfile {
		ActorProfile {
			id: self.id,
			display_name: self.display_name.clone(),
			role: self.role,
			campus_college_id: self.campus_college_id,
		}
	}
}

/// Public view of an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
	pub id: ActorId,
	pub display_name: String,
	pub role: Role,
	pub campus_college_id: CampusCollegeId,
}
