// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Attribute types for policy evaluation.
//!
//! # Design principles
//!
//! 1. **Immutable evaluation**: all attributes are computed before the
//!    policy runs
//! 2. **No database access**: the predicate is pure; data is pre-loaded
//! 3. **Explicit attributes**: every relevant fact is a field, not derived

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::types::{ActorId, CampusCollegeId, RecordId, RecordKind, RecordState, Role};

/// Attributes describing the actor requesting access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAttrs {
	pub actor_id: ActorId,
	pub role: Role,
	pub campus_college_id: CampusCollegeId,
}

impl ActorAttrs {
	pub fn new(actor_id: ActorId, role: Role, campus_college_id: CampusCollegeId) -> Self {
		Self {
			actor_id,
			role,
			campus_college_id,
		}
	}

	pub fn is_admin(&self) -> bool {
		self.role == Role::Admin
	}
}

impl From<&Actor> for ActorAttrs {
	fn from(actor: &Actor) -> Self {
		Self {
			actor_id: actor.id,
			role: actor.role,
			campus_college_id: actor.campus_college_id,
		}
	}
}

/// Attributes describing the record being accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAttrs {
	pub record_id: RecordId,
	pub kind: RecordKind,
	pub owner_id: ActorId,
	pub campus_college_id: CampusCollegeId,
	pub state: RecordState,
}

impl RecordAttrs {
	pub fn new(record_id: RecordId, kind: RecordKind, owner_id: ActorId) -> Self {
		Self {
			record_id,
			kind,
			owner_id,
			campus_college_id: CampusCollegeId::new(uuid::Uuid::nil()),
			state: RecordState::Active,
		}
	}

	/// Builder: set the campus-college.
	pub fn with_campus_college(mut self, id: CampusCollegeId) -> Self {
		self.campus_college_id = id;
		self
	}

	/// Builder: set the lifecycle state.
	pub fn with_state(mut self, state: RecordState) -> Self {
		self.state = state;
		self
	}
}
