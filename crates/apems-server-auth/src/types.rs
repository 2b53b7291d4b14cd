// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Core type definitions for authentication and authorization.
//!
//! This module defines the foundational types used throughout the server:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs ([`ActorId`],
//!   [`RecordId`], [`SessionId`], [`CampusCollegeId`]) preventing accidental
//!   mixing
//! - **[`Role`]**: the two account roles, admin and user
//! - **[`Portal`]**: the two disjoint route namespaces
//! - **[`RecordKind`]**: the five archivable resource kinds, with their URL
//!   slug registry
//! - **[`RecordState`]**: explicit active/archived lifecycle state
//!
//! All ID types implement transparent serde serialization (as UUID strings)
//! and provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}

			/// Parse an ID from its string form.
			pub fn parse(s: &str) -> Result<Self, uuid::Error> {
				Uuid::parse_str(s).map(Self)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(ActorId, "Unique identifier for an actor (account).");
define_id_type!(RecordId, "Unique identifier for a record of any kind.");
define_id_type!(SessionId, "Unique identifier for a session.");
define_id_type!(CampusCollegeId, "Unique identifier for a campus-college.");

// =============================================================================
// Roles & Portals
// =============================================================================

/// Account role. Exactly one per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Campus/college administrator; uses the admin portal only.
	Admin,
	/// Regular contributor; owns records, uses the user portal only.
	User,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Admin => "admin",
			Role::User => "user",
		}
	}

	pub fn parse(s: &str) -> Option<Role> {
		match s {
			"admin" => Some(Role::Admin),
			"user" => Some(Role::User),
			_ => None,
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One of the two disjoint route namespaces.
///
/// Role eligibility is mutually exclusive: admins are entirely excluded from
/// the user portal, and users from the admin portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Portal {
	Admin,
	User,
}

impl Portal {
	/// The route prefix this portal is mounted under.
	pub fn prefix(&self) -> &'static str {
		match self {
			Portal::Admin => "/admin",
			Portal::User => "/user",
		}
	}
}

impl fmt::Display for Portal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Portal::Admin => write!(f, "admin"),
			Portal::User => write!(f, "user"),
		}
	}
}

// =============================================================================
// Record kinds
// =============================================================================

/// The five archivable record kinds.
///
/// The policy and archive guard are generic over this enum; per-kind
/// variation is limited to the URL slug and the listing route used as the
/// post-archive redirect target. The slug mapping below is the static
/// registry — kinds are never discovered by naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
	Award,
	InternationalPartner,
	Modality,
	ImpactAssessment,
	Project,
}

impl RecordKind {
	/// All record kinds, in listing order.
	pub const ALL: &'static [RecordKind] = &[
		RecordKind::Award,
		RecordKind::InternationalPartner,
		RecordKind::Modality,
		RecordKind::ImpactAssessment,
		RecordKind::Project,
	];

	/// The URL path segment for this kind.
	pub fn slug(&self) -> &'static str {
		match self {
			RecordKind::Award => "awards",
			RecordKind::InternationalPartner => "partners",
			RecordKind::Modality => "modalities",
			RecordKind::ImpactAssessment => "impact-assessments",
			RecordKind::Project => "projects",
		}
	}

	/// Resolve a URL path segment to a kind.
	pub fn from_slug(slug: &str) -> Option<RecordKind> {
		RecordKind::ALL.iter().copied().find(|k| k.slug() == slug)
	}

	/// The storage discriminator for this kind.
	pub fn as_str(&self) -> &'static str {
		match self {
			RecordKind::Award => "award",
			RecordKind::InternationalPartner => "international_partner",
			RecordKind::Modality => "modality",
			RecordKind::ImpactAssessment => "impact_assessment",
			RecordKind::Project => "project",
		}
	}

	/// Resolve a storage discriminator to a kind.
	pub fn parse(s: &str) -> Option<RecordKind> {
		RecordKind::ALL.iter().copied().find(|k| k.as_str() == s)
	}

	/// The listing route for this kind under the given portal.
	///
	/// Used as the redirect target after a successful archive.
	pub fn listing_path(&self, portal: Portal) -> String {
		format!("{}/{}", portal.prefix(), self.slug())
	}
}

impl fmt::Display for RecordKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// =============================================================================
// Record state
// =============================================================================

/// Explicit record lifecycle state.
///
/// Archival is a one-way transition; listing queries must filter by state
/// explicitly rather than checking an ad-hoc boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
	Active,
	Archived,
}

impl RecordState {
	pub fn as_str(&self) -> &'static str {
		match self {
			RecordState::Active => "active",
			RecordState::Archived => "archived",
		}
	}

	pub fn parse(s: &str) -> Option<RecordState> {
		match s {
			"active" => Some(RecordState::Active),
			"archived" => Some(RecordState::Archived),
			_ => None,
		}
	}

	pub fn is_archived(&self) -> bool {
		matches!(self, RecordState::Archived)
	}
}

impl fmt::Display for RecordState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
