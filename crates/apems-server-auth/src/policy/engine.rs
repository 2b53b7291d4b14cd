// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Access-policy evaluation.
//!
//! [`can_access`] decides whether an actor may read or write a record
//! through a given portal. The rules are evaluated in order:
//!
//! 1. Admins are entirely excluded from the user portal
//! 2. In the user portal, users reach only the records they own
//! 3. Non-admins are excluded from the admin portal
//! 4. Admins reach every record in the admin portal (campus-college
//!    scoping there is a listing filter, never a denial)
//!
//! The decision is identical for every record kind; that uniformity is a
//! load-bearing property of the design.

use tracing::instrument;

use super::types::{ActorAttrs, RecordAttrs};
use crate::types::{Portal, Role};

/// Evaluates whether an actor may access a record through a portal.
///
/// Pure function: no side effects, no I/O. The route layer maps `false`
/// to HTTP 403. Unauthenticated requests must be handled before this is
/// called (they get a redirect, never a 403).
#[instrument(
	level = "debug",
	skip(actor, record),
	fields(
		actor_id = %actor.actor_id,
		portal = %portal,
		kind = %record.kind,
		record_id = %record.record_id,
	)
)]
pub fn can_access(actor: &ActorAttrs, portal: Portal, record: &RecordAttrs) -> bool {
	match (portal, actor.role) {
		// Blanket exclusion: admins never enter the user portal.
		(Portal::User, Role::Admin) => false,
		(Portal::User, Role::User) => record.owner_id == actor.actor_id,
		(Portal::Admin, Role::User) => false,
		(Portal::Admin, Role::Admin) => true,
	}
}
