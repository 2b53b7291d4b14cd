// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Identity, role, and access-policy primitives for the APEMS server.
//!
//! This crate holds everything the route layer needs to answer "may this
//! actor touch this record through this portal":
//!
//! - ID newtypes and the role/portal/record-kind enums ([`types`])
//! - The [`Actor`](actor::Actor) entity
//! - The pure ownership/portal predicate ([`policy`])
//! - Argon2 credential hashing and verification ([`password`])
//! - Request auth context and session-cookie extraction ([`middleware`])
//!
//! Policy evaluation is deliberately free of I/O: all attributes are loaded
//! before [`policy::can_access`] runs, so the predicate is a pure function
//! that can be tested without a request harness.

pub mod actor;
mod argon2_config;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod types;

pub use actor::{Actor, ActorProfile};
pub use middleware::{extract_session_cookie, AuthContext, CurrentActor, SESSION_COOKIE_NAME};
pub use password::{hash_password, verify_password, PasswordError};
pub use policy::{can_access, ActorAttrs, RecordAttrs};
pub use types::{
	ActorId, CampusCollegeId, Portal, RecordId, RecordKind, RecordState, Role, SessionId,
};
