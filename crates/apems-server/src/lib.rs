// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! APEMS records-management server.
//!
//! Five administrative record kinds (awards, international partners,
//! modalities, impact assessments, projects) behind two disjoint portals.
//! The interesting part is the authorization and archival policy: a pure
//! ownership predicate, and a password-gated one-way archive transition
//! persisted with a compare-and-set.

pub mod api;
pub mod archive;
pub mod auth_middleware;
pub mod error;
pub mod routes;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
