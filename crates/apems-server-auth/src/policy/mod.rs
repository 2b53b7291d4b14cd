// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Ownership/portal access policy.
//!
//! The policy is a pure predicate over pre-loaded attributes: the route
//! layer resolves the [`ActorAttrs`] and [`RecordAttrs`] first, then asks
//! [`can_access`] for a yes/no. Denials are translated to HTTP 403 by the
//! caller; unauthenticated requests never reach the policy at all (they are
//! answered with a redirect).

mod engine;
mod types;

pub use engine::can_access;
pub use types::{ActorAttrs, RecordAttrs};
