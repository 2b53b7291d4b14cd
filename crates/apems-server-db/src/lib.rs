// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! SQLite persistence layer for the APEMS server.
//!
//! One repository per aggregate: actors, records, sessions, and the archive
//! audit trail. The record repository carries the compare-and-set archive
//! transition that the archive guard depends on.

pub mod actor;
pub mod audit;
pub mod error;
pub mod pool;
pub mod record;
pub mod schema;
pub mod session;
pub mod testing;

pub use actor::{ActorRepository, ActorStore, NewActor};
pub use audit::{ArchiveAuditEntry, AuditRepository, AuditStore};
pub use error::{DbError, Result};
pub use pool::create_pool;
pub use schema::ensure_schema;
pub use record::{
	ArchiveOutcome, NewRecord, ProjectRef, Record, RecordRepository, RecordStore, RecordSummary,
	RecordUpdate, UpdateOutcome,
};
pub use session::{CreatedSession, Session, SessionRepository, SessionStore};
