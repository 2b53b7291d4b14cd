// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Wire types for the APEMS HTTP API.
//!
//! Request and response bodies only; handlers live in the server crate.

pub mod audit;
pub mod auth;
pub mod errors;
pub mod records;

pub use audit::{AuditEntryResponse, ListAuditParams, ListAuditResponse};
pub use auth::{LoginRequest, LoginResponse};
pub use errors::{ApiErrorBody, ValidationErrorBody};
pub use records::{
	ArchiveRecordRequest, CreateRecordRequest, ListRecordsParams, ListRecordsResponse,
	ProjectRefResponse, RecordResponse, RecordSummaryResponse, UpdateRecordRequest,
};
