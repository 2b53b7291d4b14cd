// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Password hashing and verification.
//!
//! Credentials are stored as Argon2 PHC strings. Verification is the
//! re-authentication step of the archive guard: the caller passes the
//! plaintext the user just re-entered and the stored hash, and gets a
//! plain yes/no. A malformed stored hash is an error, not a mismatch.

use argon2::password_hash::{
	rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};

use crate::argon2_config::argon2_instance;

/// Errors from credential hashing or verification.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
	#[error("failed to hash password")]
	Hash,

	#[error("stored credential hash is malformed")]
	MalformedHash,
}

/// Hash a plaintext password into a PHC string for storage.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = argon2_instance()
		.hash_password(plaintext.as_bytes(), &salt)
		.map_err(|_| PasswordError::Hash)?;
	Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch; errors only when the stored hash
/// cannot be parsed.
pub fn verify_password(stored_hash: &str, plaintext: &str) -> Result<bool, PasswordError> {
	let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::MalformedHash)?;
	Ok(argon2_instance()
		.verify_password(plaintext.as_bytes(), &parsed)
		.is_ok())
}
