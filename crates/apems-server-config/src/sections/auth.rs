// Copyright (c) 2025 APEMS Team. All rights reserved.
// SPDX-License-Identifier: MIT

//! Authentication and session configuration.

use serde::Deserialize;

/// Auth configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Deployment environment label ("development", "production", ...).
	pub environment: String,
	/// Session lifetime in hours.
	pub session_ttl_hours: u64,
	/// Interval between expired-session sweeps, in seconds.
	pub session_cleanup_interval_secs: u64,
	/// Mark session cookies `Secure`. Must be on in production.
	pub secure_cookies: bool,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			environment: "development".to_string(),
			session_ttl_hours: 8,
			session_cleanup_interval_secs: 3600,
			secure_cookies: false,
		}
	}
}

/// Auth configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub session_ttl_hours: Option<u64>,
	#[serde(default)]
	pub session_cleanup_interval_secs: Option<u64>,
	#[serde(default)]
	pub secure_cookies: Option<bool>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.environment.is_some() {
			self.environment = other.environment;
		}
		if other.session_ttl_hours.is_some() {
			self.session_ttl_hours = other.session_ttl_hours;
		}
		if other.session_cleanup_interval_secs.is_some() {
			self.session_cleanup_interval_secs = other.session_cleanup_interval_secs;
		}
		if other.secure_cookies.is_some() {
			self.secure_cookies = other.secure_cookies;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		let defaults = AuthConfig::default();
		AuthConfig {
			environment: self.environment.unwrap_or(defaults.environment),
			session_ttl_hours: self.session_ttl_hours.unwrap_or(defaults.session_ttl_hours),
			session_cleanup_interval_secs: self
				.session_cleanup_interval_secs
				.unwrap_or(defaults.session_cleanup_interval_secs),
			secure_cookies: self.secure_cookies.unwrap_or(defaults.secure_cookies),
		}
	}
}
