//! Runtime configuration loaded from the process environment.
//!
//! Values are read once at startup into an [`AppConfig`] that is passed explicitly to the
//! components that need it. A `.env` file in the working directory is honored when present.

// std
use std::{env, time::Duration as StdDuration};
// self
use crate::{_prelude::*, auth::ClientCredentials, error::ConfigError};

/// Environment variable holding the upstream client identifier.
pub const API_KEY_VAR: &str = "PETFINDER_API_KEY";
/// Environment variable holding the upstream client secret.
pub const API_SECRET_VAR: &str = "PETFINDER_API_SECRET";
/// Environment variable overriding the upstream base URL.
pub const BASE_URL_VAR: &str = "PETFINDER_BASE_URL";
/// Environment variable overriding the outbound request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "PETFINDER_TIMEOUT_SECS";

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.petfinder.com/v2";
/// Fixed TCP port the HTTP listener binds to.
pub const LISTEN_PORT: u16 = 3000;

/// Settings shared by the token provider, upstream client, and entrypoint.
#[derive(Clone, Debug)]
pub struct AppConfig {
	/// Client-credentials pair presented to the token endpoint.
	pub credentials: ClientCredentials,
	/// Upstream API root; every endpoint is resolved relative to it.
	pub base_url: Url,
	/// Per-request timeout applied to outbound calls.
	pub request_timeout: StdDuration,
}
impl AppConfig {
	const DEFAULT_TIMEOUT_SECS: u64 = 30;

	/// Loads `.env` (if any) and reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		dotenv::dotenv().ok();

		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Builds the configuration from an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());
		let client_id = read(API_KEY_VAR).ok_or(ConfigError::MissingVar { name: API_KEY_VAR })?;
		let client_secret =
			read(API_SECRET_VAR).ok_or(ConfigError::MissingVar { name: API_SECRET_VAR })?;
		let base_url = Self::normalize_base_url(
			read(BASE_URL_VAR).as_deref().unwrap_or(DEFAULT_BASE_URL),
		)?;
		let request_timeout = match read(TIMEOUT_VAR) {
			Some(raw) => {
				let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidVar {
					name: TIMEOUT_VAR,
					reason: e.to_string(),
				})?;

				StdDuration::from_secs(secs)
			},
			None => StdDuration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
		};

		Ok(Self {
			credentials: ClientCredentials::new(client_id, client_secret),
			base_url,
			request_timeout,
		})
	}

	/// Creates a configuration pointing at `base_url` with default settings.
	pub fn new(credentials: ClientCredentials, base_url: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			credentials,
			base_url: Self::normalize_base_url(base_url)?,
			request_timeout: StdDuration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
		})
	}

	/// Resolves an upstream path (`animals`, `oauth2/token`, ...) against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		Ok(self.base_url.join(path.trim_start_matches('/'))?)
	}

	// `Url::join` drops the last segment unless the base ends with a slash.
	fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
		let trimmed = raw.trim();
		let url = if trimmed.ends_with('/') {
			Url::parse(trimmed)?
		} else {
			Url::parse(&format!("{trimmed}/"))?
		};

		Ok(url)
	}
}
