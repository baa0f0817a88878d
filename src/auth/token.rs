//! Immutable bearer-token snapshot issued by the client-credentials exchange.

// crates.io
use reqwest::header::HeaderValue;
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token returned by the upstream token endpoint.
///
/// Snapshots are shared behind [`Arc`] and never mutated; a refresh installs a new snapshot.
/// The advertised expiry is informational only, staleness is detected when the upstream
/// answers `401`.
#[derive(Clone, Debug)]
pub struct AccessToken {
	/// Bearer secret presented in the `Authorization` header.
	pub secret: TokenSecret,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Expiry advertised through `expires_in`, if any.
	pub expires_at: Option<OffsetDateTime>,
}
impl AccessToken {
	/// Creates a bearer token issued now without an advertised expiry.
	pub fn bearer(secret: impl Into<String>) -> Self {
		Self {
			secret: TokenSecret::new(secret),
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
		}
	}

	/// Records the lifetime advertised by the token endpoint.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_at = Some(self.issued_at + expires_in);

		self
	}

	/// Renders the `Authorization` header value, flagged as sensitive.
	pub fn header_value(&self) -> Result<HeaderValue> {
		let mut value = HeaderValue::try_from(format!("Bearer {}", self.secret.expose()))
			.map_err(|_| Error::authentication("access token contains invalid header characters"))?;

		value.set_sensitive(true);

		Ok(value)
	}
}
