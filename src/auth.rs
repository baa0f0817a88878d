//! Upstream credentials, bearer-token snapshots, and the provider that issues them.

pub mod provider;
pub mod secret;
pub mod token;

pub use provider::*;
pub use secret::*;
pub use token::*;

/// Client-credentials pair presented to the upstream token endpoint.
#[derive(Clone, Debug)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier (the upstream API key).
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Creates a new credential pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: TokenSecret::new(client_secret) }
	}
}
