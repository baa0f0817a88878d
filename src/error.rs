//! Crate-level error types shared by the token provider, upstream client, and router.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error surfaced by public APIs and rendered at the route boundary.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) while talking to the upstream.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Client-credentials exchange against the token endpoint failed.
	#[error("Upstream authentication failed: {reason}.")]
	Authentication {
		/// Provider- or crate-supplied reason string.
		reason: String,
		/// HTTP status returned by the token endpoint, when one was observed.
		status: Option<u16>,
	},
	/// Upstream kept rejecting the bearer token after a fresh exchange.
	#[error("Upstream rejected the access token after re-authentication.")]
	UpstreamAuth,
	/// Upstream answered with an unexpected status or an unreadable body.
	#[error("Upstream request failed with status {status}: {message}.")]
	Upstream {
		/// HTTP status returned by the upstream.
		status: u16,
		/// Upstream-supplied detail or a body preview.
		message: String,
	},
	/// Requested record does not exist upstream.
	#[error("{resource} not found.")]
	NotFound {
		/// Human-readable description of the missing record.
		resource: String,
	},
}
impl Error {
	/// Builds an [`Error::Authentication`] without an HTTP status.
	pub fn authentication(reason: impl Into<String>) -> Self {
		Self::Authentication { reason: reason.into(), status: None }
	}
}

/// Configuration failures raised while loading settings or building clients.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required environment variable is absent or empty.
	#[error("Environment variable `{name}` must be set.")]
	MissingVar {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable holds a value that cannot be parsed.
	#[error("Environment variable `{name}` is invalid: {reason}.")]
	InvalidVar {
		/// Variable name.
		name: &'static str,
		/// Parse failure description.
		reason: String,
	},
	/// Upstream base URL cannot be parsed or joined.
	#[error("Upstream URL is invalid.")]
	InvalidUrl(#[from] url::ParseError),
	/// Token endpoint URL was rejected by the OAuth client.
	#[error("Token endpoint URL is invalid.")]
	InvalidTokenUrl {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the upstream.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn display_messages_carry_context() {
		let err = Error::Upstream { status: 502, message: "bad gateway".into() };

		assert_eq!(err.to_string(), "Upstream request failed with status 502: bad gateway.");

		let err = Error::NotFound { resource: "Pet 42".into() };

		assert_eq!(err.to_string(), "Pet 42 not found.");

		let err: Error = ConfigError::MissingVar { name: "PETFINDER_API_KEY" }.into();

		assert_eq!(err.to_string(), "Environment variable `PETFINDER_API_KEY` must be set.");
	}

	#[test]
	fn authentication_helper_leaves_status_empty() {
		assert!(matches!(
			Error::authentication("boom"),
			Error::Authentication { status: None, ref reason } if reason == "boom"
		));
	}
}
