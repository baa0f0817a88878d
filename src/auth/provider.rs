//! Lazily issued client-credentials token with singleflight refresh.
//!
//! [`TokenProvider`] holds at most one [`AccessToken`] snapshot. The first caller (or the first
//! caller after [`TokenProvider::invalidate`]) performs the client-credentials exchange while
//! holding an async guard; callers queued behind it reuse the snapshot it installed instead
//! of hitting the token endpoint again. Snapshots are compared by identity, so a caller holding
//! a stale token can never evict a newer one.

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError},
};
use reqwest::header::HeaderValue;
use tracing::Instrument;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials},
	config::AppConfig,
	error::ConfigError,
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::{self, CallKind, CallOutcome},
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Path of the token endpoint relative to the upstream base URL.
pub const TOKEN_PATH: &str = "oauth2/token";

/// Issues and caches the bearer token used for every upstream call.
pub struct TokenProvider {
	client_id: String,
	token_url: Url,
	oauth_client: ConfiguredBasicClient,
	http_client: ReqwestHttpClient,
	current: RwLock<Option<Arc<AccessToken>>>,
	exchange_guard: AsyncMutex<()>,
}
impl TokenProvider {
	/// Creates a provider exchanging `credentials` at `token_url`.
	///
	/// Credentials travel in the form body (`client_secret_post`), which is what the upstream
	/// token endpoint expects.
	pub fn new(
		credentials: &ClientCredentials,
		token_url: &Url,
		http_client: ReqwestHttpClient,
	) -> Result<Self> {
		let oauth_token_url = TokenUrl::new(token_url.to_string())
			.map_err(|source| ConfigError::InvalidTokenUrl { source })?;
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
			.set_client_secret(ClientSecret::new(credentials.client_secret.expose().to_owned()))
			.set_auth_type(AuthType::RequestBody)
			.set_token_uri(oauth_token_url);

		Ok(Self {
			client_id: credentials.client_id.clone(),
			token_url: token_url.clone(),
			oauth_client,
			http_client,
			current: RwLock::new(None),
			exchange_guard: AsyncMutex::new(()),
		})
	}

	/// Creates a provider for the token endpoint below the configured base URL.
	pub fn from_config(config: &AppConfig, http_client: ReqwestHttpClient) -> Result<Self> {
		let token_url = config.endpoint(TOKEN_PATH)?;

		Self::new(&config.credentials, &token_url, http_client)
	}

	/// Seeds the provider with a previously issued token.
	pub fn with_token(self, token: AccessToken) -> Self {
		*self.current.write() = Some(Arc::new(token));

		self
	}

	/// Returns the cached snapshot without contacting the token endpoint.
	pub fn current(&self) -> Option<Arc<AccessToken>> {
		self.current.read().clone()
	}

	/// Returns the cached snapshot, performing the exchange first if none is held.
	pub async fn token(&self) -> Result<Arc<AccessToken>> {
		if let Some(token) = self.current() {
			return Ok(token);
		}

		self.refresh(None).await
	}

	/// Returns the `Authorization` header value for the cached (or freshly issued) token.
	pub async fn auth_header(&self) -> Result<HeaderValue> {
		self.token().await?.header_value()
	}

	/// Clears the cached snapshot if it is still `stale`.
	///
	/// Returns `true` when the slot was cleared.
	pub fn invalidate(&self, stale: &Arc<AccessToken>) -> bool {
		let mut current = self.current.write();

		match current.as_ref() {
			Some(held) if Arc::ptr_eq(held, stale) => {
				*current = None;

				true
			},
			_ => false,
		}
	}

	/// Installs a fresh snapshot unless another caller already replaced `stale`.
	///
	/// With `stale = None` any held snapshot is accepted, which is the lazy first-use path.
	pub async fn refresh(&self, stale: Option<&Arc<AccessToken>>) -> Result<Arc<AccessToken>> {
		let _singleflight = self.exchange_guard.lock().await;

		if let Some(held) = self.current() {
			let replaced = stale.is_none_or(|stale| !Arc::ptr_eq(&held, stale));

			if replaced {
				return Ok(held);
			}
		}

		let token = Arc::new(self.exchange().await?);

		*self.current.write() = Some(token.clone());

		Ok(token)
	}

	async fn exchange(&self) -> Result<AccessToken> {
		const KIND: CallKind = CallKind::Token;

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.instrumented(meta.clone());
		let result = async {
			let response = self
				.oauth_client
				.exchange_client_credentials()
				.request_async(&handle)
				.await
				.map_err(|err| map_request_error(meta.take(), err))?;
			let mut token = AccessToken::bearer(response.access_token().secret().to_owned());

			if let Some(expires_in) = response.expires_in() {
				let secs = i64::try_from(expires_in.as_secs()).unwrap_or(i64::MAX);

				token = token.with_expires_in(Duration::seconds(secs));
			}

			tracing::debug!(expires_at = ?token.expires_at, "Issued upstream access token.");

			Ok::<_, Error>(token)
		}
		.instrument(obs::call_span(KIND, 1))
		.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(e) => {
				tracing::warn!(error = %e, "Client-credentials exchange failed.");
				obs::record_call_outcome(KIND, CallOutcome::Failure);
			},
		}

		result
	}
}
impl Debug for TokenProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("client_id", &self.client_id)
			.field("token_url", &self.token_url.as_str())
			.field("token_held", &self.current.read().is_some())
			.finish()
	}
}

fn map_request_error(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<ReqwestError>>,
) -> Error {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => {
			let reason = match response.error_description() {
				Some(description) => format!("{}: {description}", response.error().as_ref()),
				None => response.error().as_ref().to_owned(),
			};

			Error::Authentication { reason, status }
		},
		RequestTokenError::Request(HttpClientError::Reqwest(inner)) =>
			Error::Authentication { reason: format!("token request failed: {inner}"), status },
		RequestTokenError::Request(HttpClientError::Http(inner)) => ConfigError::from(inner).into(),
		RequestTokenError::Request(other) =>
			Error::Authentication { reason: format!("token request failed: {other}"), status },
		RequestTokenError::Parse(error, body) => Error::Authentication {
			reason: format!(
				"token endpoint returned an unreadable body at `{}`: {}",
				error.path(),
				preview(&body)
			),
			status,
		},
		RequestTokenError::Other(message) => Error::Authentication { reason: message, status },
	}
}

fn preview(body: &[u8]) -> String {
	const LIMIT: usize = 256;

	let text = String::from_utf8_lossy(body);

	text.chars().take(LIMIT).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn provider() -> TokenProvider {
		let credentials = ClientCredentials::new("key", "s3cr3t");
		let url = Url::parse("https://example.com/v2/oauth2/token")
			.expect("Failed to parse token endpoint URL.");

		TokenProvider::new(
			&credentials,
			&url,
			ReqwestHttpClient::with_client(ReqwestClient::new()),
		)
		.expect("Provider should build for a valid URL.")
	}

	#[test]
	fn invalidate_only_clears_matching_snapshot() {
		let provider = provider().with_token(AccessToken::bearer("first"));
		let held = provider.current().expect("Seeded token should be held.");
		let unrelated = Arc::new(AccessToken::bearer("first"));

		assert!(!provider.invalidate(&unrelated));
		assert!(provider.current().is_some());
		assert!(provider.invalidate(&held));
		assert!(provider.current().is_none());
		assert!(!provider.invalidate(&held));
	}

	#[tokio::test]
	async fn refresh_reuses_snapshot_newer_than_stale() {
		let provider = provider().with_token(AccessToken::bearer("newer"));
		let stale = Arc::new(AccessToken::bearer("older"));
		let token = provider.refresh(Some(&stale)).await.expect("Newer snapshot should be reused.");

		assert_eq!(token.secret.expose(), "newer");
	}

	#[test]
	fn debug_redacts_credentials() {
		let rendered = format!("{:?}", provider());

		assert!(rendered.contains("token_held: false"));
		assert!(!rendered.contains("s3cr3t"));
	}

	#[test]
	fn request_errors_keep_observed_status() {
		let err = map_request_error(
			Some(ResponseMetadata { status: Some(400) }),
			RequestTokenError::Other("boom".into()),
		);

		assert!(matches!(
			err,
			Error::Authentication { status: Some(400), ref reason } if reason == "boom"
		));
	}
}
