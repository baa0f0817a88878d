//! Authenticated client for the upstream animal-listings API.
//!
//! Every call borrows the provider's current token. When the upstream answers `401`, the
//! client invalidates that snapshot, asks the provider for a fresh one, and re-issues the same
//! request exactly once. A second `401` surfaces as [`Error::UpstreamAuth`].

pub mod model;

pub use model::*;

// crates.io
use reqwest::{Response, StatusCode, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::Instrument;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenProvider},
	config::AppConfig,
	error::{ConfigError, TransportError},
	http::ReqwestHttpClient,
	obs::{self, CallKind, CallOutcome},
};

/// Typed view over the upstream endpoints used by the router.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
	base_url: Url,
	http_client: ReqwestHttpClient,
	tokens: Arc<TokenProvider>,
}
impl UpstreamClient {
	/// Creates a client resolving endpoints against `base_url`.
	pub fn new(base_url: Url, http_client: ReqwestHttpClient, tokens: Arc<TokenProvider>) -> Self {
		Self { base_url, http_client, tokens }
	}

	/// Builds the transport, token provider, and client described by `config`.
	pub fn from_config(config: &AppConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.request_timeout)?;
		let tokens = Arc::new(TokenProvider::from_config(config, http_client.clone())?);

		Ok(Self::new(config.base_url.clone(), http_client, tokens))
	}

	/// Token provider backing this client.
	pub fn tokens(&self) -> &Arc<TokenProvider> {
		&self.tokens
	}

	/// Lists animals matching `filters`.
	pub async fn list_animals(&self, filters: &AnimalFilters) -> Result<AnimalPage> {
		let request = UpstreamRequest {
			kind: CallKind::ListAnimals,
			url: self.endpoint("animals")?,
			query: Some(filters),
			resource: "Animal listing".into(),
		};

		self.send(request).await
	}

	/// Fetches a single animal by upstream id.
	pub async fn get_animal(&self, id: u64) -> Result<Pet> {
		let request = UpstreamRequest {
			kind: CallKind::GetAnimal,
			url: self.endpoint(&format!("animals/{id}"))?,
			query: None,
			resource: format!("Pet {id}"),
		};
		let envelope: AnimalEnvelope = self.send(request).await?;

		Ok(envelope.animal)
	}

	/// Lists the animal types the upstream knows about.
	pub async fn list_types(&self) -> Result<Vec<AnimalType>> {
		let request = UpstreamRequest {
			kind: CallKind::ListTypes,
			url: self.endpoint("types")?,
			query: None,
			resource: "Animal types".into(),
		};
		let envelope: TypesEnvelope = self.send(request).await?;

		Ok(envelope.types)
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		let url = self.base_url.join(path).map_err(ConfigError::from)?;

		Ok(url)
	}

	async fn send<T>(&self, request: UpstreamRequest<'_>) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let kind = request.kind;

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = async {
			let token = self.tokens.token().await?;
			let mut response = self.dispatch(&request, &token, 1).await?;

			if response.status() == StatusCode::UNAUTHORIZED {
				obs::record_call_outcome(kind, CallOutcome::Retry);
				tracing::info!(
					call = %kind,
					"Upstream rejected the access token; re-authenticating."
				);

				self.tokens.invalidate(&token);

				let fresh = self.tokens.refresh(Some(&token)).await?;

				response = self.dispatch(&request, &fresh, 2).await?;

				if response.status() == StatusCode::UNAUTHORIZED {
					self.tokens.invalidate(&fresh);

					return Err(Error::UpstreamAuth);
				}
			}

			decode(response, &request.resource).await
		}
		.await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(e) => {
				tracing::warn!(call = %kind, error = %e, "Upstream call failed.");
				obs::record_call_outcome(kind, CallOutcome::Failure);
			},
		}

		result
	}

	async fn dispatch(
		&self,
		request: &UpstreamRequest<'_>,
		token: &AccessToken,
		attempt: u8,
	) -> Result<Response> {
		let mut builder =
			self.http_client.get(request.url.clone()).header(AUTHORIZATION, token.header_value()?);

		if let Some(query) = request.query {
			builder = builder.query(query);
		}

		let response = builder
			.send()
			.instrument(obs::call_span(request.kind, attempt))
			.await
			.map_err(TransportError::from)?;

		tracing::debug!(
			call = %request.kind,
			attempt,
			status = response.status().as_u16(),
			"Upstream responded."
		);

		Ok(response)
	}
}

struct UpstreamRequest<'a> {
	kind: CallKind,
	url: Url,
	query: Option<&'a AnimalFilters>,
	resource: String,
}

async fn decode<T>(response: Response, resource: &str) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();
	let body = response.bytes().await.map_err(TransportError::from)?;

	if status == StatusCode::NOT_FOUND {
		return Err(Error::NotFound { resource: resource.to_owned() });
	}
	if !status.is_success() {
		return Err(Error::Upstream {
			status: status.as_u16(),
			message: problem_message(status, &body),
		});
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|e| Error::Upstream {
		status: status.as_u16(),
		message: format!("unreadable body at `{}`: {}", e.path(), e.inner()),
	})
}

fn problem_message(status: StatusCode, body: &[u8]) -> String {
	const LIMIT: usize = 256;

	if let Ok(problem) = serde_json::from_slice::<Problem>(body)
		&& let Some(message) = problem.detail.or(problem.title)
	{
		return message;
	}

	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() {
		status.canonical_reason().unwrap_or("no response body").to_owned()
	} else {
		text.chars().take(LIMIT).collect()
	}
}
