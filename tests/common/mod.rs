//! Shared fixtures wiring the pet-store clients against an `httpmock` upstream.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::{Mock, prelude::*};
// self
use pet_store::{
	actix_web::web,
	api::AppState,
	auth::{AccessToken, ClientCredentials, TokenProvider},
	config::AppConfig,
	http::ReqwestHttpClient,
	upstream::UpstreamClient,
};

pub const CLIENT_ID: &str = "pet-store-key";
pub const CLIENT_SECRET: &str = "pet-store-secret";
pub const TOKEN_PATH: &str = "/v2/oauth2/token";

/// Configuration pointing at `/v2` on the mock server.
pub fn config(server: &MockServer) -> AppConfig {
	AppConfig::new(ClientCredentials::new(CLIENT_ID, CLIENT_SECRET), &server.url("/v2"))
		.expect("Mock base URL should parse.")
}

/// Token provider with an empty cache.
pub fn provider(server: &MockServer) -> TokenProvider {
	let config = config(server);
	let http_client = ReqwestHttpClient::with_timeout(config.request_timeout)
		.expect("Test HTTP client should build.");

	TokenProvider::from_config(&config, http_client).expect("Token provider should build.")
}

/// Upstream client whose provider starts with an empty cache.
pub fn client(server: &MockServer) -> UpstreamClient {
	UpstreamClient::from_config(&config(server)).expect("Upstream client should build.")
}

/// Upstream client whose provider already holds `token`.
pub fn client_with_token(server: &MockServer, token: &str) -> UpstreamClient {
	let config = config(server);
	let http_client = ReqwestHttpClient::with_timeout(config.request_timeout)
		.expect("Test HTTP client should build.");
	let tokens = TokenProvider::from_config(&config, http_client.clone())
		.expect("Token provider should build.")
		.with_token(AccessToken::bearer(token));

	UpstreamClient::new(config.base_url.clone(), http_client, Arc::new(tokens))
}

/// Handler state backed by [`client`].
pub fn state(server: &MockServer) -> web::Data<AppState> {
	web::Data::new(AppState::new(client(server)))
}

/// Mocks a successful client-credentials exchange issuing `token`.
pub async fn mock_token<'a>(server: &'a MockServer, token: &str) -> Mock<'a> {
	let body = format!(
		"{{\"access_token\":\"{token}\",\"token_type\":\"Bearer\",\"expires_in\":3600}}"
	);

	server
		.mock_async(move |when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

/// Expected `Authorization` header for `token`.
pub fn bearer(token: &str) -> String {
	format!("Bearer {token}")
}
