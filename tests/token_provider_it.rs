mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use pet_store::{auth::AccessToken, error::Error};

#[tokio::test]
async fn first_use_exchanges_once_and_caches() {
	let server = MockServer::start_async().await;
	let mock = mock_token(&server, "issued-token").await;
	let provider = provider(&server);

	assert!(provider.current().is_none());

	let first = provider.auth_header().await.expect("First header should be issued.");
	let second = provider.auth_header().await.expect("Cached header should be reused.");

	assert_eq!(first, bearer("issued-token").as_str());
	assert_eq!(second, first);

	let held = provider.current().expect("Token should be cached after first use.");

	assert_eq!(held.secret.expose(), "issued-token");
	assert!(held.expires_at.is_some());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn concurrent_refresh_of_same_stale_token_exchanges_once() {
	let server = MockServer::start_async().await;
	let mock = mock_token(&server, "fresh-token").await;
	let provider = provider(&server).with_token(AccessToken::bearer("stale-token"));
	let stale = provider.current().expect("Seeded token should be held.");
	let (first, second) =
		tokio::join!(provider.refresh(Some(&stale)), provider.refresh(Some(&stale)));
	let first = first.expect("First refresh should succeed.");
	let second = second.expect("Second refresh should succeed.");

	assert_eq!(first.secret.expose(), "fresh-token");
	assert!(Arc::ptr_eq(&first, &second));
	assert!(!provider.invalidate(&stale));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn rejected_credentials_surface_authentication_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"invalid_client\",\"error_description\":\"Client authentication failed\"}",
			);
		})
		.await;
	let provider = provider(&server);
	let err = provider.token().await.expect_err("Rejected credentials should fail.");

	match err {
		Error::Authentication { reason, status } => {
			assert_eq!(reason, "invalid_client: Client authentication failed");
			assert_eq!(status, Some(401));
		},
		other => panic!("Unexpected error: {other:?}"),
	}

	assert!(provider.current().is_none());

	mock.assert_async().await;
}

#[tokio::test]
async fn unreadable_token_response_keeps_status() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(503).header("content-type", "text/plain").body("maintenance");
		})
		.await;
	let err = provider(&server).token().await.expect_err("Outage should fail the exchange.");

	assert!(matches!(err, Error::Authentication { status: Some(503), .. }), "got {err:?}");
}

#[tokio::test]
async fn failed_exchange_is_retried_on_next_use() {
	let server = MockServer::start_async().await;
	let mut failing = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_request\"}");
		})
		.await;
	let provider = provider(&server);

	provider.token().await.expect_err("First exchange should fail.");
	failing.assert_calls_async(1).await;
	failing.delete_async().await;

	let mock = mock_token(&server, "second-try").await;
	let token = provider.token().await.expect("Second exchange should succeed.");

	assert_eq!(token.secret.expose(), "second-try");

	mock.assert_calls_async(1).await;
}
