//! Conversion of crate errors into JSON HTTP responses.

// crates.io
use actix_web::{
	HttpRequest, HttpResponse, ResponseError,
	error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
	http::StatusCode,
	web,
};
use utoipa::ToSchema;
// self
use crate::_prelude::*;

/// Body returned for every failed request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
	/// Human-readable message.
	pub error: String,
	/// HTTP status code, repeated for clients that only see the body.
	pub code: u16,
}
impl ErrorBody {
	/// Builds the body for `status` carrying `message`.
	pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { error: message.into(), code: status.as_u16() }
	}

	/// Renders the body as a response with the matching status.
	pub fn into_response(self) -> HttpResponse {
		let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

		HttpResponse::build(status).json(self)
	}
}

impl ResponseError for Error {
	fn status_code(&self) -> StatusCode {
		match self {
			Error::NotFound { .. } => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		ErrorBody::new(self.status_code(), self.to_string()).into_response()
	}
}

/// JSON body extractor settings that answer malformed payloads with an [`ErrorBody`].
pub fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
		bad_request(err)
	})
}

/// Path extractor settings that answer malformed ids with an [`ErrorBody`].
pub fn path_config() -> web::PathConfig {
	web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| bad_request(err))
}

/// Query extractor settings that answer malformed filters with an [`ErrorBody`].
pub fn query_config() -> web::QueryConfig {
	web::QueryConfig::default()
		.error_handler(|err: QueryPayloadError, _req: &HttpRequest| bad_request(err))
}

fn bad_request<E>(err: E) -> actix_web::Error
where
	E: 'static + Debug + Display,
{
	let response = ErrorBody::new(StatusCode::BAD_REQUEST, err.to_string()).into_response();

	InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
	// crates.io
	use actix_web::body;
	// self
	use super::*;

	async fn body_of(response: HttpResponse) -> ErrorBody {
		let bytes = body::to_bytes(response.into_body())
			.await
			.expect("Error response body should be readable.");

		serde_json::from_slice(&bytes).expect("Error response body should be JSON.")
	}

	#[actix_web::test]
	async fn not_found_maps_to_404() {
		let err = Error::NotFound { resource: "Pet 9".into() };
		let response = err.error_response();

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
		assert_eq!(
			body_of(response).await,
			ErrorBody { error: "Pet 9 not found.".into(), code: 404 }
		);
	}

	#[actix_web::test]
	async fn upstream_failures_map_to_500() {
		for err in [
			Error::UpstreamAuth,
			Error::authentication("invalid_client"),
			Error::Upstream { status: 503, message: "maintenance".into() },
		] {
			let message = err.to_string();
			let response = err.error_response();

			assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

			let body = body_of(response).await;

			assert_eq!(body.code, 500);
			assert_eq!(body.error, message);
		}
	}

	#[actix_web::test]
	async fn error_body_is_json() {
		let response = ErrorBody::new(StatusCode::BAD_REQUEST, "nope").into_response();
		let content_type = response
			.headers()
			.get("content-type")
			.and_then(|value| value.to_str().ok())
			.unwrap_or_default()
			.to_owned();

		assert!(content_type.contains("application/json"));
		assert_eq!(body_of(response).await.code, 400);
	}
}
