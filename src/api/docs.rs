//! OpenAPI description generated from the route handlers and models, served through Swagger UI.

// crates.io
use actix_web::{HttpResponse, http::header, web};
use utoipa::{
	OpenApi,
	openapi::{self, server::ServerBuilder},
};
use utoipa_swagger_ui::SwaggerUi;
// self
use crate::{
	api::{ErrorBody, handlers},
	config::LISTEN_PORT,
	upstream::{AnimalType, Breeds, Pet, PetAge},
};

/// Path serving the Swagger UI page.
pub const UI_PATH: &str = "/api-docs";
/// Path serving the OpenAPI JSON document.
pub const SPEC_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI document for the `/api` routes.
#[derive(OpenApi)]
#[openapi(
	info(title = "Pet Store API", description = "A simple pet store API"),
	paths(
		handlers::list_pets,
		handlers::create_pet,
		handlers::get_pet,
		handlers::update_pet,
		handlers::delete_pet,
		handlers::list_types,
	),
	components(schemas(Pet, Breeds, PetAge, AnimalType, ErrorBody)),
	tags(
		(name = "Pets", description = "Pet listings proxied from the upstream"),
		(name = "Types", description = "Animal types known to the upstream")
	)
)]
pub struct ApiDoc;

/// Returns the OpenAPI document, advertising the local listener as its server.
pub fn openapi_document() -> openapi::OpenApi {
	let mut document = ApiDoc::openapi();

	document.servers = Some(vec![
		ServerBuilder::new()
			.url(format!("http://localhost:{LISTEN_PORT}"))
			.description(Some("Development server"))
			.build(),
	]);

	document
}

/// Registers the Swagger UI under [`UI_PATH`] and the JSON document at [`SPEC_PATH`].
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(web::resource(UI_PATH).route(web::get().to(redirect_to_ui)));
	cfg.service(SwaggerUi::new(format!("{UI_PATH}/{{_:.*}}")).url(SPEC_PATH, openapi_document()));
}

// The UI loads its assets relative to the page, which needs the trailing slash.
async fn redirect_to_ui() -> HttpResponse {
	HttpResponse::PermanentRedirect().insert_header((header::LOCATION, format!("{UI_PATH}/"))).finish()
}
