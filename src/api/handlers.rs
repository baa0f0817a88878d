//! Request handlers for the `/api` routes.
//!
//! Reads go through the [`UpstreamClient`](crate::upstream::UpstreamClient). Writes are stubs
//! that echo the submitted object: the upstream is read-only and nothing is persisted.

// crates.io
use actix_web::{HttpResponse, web};
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	api::{AppState, ErrorBody},
	upstream::{AnimalFilters, AnimalType, Pet},
};

/// Response header carrying the upstream's total match count.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";
/// Response header carrying the 1-based page index.
pub const CURRENT_PAGE_HEADER: &str = "X-Current-Page";
/// Response header carrying the total number of pages.
pub const TOTAL_PAGES_HEADER: &str = "X-Total-Pages";

/// Untyped pet object accepted by create and update.
pub type PetDraft = Map<String, Value>;

/// Returns all pets matching the filters.
#[utoipa::path(
	get,
	path = "/api/pets",
	tag = "Pets",
	params(AnimalFilters),
	responses(
		(
			status = 200,
			description = "List of pets",
			body = Vec<Pet>,
			headers(
				("X-Total-Count" = u64, description = "Total number of matching pets"),
				("X-Current-Page" = u32, description = "1-based page index"),
				("X-Total-Pages" = u32, description = "Total number of pages")
			)
		),
		(status = 400, description = "Malformed filters", body = ErrorBody),
		(status = 500, description = "Upstream failure", body = ErrorBody)
	)
)]
pub async fn list_pets(
	state: web::Data<AppState>,
	filters: web::Query<AnimalFilters>,
) -> Result<HttpResponse> {
	let page = state.upstream.list_animals(&filters).await?;
	let mut response = HttpResponse::Ok();

	if let Some(pagination) = page.pagination {
		response
			.insert_header((TOTAL_COUNT_HEADER, pagination.total_count.to_string()))
			.insert_header((CURRENT_PAGE_HEADER, pagination.current_page.to_string()))
			.insert_header((TOTAL_PAGES_HEADER, pagination.total_pages.to_string()));
	}

	Ok(response.json(page.animals))
}

/// Gets a pet by id.
#[utoipa::path(
	get,
	path = "/api/pets/{id}",
	tag = "Pets",
	params(("id" = u64, Path, description = "Pet id")),
	responses(
		(status = 200, description = "Pet details", body = Pet),
		(status = 404, description = "Pet not found", body = ErrorBody),
		(status = 500, description = "Upstream failure", body = ErrorBody)
	)
)]
pub async fn get_pet(state: web::Data<AppState>, id: web::Path<u64>) -> Result<HttpResponse> {
	let pet = state.upstream.get_animal(id.into_inner()).await?;

	Ok(HttpResponse::Ok().json(pet))
}

/// Creates a pet by echoing the submitted object with a generated id.
#[utoipa::path(
	post,
	path = "/api/pets",
	tag = "Pets",
	request_body = Pet,
	responses(
		(status = 201, description = "Pet created successfully", body = Pet),
		(status = 400, description = "Malformed body", body = ErrorBody)
	)
)]
pub async fn create_pet(state: web::Data<AppState>, draft: web::Json<PetDraft>) -> HttpResponse {
	let mut pet = draft.into_inner();
	let id = state.next_pet_id();

	pet.insert("id".into(), Value::from(id));
	tracing::debug!(id, "Echoing created pet.");

	HttpResponse::Created().json(pet)
}

/// Updates a pet by echoing the submitted object under the path id.
#[utoipa::path(
	put,
	path = "/api/pets/{id}",
	tag = "Pets",
	params(("id" = u64, Path, description = "Pet id")),
	request_body = Pet,
	responses(
		(status = 200, description = "Pet updated", body = Pet),
		(status = 400, description = "Malformed id or body", body = ErrorBody)
	)
)]
pub async fn update_pet(id: web::Path<u64>, draft: web::Json<PetDraft>) -> HttpResponse {
	let mut pet = draft.into_inner();

	pet.insert("id".into(), Value::from(id.into_inner()));

	HttpResponse::Ok().json(pet)
}

/// Deletes a pet.
#[utoipa::path(
	delete,
	path = "/api/pets/{id}",
	tag = "Pets",
	params(("id" = String, Path, description = "Pet id")),
	responses((status = 204, description = "Pet deleted"))
)]
// Existence is never checked.
pub async fn delete_pet(id: web::Path<String>) -> HttpResponse {
	tracing::debug!(id = %id, "Ignoring pet deletion.");

	HttpResponse::NoContent().finish()
}

/// Returns all animal types.
#[utoipa::path(
	get,
	path = "/api/types",
	tag = "Types",
	responses(
		(status = 200, description = "List of animal types", body = Vec<AnimalType>),
		(status = 500, description = "Upstream failure", body = ErrorBody)
	)
)]
pub async fn list_types(state: web::Data<AppState>) -> Result<HttpResponse> {
	let types = state.upstream.list_types().await?;

	Ok(HttpResponse::Ok().json(types))
}
