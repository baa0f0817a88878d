//! Route table for the HTTP listener.

// crates.io
use actix_web::web;
// self
use crate::api::{
	docs,
	error::{json_config, path_config, query_config},
	handlers::{create_pet, delete_pet, get_pet, list_pets, list_types, update_pet},
};

/// Registers extractor settings, the `/api` routes, and the documentation routes.
///
/// The caller provides [`AppState`](crate::api::AppState) through `App::app_data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.app_data(json_config()).app_data(path_config()).app_data(query_config());

	api_routes(cfg);
	docs::configure(cfg);
}

/// Pet and type routes mounted under `/api`.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api")
			.service(
				web::resource("/pets")
					.route(web::get().to(list_pets))
					.route(web::post().to(create_pet)),
			)
			.service(
				web::resource("/pets/{id}")
					.route(web::get().to(get_pet))
					.route(web::put().to(update_pet))
					.route(web::delete().to(delete_pet)),
			)
			.service(web::resource("/types").route(web::get().to(list_types))),
	);
}
