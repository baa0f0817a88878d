//! Pet-store HTTP server entrypoint.

// crates.io
use actix_web::{App, HttpServer, middleware::Logger, web};
use color_eyre::{Result, eyre::eyre};
// self
use pet_store::{
	api::{self, AppState},
	config::{AppConfig, LISTEN_PORT},
	obs,
	upstream::UpstreamClient,
};

#[actix_web::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	obs::install_subscriber().map_err(|e| eyre!(e))?;

	let config = AppConfig::from_env()?;
	let upstream = UpstreamClient::from_config(&config)?;
	let state = web::Data::new(AppState::new(upstream));

	tracing::info!("Server running on http://localhost:{LISTEN_PORT}");
	tracing::info!("Swagger docs available at http://localhost:{LISTEN_PORT}{}", api::docs::UI_PATH);

	HttpServer::new(move || {
		App::new().app_data(state.clone()).wrap(Logger::default()).configure(api::configure)
	})
	.bind(("0.0.0.0", LISTEN_PORT))?
	.run()
	.await?;

	Ok(())
}
