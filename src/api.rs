//! Inbound HTTP surface: routes under `/api`, error rendering, and API documentation.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ErrorBody;
pub use routes::configure;
pub use state::AppState;
