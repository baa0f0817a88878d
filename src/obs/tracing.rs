// crates.io
use tracing::Span;
use tracing_subscriber::EnvFilter;
// self
use crate::obs::CallKind;

/// Error returned when a global subscriber is already installed.
pub type SubscriberInitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// The subscriber also bridges `log` records, so actix-web's access logger shows up here.
pub fn install_subscriber() -> Result<(), SubscriberInitError> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init()
}

/// Creates the span wrapping one attempt of an outbound call.
pub fn call_span(kind: CallKind, attempt: u8) -> Span {
	tracing::info_span!("pet_store.upstream", call = kind.as_str(), attempt)
}
