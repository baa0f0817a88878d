//! Shared application state handed to every handler.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{_prelude::*, upstream::UpstreamClient};

/// State cloned into each actix worker.
#[derive(Clone, Debug)]
pub struct AppState {
	/// Upstream client used by read endpoints.
	pub upstream: UpstreamClient,
	next_id: Arc<AtomicU64>,
}
impl AppState {
	/// Wraps the upstream client; synthesized pet ids start at 1.
	pub fn new(upstream: UpstreamClient) -> Self {
		Self { upstream, next_id: Arc::new(AtomicU64::new(1)) }
	}

	/// Hands out the next id for an echoed create request.
	pub fn next_pet_id(&self) -> u64 {
		self.next_id.fetch_add(1, Ordering::Relaxed)
	}
}
