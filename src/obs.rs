//! Observability helpers for token exchanges and upstream calls.
//!
//! - Spans named `pet_store.upstream` carry the `call` label and the 1-based `attempt`.
//! - Enable the `metrics` feature to increment the `pet_store_upstream_total` counter for every
//!   attempt/success/retry/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Outbound calls observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials exchange against the token endpoint.
	Token,
	/// `GET /animals`.
	ListAnimals,
	/// `GET /animals/{id}`.
	GetAnimal,
	/// `GET /types`.
	ListTypes,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Token => "token",
			CallKind::ListAnimals => "list_animals",
			CallKind::GetAnimal => "get_animal",
			CallKind::ListTypes => "list_types",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a call helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Upstream answered `401` and the call is being re-issued with a fresh token.
	Retry,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Retry => "retry",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
