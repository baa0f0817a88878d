//! Pet-store HTTP API backed by the Petfinder listings service.
//!
//! Reads are proxied upstream behind a cached OAuth 2.0 client-credentials token that is
//! re-issued once whenever the upstream answers `401`. Writes are echo stubs.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]
#![recursion_limit = "256"]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod upstream;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use actix_web;
pub use reqwest;
pub use url;
// Only the binary reports through `color-eyre`.
use color_eyre as _;
#[cfg(test)] use {httpmock as _, tokio as _};
