//! Client library for the [Open Notify] ISS position API.
//!
//! One GET request, one JSON answer, two coordinates converted into fixed-scale decimals:
//!
//! - `Client` for when you want to choose the endpoint, the timeout or the HTTP client,
//! - `get_position()` and `get_position_as_strings()` for a one-line call with defaults.
//!
//! There is no retry and no cache, every call hits the endpoint.
//!
//! [Open Notify]: http://open-notify.org/Open-Notify-API/
//!

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::trace;

// Re-export these modules for a shorter import path.
//
pub use client::*;
pub use config::*;
pub use error::*;
pub use position::*;

/// The HTTP client type accepted by `ClientBuilder::http_client()`
pub use reqwest::blocking::Client as HttpClient;

#[macro_use]
mod macros;

mod client;
mod config;
mod error;
mod position;

/// Public endpoint
pub const DEFAULT_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest request timeout we accept
pub const MAX_TIMEOUT: Duration = Duration::from_secs(3600);

/// Returns the current position of the International Space Station as
/// `(latitude, longitude)`, using a default client.
///
#[tracing::instrument]
pub fn get_position() -> Result<(Decimal, Decimal), IssError> {
    position_with(Client::builder())
}

/// Same as `get_position()` with both coordinates rendered in their canonical string form.
///
#[tracing::instrument]
pub fn get_position_as_strings() -> Result<(String, String), IssError> {
    let (lat, long) = get_position()?;
    Ok(Position { lat, long }.as_strings())
}

/// Build a client and fetch once, tagging errors with the stage that failed.
///
fn position_with(builder: ClientBuilder) -> Result<(Decimal, Decimal), IssError> {
    let client = builder
        .build()
        .map_err(|e| IssError::Creating(Box::new(e.into())))?;
    trace!("using {}", client.base_url());

    let pos = client
        .get_position()
        .map_err(|e| IssError::Retrieving(Box::new(e)))?;
    Ok((pos.lat, pos.long))
}

/// Returns `name/version` of this crate, also sent as `user-agent`.
///
pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
