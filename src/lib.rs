//! Blocking client for the MLflow tracking REST API.
//!
//! [`backend::Server`] implements the [`Client`] trait on top of a small
//! request dispatcher that flattens structured query parameters and applies
//! a uniform response policy: the body of a `200` is deserialized, any other
//! status is reported as `Ok(None)`.

pub mod api;
pub mod backend;
pub mod tracking;

pub use api::client::Client;
pub use api::error::{Error, Result};
pub use api::id::{ExperimentId, RunId};

fn since_epoch() -> std::time::Duration {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
}

/// Current wall-clock time in epoch seconds, used for run start and end times.
pub fn timestamp() -> i64 {
    since_epoch().as_secs() as i64
}

/// Current wall-clock time in epoch milliseconds, used for metric timestamps.
pub fn timestamp_millis() -> i64 {
    since_epoch().as_millis() as i64
}
