use std::fmt;

use async_trait::async_trait;

use super::types::Coordinate;

/// Errors that can occur during a reverse-geocoding lookup.
///
/// Callers can distinguish "the backend had no address for this point"
/// (`Ok(None)` from [`AddressResolver::resolve`]) from "the lookup itself
/// failed" (`Err(GeocodeError)`), even though both currently render as the
/// same placeholder string.
#[derive(Debug)]
pub enum GeocodeError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the backend's response.
    Parse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Network(msg) => write!(f, "network error: {msg}"),
            GeocodeError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            GeocodeError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GeocodeError {}

/// Reverse-geocodes a coordinate to a best-effort human-readable address.
///
/// `Ok(Some(line))` carries the first candidate's formatted address line.
/// `Ok(None)` means the backend answered but had no address for the point.
/// Every call performs a fresh lookup: no retry, no timeout, no caching.
/// Concurrent calls are independent with no ordering guarantee.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Returns the name of the resolver backend.
    fn name(&self) -> &str;

    /// Looks up the address for the given coordinate.
    async fn resolve(&self, position: Coordinate) -> Result<Option<String>, GeocodeError>;
}
