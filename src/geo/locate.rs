use std::fmt;

use async_trait::async_trait;

use super::types::Coordinate;

/// Errors that can occur while fetching a last-known position.
#[derive(Debug)]
pub enum LocateError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the service's response.
    Parse(String),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::Network(msg) => write!(f, "network error: {msg}"),
            LocateError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            LocateError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for LocateError {}

/// Supplies a one-shot last-known position.
///
/// `Ok(None)` means the provider answered but has no fix. The call is
/// fire-and-forget from the screen's perspective: the event loop substitutes
/// a fallback coordinate for an absent or failed result, and an answer that
/// never arrives leaves the position absent.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns the name of the location provider.
    fn name(&self) -> &str;

    /// Fetches the last known position, if any.
    async fn last_known(&self) -> Result<Option<Coordinate>, LocateError>;
}

/// A provider that never has a fix. Selected with `--locator none`;
/// drives the screen straight down the fallback-coordinate path.
pub struct NullLocator;

#[async_trait]
impl LocationProvider for NullLocator {
    fn name(&self) -> &str {
        "none"
    }

    async fn last_known(&self) -> Result<Option<Coordinate>, LocateError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_locator_reports_no_fix() {
        let fix = NullLocator.last_known().await.unwrap();
        assert!(fix.is_none());
    }
}
