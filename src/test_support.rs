//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::App;
use crate::geo::locate::{LocateError, LocationProvider};
use crate::geo::resolver::{AddressResolver, GeocodeError};
use crate::geo::types::Coordinate;

/// A resolver that always returns the same address.
pub struct StaticResolver(pub Option<String>);

#[async_trait]
impl AddressResolver for StaticResolver {
    fn name(&self) -> &str {
        "static"
    }

    async fn resolve(&self, _position: Coordinate) -> Result<Option<String>, GeocodeError> {
        Ok(self.0.clone())
    }
}

/// A resolver whose lookups always fail.
pub struct FailingResolver;

#[async_trait]
impl AddressResolver for FailingResolver {
    fn name(&self) -> &str {
        "failing"
    }

    async fn resolve(&self, _position: Coordinate) -> Result<Option<String>, GeocodeError> {
        Err(GeocodeError::Network("connection refused".to_string()))
    }
}

/// A locator that always returns the same fix.
pub struct StaticLocator(pub Option<Coordinate>);

#[async_trait]
impl LocationProvider for StaticLocator {
    fn name(&self) -> &str {
        "static"
    }

    async fn last_known(&self) -> Result<Option<Coordinate>, LocateError> {
        Ok(self.0)
    }
}

/// A locator whose fetches always fail.
pub struct FailingLocator;

#[async_trait]
impl LocationProvider for FailingLocator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn last_known(&self) -> Result<Option<Coordinate>, LocateError> {
        Err(LocateError::Network("connection refused".to_string()))
    }
}

/// Creates a test App with providers that never hit the network.
pub fn test_app() -> App {
    App::new(
        Arc::new(StaticResolver(Some("123 Main St".to_string()))),
        Arc::new(StaticLocator(None)),
    )
}
