//! # Geographic Services
//!
//! Provider traits and HTTP implementations for the two external lookups the
//! screen depends on:
//!
//! - [`resolver::AddressResolver`]: coordinate → human-readable address
//!   (reverse geocoding)
//! - [`locate::LocationProvider`]: one-shot last-known position
//!
//! Both are unreliable and treated as opaque: any failure surfaces as a
//! typed error, and the orchestration layer decides what to render.

pub mod locate;
pub mod providers;
pub mod resolver;
pub mod types;

pub use locate::{LocateError, LocationProvider, NullLocator};
pub use providers::{IpApiLocator, NominatimResolver};
pub use resolver::{AddressResolver, GeocodeError};
pub use types::Coordinate;
