//! # Application State
//!
//! Core screen state for Pinpoint. This module contains domain logic only -
//! no TUI-specific types. Presentation state (camera, scroll offsets) lives
//! in the `tui` module.
//!
//! ```text
//! App
//! ├── resolver: Arc<dyn AddressResolver>   // reverse geocoding backend
//! ├── locator: Arc<dyn LocationProvider>   // last-known-position source
//! ├── phase: Phase                         // AwaitingPermission | Active
//! ├── permission: PermissionStatus         // gate status as last reported
//! ├── position: Option<Coordinate>         // user position, absent until fetched
//! ├── address: Option<String>              // resolved user address
//! ├── position_generation: u64             // stale-resolution fence
//! ├── markers: Vec<Marker>                 // append-only, insertion order
//! ├── status_message: String               // status bar text
//! └── is_locating: bool                    // location fetch in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use uuid::Uuid;

use crate::geo::types::Coordinate;
use crate::geo::{AddressResolver, LocationProvider};

/// Substituted when the location provider has no fix.
pub const FALLBACK_POSITION: Coordinate = Coordinate::new(37.4221, -122.0841);

/// Rendered wherever an address lookup came back empty or failed.
pub const NO_ADDRESS_FOUND: &str = "No address found";

/// Last reported status of the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    NotDetermined,
    Granted,
    Denied,
}

/// Screen lifecycle phase. `Active` is terminal: once location and map
/// logic start, nothing transitions back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingPermission,
    Active,
}

/// A user-placed pin. Created on map click with a pending address; the
/// address is written exactly once when resolution completes. Markers are
/// never mutated afterwards, never deleted, and never reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: Uuid,
    pub position: Coordinate,
    /// `None` while resolution is in flight.
    pub address: Option<String>,
}

impl Marker {
    /// The label to render for this marker right now.
    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or("resolving address...")
    }
}

pub struct App {
    pub resolver: Arc<dyn AddressResolver>,
    pub locator: Arc<dyn LocationProvider>,
    pub phase: Phase,
    pub permission: PermissionStatus,
    pub position: Option<Coordinate>,
    pub address: Option<String>,
    /// Bumped on every position change. Address resolutions carry the
    /// generation they were started for; completions with a stale
    /// generation are dropped instead of racing to overwrite state.
    pub position_generation: u64,
    pub markers: Vec<Marker>,
    pub status_message: String,
    /// True between the one-shot location request and its completion.
    pub is_locating: bool,
}

impl App {
    pub fn new(resolver: Arc<dyn AddressResolver>, locator: Arc<dyn LocationProvider>) -> Self {
        Self {
            resolver,
            locator,
            phase: Phase::AwaitingPermission,
            permission: PermissionStatus::NotDetermined,
            position: None,
            address: None,
            position_generation: 0,
            markers: Vec::new(),
            status_message: String::from("Location permission required"),
            is_locating: false,
        }
    }

    /// The address shown for the user position: meaningful only once a
    /// position is present.
    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or("resolving address...")
    }
}
