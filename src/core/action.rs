//! # Actions
//!
//! Everything that can happen on the screen becomes an `Action`.
//! User grants location access? That's `Action::PermissionGranted`.
//! A background lookup finishes? That's `Action::MarkerAddressResolved`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the event loop must perform. No I/O
//! happens here — spawning tasks and driving the camera is the loop's job.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed a sequence of actions to a fresh
//! `App` and assert on the resulting state and effects.

use log::debug;
use uuid::Uuid;

use crate::core::state::{App, FALLBACK_POSITION, Marker, NO_ADDRESS_FOUND, PermissionStatus, Phase};
use crate::geo::types::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The permission gate reported a grant.
    PermissionGranted,
    /// The permission gate reported a denial.
    PermissionDenied,
    /// The one-shot location fetch completed. `None` covers both "provider
    /// has no fix" and "fetch failed" — the distinction was already logged
    /// where it happened.
    LocationFetched(Option<Coordinate>),
    /// The user-position address resolution finished. `None` means the
    /// lookup came back empty or failed.
    UserAddressResolved {
        generation: u64,
        address: Option<String>,
    },
    /// The user clicked the map at a geographic coordinate.
    MapClicked(Coordinate),
    /// A marker's address resolution finished.
    MarkerAddressResolved {
        id: Uuid,
        address: Option<String>,
    },
    Quit,
}

/// I/O the event loop must perform after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start the one-shot last-known-location fetch.
    RequestLocation,
    /// The user position changed: resolve its address (tagged with the
    /// generation the resolution belongs to) and pan the camera to it.
    PositionChanged {
        generation: u64,
        position: Coordinate,
    },
    /// Resolve the address of a freshly placed marker.
    ResolveMarkerAddress {
        id: Uuid,
        position: Coordinate,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::PermissionGranted => {
            if app.phase != Phase::AwaitingPermission {
                // Active is terminal; repeated grants change nothing
                return Effect::None;
            }
            app.permission = PermissionStatus::Granted;
            app.phase = Phase::Active;
            app.is_locating = true;
            app.status_message = String::from("Locating...");
            Effect::RequestLocation
        }
        Action::PermissionDenied => {
            if app.phase == Phase::AwaitingPermission {
                app.permission = PermissionStatus::Denied;
                app.status_message = String::from("Location permission denied");
            }
            Effect::None
        }
        Action::LocationFetched(fix) => {
            if app.phase != Phase::Active {
                return Effect::None;
            }
            app.is_locating = false;
            // Absent fix silently substitutes the fallback coordinate
            let position = fix.unwrap_or(FALLBACK_POSITION);
            app.position = Some(position);
            app.address = None;
            app.position_generation += 1;
            app.status_message = format!("Position: {position}");
            Effect::PositionChanged {
                generation: app.position_generation,
                position,
            }
        }
        Action::UserAddressResolved {
            generation,
            address,
        } => {
            if generation != app.position_generation {
                debug!(
                    "Dropping stale address resolution (generation {} != {})",
                    generation, app.position_generation
                );
                return Effect::None;
            }
            app.address = Some(address.unwrap_or_else(|| NO_ADDRESS_FOUND.to_string()));
            Effect::None
        }
        Action::MapClicked(position) => {
            if app.phase != Phase::Active {
                return Effect::None;
            }
            // Slot is reserved at click time so marker order always equals
            // click order, regardless of how the resolutions race
            let id = Uuid::new_v4();
            app.markers.push(Marker {
                id,
                position,
                address: None,
            });
            Effect::ResolveMarkerAddress { id, position }
        }
        Action::MarkerAddressResolved { id, address } => {
            match app.markers.iter_mut().find(|m| m.id == id) {
                Some(marker) => {
                    marker.address =
                        Some(address.unwrap_or_else(|| NO_ADDRESS_FOUND.to_string()));
                }
                None => debug!("Address resolved for unknown marker {id}"),
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn granted_app() -> App {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::PermissionGranted), Effect::RequestLocation);
        app
    }

    #[test]
    fn test_permission_granted_enters_active_and_requests_location() {
        let mut app = test_app();
        let effect = update(&mut app, Action::PermissionGranted);
        assert_eq!(effect, Effect::RequestLocation);
        assert_eq!(app.phase, Phase::Active);
        assert_eq!(app.permission, PermissionStatus::Granted);
        assert!(app.is_locating);
    }

    #[test]
    fn test_permission_denied_blocks_location_and_map_logic() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::PermissionDenied), Effect::None);
        assert_eq!(app.phase, Phase::AwaitingPermission);
        assert_eq!(app.permission, PermissionStatus::Denied);

        // Map clicks while the gate is closed do nothing
        let click = Action::MapClicked(Coordinate::new(10.0, 20.0));
        assert_eq!(update(&mut app, click), Effect::None);
        assert!(app.markers.is_empty());

        // Location results while the gate is closed do nothing
        let fetch = Action::LocationFetched(Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(update(&mut app, fetch), Effect::None);
        assert!(app.position.is_none());
    }

    #[test]
    fn test_denied_then_granted_still_activates() {
        let mut app = test_app();
        update(&mut app, Action::PermissionDenied);
        let effect = update(&mut app, Action::PermissionGranted);
        assert_eq!(effect, Effect::RequestLocation);
        assert_eq!(app.phase, Phase::Active);
    }

    #[test]
    fn test_repeated_grant_in_active_is_ignored() {
        let mut app = granted_app();
        assert_eq!(update(&mut app, Action::PermissionGranted), Effect::None);
    }

    #[test]
    fn test_absent_fix_substitutes_fallback_exactly() {
        let mut app = granted_app();
        let effect = update(&mut app, Action::LocationFetched(None));
        assert_eq!(app.position, Some(FALLBACK_POSITION));
        assert_eq!(app.position.unwrap().lat, 37.4221);
        assert_eq!(app.position.unwrap().lon, -122.0841);
        assert!(!app.is_locating);
        assert_eq!(
            effect,
            Effect::PositionChanged {
                generation: 1,
                position: FALLBACK_POSITION,
            }
        );
    }

    #[test]
    fn test_fix_sets_position_and_triggers_resolution_and_pan() {
        let mut app = granted_app();
        let here = Coordinate::new(51.5074, -0.1278);
        let effect = update(&mut app, Action::LocationFetched(Some(here)));
        assert_eq!(app.position, Some(here));
        assert_eq!(
            effect,
            Effect::PositionChanged {
                generation: 1,
                position: here,
            }
        );
    }

    #[test]
    fn test_user_address_resolved_stores_first_candidate() {
        let mut app = granted_app();
        update(&mut app, Action::LocationFetched(None));
        update(
            &mut app,
            Action::UserAddressResolved {
                generation: 1,
                address: Some("1600 Amphitheatre Pkwy".to_string()),
            },
        );
        assert_eq!(app.address.as_deref(), Some("1600 Amphitheatre Pkwy"));
    }

    #[test]
    fn test_user_address_failure_renders_placeholder() {
        let mut app = granted_app();
        update(&mut app, Action::LocationFetched(None));
        update(
            &mut app,
            Action::UserAddressResolved {
                generation: 1,
                address: None,
            },
        );
        assert_eq!(app.address.as_deref(), Some(NO_ADDRESS_FOUND));
    }

    #[test]
    fn test_stale_user_address_resolution_is_dropped() {
        let mut app = granted_app();
        update(&mut app, Action::LocationFetched(None));
        // A second position change bumps the generation to 2
        update(
            &mut app,
            Action::LocationFetched(Some(Coordinate::new(48.8566, 2.3522))),
        );
        // The resolution started for generation 1 must not win
        update(
            &mut app,
            Action::UserAddressResolved {
                generation: 1,
                address: Some("stale address".to_string()),
            },
        );
        assert!(app.address.is_none());
        update(
            &mut app,
            Action::UserAddressResolved {
                generation: 2,
                address: Some("current address".to_string()),
            },
        );
        assert_eq!(app.address.as_deref(), Some("current address"));
    }

    #[test]
    fn test_click_reserves_marker_slot_immediately() {
        let mut app = granted_app();
        let effect = update(&mut app, Action::MapClicked(Coordinate::new(10.0, 20.0)));
        assert_eq!(app.markers.len(), 1);
        assert_eq!(app.markers[0].position, Coordinate::new(10.0, 20.0));
        assert!(app.markers[0].address.is_none());
        let Effect::ResolveMarkerAddress { id, position } = effect else {
            panic!("expected ResolveMarkerAddress, got {effect:?}");
        };
        assert_eq!(id, app.markers[0].id);
        assert_eq!(position, Coordinate::new(10.0, 20.0));
    }

    #[test]
    fn test_click_then_resolution_fills_marker() {
        let mut app = granted_app();
        let effect = update(&mut app, Action::MapClicked(Coordinate::new(10.0, 20.0)));
        let Effect::ResolveMarkerAddress { id, .. } = effect else {
            panic!("expected ResolveMarkerAddress");
        };
        update(
            &mut app,
            Action::MarkerAddressResolved {
                id,
                address: Some("123 Main St".to_string()),
            },
        );
        assert_eq!(app.markers.len(), 1);
        assert_eq!(app.markers[0].address.as_deref(), Some("123 Main St"));
    }

    #[test]
    fn test_click_then_failed_resolution_uses_placeholder() {
        let mut app = granted_app();
        let effect = update(&mut app, Action::MapClicked(Coordinate::new(10.0, 20.0)));
        let Effect::ResolveMarkerAddress { id, .. } = effect else {
            panic!("expected ResolveMarkerAddress");
        };
        update(&mut app, Action::MarkerAddressResolved { id, address: None });
        assert_eq!(app.markers[0].address.as_deref(), Some(NO_ADDRESS_FOUND));
    }

    #[test]
    fn test_markers_keep_click_order_when_resolutions_race() {
        let mut app = granted_app();
        let first = update(&mut app, Action::MapClicked(Coordinate::new(1.0, 1.0)));
        let second = update(&mut app, Action::MapClicked(Coordinate::new(2.0, 2.0)));
        let Effect::ResolveMarkerAddress { id: first_id, .. } = first else {
            panic!("expected ResolveMarkerAddress");
        };
        let Effect::ResolveMarkerAddress { id: second_id, .. } = second else {
            panic!("expected ResolveMarkerAddress");
        };

        // Second lookup completes before the first
        update(
            &mut app,
            Action::MarkerAddressResolved {
                id: second_id,
                address: Some("second".to_string()),
            },
        );
        update(
            &mut app,
            Action::MarkerAddressResolved {
                id: first_id,
                address: Some("first".to_string()),
            },
        );

        assert_eq!(app.markers.len(), 2);
        assert_eq!(app.markers[0].address.as_deref(), Some("first"));
        assert_eq!(app.markers[1].address.as_deref(), Some("second"));
    }

    #[test]
    fn test_markers_are_append_only_across_unrelated_actions() {
        let mut app = granted_app();
        for i in 0..5 {
            let effect = update(&mut app, Action::MapClicked(Coordinate::new(i as f64, 0.0)));
            let Effect::ResolveMarkerAddress { id, .. } = effect else {
                panic!("expected ResolveMarkerAddress");
            };
            update(
                &mut app,
                Action::MarkerAddressResolved {
                    id,
                    address: Some(format!("addr {i}")),
                },
            );
        }
        // Unrelated events must never shorten or reorder the list
        update(
            &mut app,
            Action::LocationFetched(Some(Coordinate::new(9.0, 9.0))),
        );
        update(
            &mut app,
            Action::UserAddressResolved {
                generation: 1,
                address: Some("somewhere".to_string()),
            },
        );
        assert_eq!(app.address.as_deref(), Some("somewhere"));
        assert_eq!(app.markers.len(), 5);
        for (i, marker) in app.markers.iter().enumerate() {
            assert_eq!(marker.position.lat, i as f64);
            assert_eq!(marker.address.as_deref(), Some(format!("addr {i}").as_str()));
        }
    }

    #[test]
    fn test_resolution_for_unknown_marker_is_ignored() {
        let mut app = granted_app();
        update(
            &mut app,
            Action::MarkerAddressResolved {
                id: Uuid::new_v4(),
                address: Some("ghost".to_string()),
            },
        );
        assert!(app.markers.is_empty());
    }

    #[test]
    fn test_quit_action_maps_to_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
