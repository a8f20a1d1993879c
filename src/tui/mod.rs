//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard/mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (camera pan in flight, location fetch spinner): draws
//!   every ~80ms for a smooth transition.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Concurrency
//!
//! All state lives on this thread. Background tokio tasks (the one-shot
//! location fetch, each address resolution) never touch state — they send
//! `Action`s over an mpsc channel that the loop drains between frames.
//! Tasks are fire-and-forget: no timeouts, no retries; a task that never
//! completes simply leaves its slot unresolved.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Instant;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, FALLBACK_POSITION, Phase};
use crate::geo::types::Coordinate;
use crate::geo::{AddressResolver, IpApiLocator, LocationProvider, NominatimResolver, NullLocator};
use crate::tui::component::EventHandler;
use crate::tui::components::{MapViewState, MarkerListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core screen logic)
pub struct TuiState {
    pub map_view: MapViewState,
    pub marker_list: MarkerListState,
}

impl TuiState {
    pub fn new(camera_span: f64) -> Self {
        Self {
            // Fallback-camera framing until a position arrives
            map_view: MapViewState::new(FALLBACK_POSITION, camera_span),
            marker_list: MarkerListState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture is required: map taps arrive as click events
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build the address resolver from a resolved config.
pub fn build_resolver(config: &ResolvedConfig) -> Arc<dyn AddressResolver> {
    Arc::new(NominatimResolver::new(
        config.nominatim_base_url.clone(),
        config.nominatim_user_agent.clone(),
    ))
}

/// Build the location provider from a resolved config's locator name.
pub fn build_locator(config: &ResolvedConfig) -> Arc<dyn LocationProvider> {
    match config.locator.as_str() {
        "none" => Arc::new(NullLocator),
        _ => {
            // Default to the IP-geolocation provider
            Arc::new(IpApiLocator::new(config.ip_api_base_url.clone()))
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let resolver = build_resolver(&config);
    let locator = build_locator(&config);
    let mut app = App::new(resolver, locator);
    let mut tui = TuiState::new(config.camera_span);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Advance the camera pan before drawing
        tui.map_view.tick(Instant::now());
        let animating = tui.map_view.is_animating() || app.is_locating;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of phase
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            match app.phase {
                Phase::AwaitingPermission => {
                    // Only the permission prompt is live; everything else
                    // (clicks, scrolls, camera keys) is ignored
                    let action = match event {
                        TuiEvent::InputChar('y') | TuiEvent::Submit => Action::PermissionGranted,
                        TuiEvent::InputChar('n') => Action::PermissionDenied,
                        TuiEvent::InputChar('q') => Action::Quit,
                        _ => continue,
                    };
                    let effect = update(&mut app, action);
                    if apply_effect(&app, &mut tui, effect, &tx) {
                        should_quit = true;
                    }
                }
                Phase::Active => match event {
                    TuiEvent::InputChar('q') => {
                        if update(&mut app, Action::Quit) == Effect::Quit {
                            should_quit = true;
                        }
                    }
                    TuiEvent::InputChar('+') | TuiEvent::InputChar('=') => {
                        tui.map_view.zoom_in();
                    }
                    TuiEvent::InputChar('-') => {
                        tui.map_view.zoom_out();
                    }
                    TuiEvent::InputChar('c') => {
                        // Re-center on the user position, if there is one
                        if let Some(position) = app.position {
                            tui.map_view.pan_to(position, Instant::now());
                        }
                    }
                    TuiEvent::CursorUp => tui.map_view.nudge(1.0, 0.0),
                    TuiEvent::CursorDown => tui.map_view.nudge(-1.0, 0.0),
                    TuiEvent::CursorLeft => tui.map_view.nudge(0.0, -1.0),
                    TuiEvent::CursorRight => tui.map_view.nudge(0.0, 1.0),
                    TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
                        tui.marker_list.handle_event(&event);
                    }
                    TuiEvent::MouseScroll { col, row, up } => {
                        // Wheel over the panel scrolls it; over the map it zooms
                        if tui.marker_list.contains(col, row) {
                            tui.marker_list.handle_event(&event);
                        } else if up {
                            tui.map_view.zoom_in();
                        } else {
                            tui.map_view.zoom_out();
                        }
                    }
                    TuiEvent::MouseClick(col, row) => {
                        if let Some(position) = tui.map_view.coordinate_at(col, row) {
                            debug!("Map tap at ({col}, {row}) → {position}");
                            let effect = update(&mut app, Action::MapClicked(position));
                            if apply_effect(&app, &mut tui, effect, &tx) {
                                should_quit = true;
                            }
                        }
                    }
                    _ => {}
                },
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (location fix, resolved addresses)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(&app, &mut tui, effect, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Perform the I/O an `update()` asked for. Returns true on quit.
fn apply_effect(app: &App, tui: &mut TuiState, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => {}
        Effect::RequestLocation => {
            spawn_location_fetch(app.locator.clone(), tx.clone());
        }
        Effect::PositionChanged {
            generation,
            position,
        } => {
            // Reactive pair: resolve the new position's address and pan the
            // camera to it over the fixed transition
            tui.map_view.pan_to(position, Instant::now());
            spawn_address_resolution(
                app.resolver.clone(),
                AddressFor::User { generation },
                position,
                tx.clone(),
            );
        }
        Effect::ResolveMarkerAddress { id, position } => {
            spawn_address_resolution(
                app.resolver.clone(),
                AddressFor::Marker { id },
                position,
                tx.clone(),
            );
        }
        Effect::Quit => return true,
    }
    false
}

/// What a finished address resolution should be applied to.
#[derive(Debug)]
enum AddressFor {
    User { generation: u64 },
    Marker { id: Uuid },
}

fn spawn_location_fetch(locator: Arc<dyn LocationProvider>, tx: mpsc::Sender<Action>) {
    info!("Spawning one-shot location fetch ({})", locator.name());
    tokio::spawn(async move {
        let fix = match locator.last_known().await {
            Ok(Some(position)) => Some(position),
            Ok(None) => {
                info!("Location provider has no fix, falling back");
                None
            }
            Err(e) => {
                // Failure is silently substituted with the fallback position
                warn!("Location fetch failed: {e}");
                None
            }
        };
        if tx.send(Action::LocationFetched(fix)).is_err() {
            warn!("Failed to send location fix: receiver dropped");
        }
    });
}

fn spawn_address_resolution(
    resolver: Arc<dyn AddressResolver>,
    target: AddressFor,
    position: Coordinate,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning address resolution for {position} ({target:?})");
    tokio::spawn(async move {
        let address = match resolver.resolve(position).await {
            Ok(Some(line)) => Some(line),
            Ok(None) => {
                // Backend answered but knows no address for this point
                debug!("No address for {position}");
                None
            }
            Err(e) => {
                warn!("Address lookup failed for {position}: {e}");
                None
            }
        };
        let action = match target {
            AddressFor::User { generation } => Action::UserAddressResolved {
                generation,
                address,
            },
            AddressFor::Marker { id } => Action::MarkerAddressResolved { id, address },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send resolved address: receiver dropped");
        }
    });
}
