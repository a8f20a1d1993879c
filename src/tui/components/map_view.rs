//! # MapView Component
//!
//! The map canvas: world outline, user position, markers, and the camera.
//!
//! ## Responsibilities
//!
//! - Project geographic coordinates into the terminal canvas
//! - Animate the camera to a new center over a fixed transition
//! - Hit testing: translate a mouse click back into a `Coordinate`
//!
//! ## Architecture
//!
//! `MapView` is a transient component (created each frame) that wraps
//! `&'a mut MapViewState` (persistent camera state) and the screen state as
//! props. During render it caches the projection bounds and the inner
//! drawing rect so `coordinate_at` can invert the projection for clicks
//! between frames.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::Block;

use crate::core::state::Marker;
use crate::geo::types::Coordinate;
use crate::tui::component::Component;

/// Camera pan transition length.
pub const CAMERA_PAN_MS: u64 = 1000;

/// Camera span clamps, in degrees of latitude.
const SPAN_MIN: f64 = 0.002;
const SPAN_MAX: f64 = 160.0;

/// Zoom factor per wheel notch / keypress.
const ZOOM_STEP: f64 = 0.8;

/// An in-flight camera pan. A new pan replaces this one, starting from
/// whatever center the interpolation has reached.
struct CameraPan {
    from: Coordinate,
    to: Coordinate,
    started: Instant,
}

/// Persistent camera and projection state for the map view.
/// Must be persisted in the parent TuiState.
pub struct MapViewState {
    /// Current camera center.
    pub center: Coordinate,
    /// Camera height in degrees of latitude. Smaller = closer.
    pub span: f64,
    animation: Option<CameraPan>,
    /// Inner drawing rect from the last render, for hit testing.
    inner: Rect,
    /// Projection bounds from the last render: (west, east, south, north).
    bounds: (f64, f64, f64, f64),
}

impl MapViewState {
    pub fn new(center: Coordinate, span: f64) -> Self {
        Self {
            center,
            span,
            animation: None,
            inner: Rect::default(),
            bounds: (0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Start an animated pan to `target`. Replaces any in-flight pan,
    /// starting from the current interpolated center.
    pub fn pan_to(&mut self, target: Coordinate, now: Instant) {
        self.animation = Some(CameraPan {
            from: self.center,
            to: target,
            started: now,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the pan animation. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        let Some(pan) = &self.animation else {
            return;
        };
        let elapsed = now.duration_since(pan.started).as_millis() as f64;
        let t = elapsed / CAMERA_PAN_MS as f64;
        if t >= 1.0 {
            self.center = pan.to;
            self.animation = None;
        } else {
            let eased = smoothstep(t);
            self.center = Coordinate::new(
                lerp(pan.from.lat, pan.to.lat, eased),
                lerp(pan.from.lon, pan.to.lon, eased),
            );
        }
    }

    pub fn zoom_in(&mut self) {
        self.span = (self.span * ZOOM_STEP).clamp(SPAN_MIN, SPAN_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.span = (self.span / ZOOM_STEP).clamp(SPAN_MIN, SPAN_MAX);
    }

    /// Nudge the camera center by a fraction of the visible span.
    /// Cancels an in-flight pan — manual input wins over animation.
    pub fn nudge(&mut self, dlat: f64, dlon: f64) {
        self.animation = None;
        let (west, east, south, north) = self.bounds;
        let lon_span = if east > west { east - west } else { self.span };
        let lat_span = if north > south { north - south } else { self.span };
        self.center = Coordinate::new(
            self.center.lat + dlat * lat_span * 0.1,
            self.center.lon + dlon * lon_span * 0.1,
        );
    }

    /// Inverts the projection: which geographic coordinate is under the
    /// given terminal cell? `None` when the cell is outside the map.
    pub fn coordinate_at(&self, col: u16, row: u16) -> Option<Coordinate> {
        let inner = self.inner;
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        if col < inner.x
            || col >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return None;
        }
        let (west, east, south, north) = self.bounds;
        let fx = (f64::from(col - inner.x) + 0.5) / f64::from(inner.width);
        let fy = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height);
        // Row 0 is the top of the viewport, i.e. the northern edge
        Some(Coordinate::new(
            north - fy * (north - south),
            west + fx * (east - west),
        ))
    }

    /// Compute and cache the projection for the given inner rect.
    /// Terminal cells are roughly twice as tall as wide, so the longitude
    /// span is stretched to keep shapes undistorted.
    fn project(&mut self, inner: Rect) {
        self.inner = inner;
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let aspect = (f64::from(inner.width) / 2.0) / f64::from(inner.height);
        let lat_span = self.span;
        let lon_span = lat_span * aspect;
        self.bounds = (
            self.center.lon - lon_span / 2.0,
            self.center.lon + lon_span / 2.0,
            self.center.lat - lat_span / 2.0,
            self.center.lat + lat_span / 2.0,
        );
    }
}

/// Transient render wrapper: persistent state + per-frame props.
pub struct MapView<'a> {
    pub state: &'a mut MapViewState,
    pub position: Option<Coordinate>,
    pub markers: &'a [Marker],
}

impl Component for MapView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title("Map");
        let inner = block.inner(area);
        self.state.project(inner);
        let (west, east, south, north) = self.state.bounds;

        let position = self.position;
        let markers = self.markers;

        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([west, east])
            .y_bounds([south, north])
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });
                ctx.layer();
                for marker in markers {
                    ctx.print(
                        marker.position.lon,
                        marker.position.lat,
                        Span::styled("●", Style::default().fg(Color::Red)),
                    );
                }
                if let Some(pos) = position {
                    ctx.print(
                        pos.lon,
                        pos.lat,
                        Span::styled("◎", Style::default().fg(Color::Cyan)),
                    );
                }
            });

        frame.render_widget(canvas, area);
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic ease-in-out.
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn projected_state() -> MapViewState {
        let mut state = MapViewState::new(Coordinate::new(0.0, 0.0), 10.0);
        // 40x20 inner rect at origin: aspect = (40/2)/20 = 1.0, so a square
        // 10°x10° viewport centered on (0, 0)
        state.project(Rect::new(0, 0, 40, 20));
        state
    }

    #[test]
    fn test_project_centers_bounds_on_camera() {
        let state = projected_state();
        let (west, east, south, north) = state.bounds;
        assert_eq!((west, east), (-5.0, 5.0));
        assert_eq!((south, north), (-5.0, 5.0));
    }

    #[test]
    fn test_coordinate_at_center_cell() {
        let state = projected_state();
        // Middle of the rect should be (close to) the camera center
        let hit = state.coordinate_at(20, 10).unwrap();
        assert!(hit.lat.abs() < 0.5);
        assert!(hit.lon.abs() < 0.5);
    }

    #[test]
    fn test_coordinate_at_corners_map_to_bounds() {
        let state = projected_state();
        let top_left = state.coordinate_at(0, 0).unwrap();
        assert!(top_left.lon < -4.0 && top_left.lat > 4.0);
        let bottom_right = state.coordinate_at(39, 19).unwrap();
        assert!(bottom_right.lon > 4.0 && bottom_right.lat < -4.0);
    }

    #[test]
    fn test_coordinate_at_outside_rect_is_none() {
        let state = projected_state();
        assert!(state.coordinate_at(40, 10).is_none());
        assert!(state.coordinate_at(20, 20).is_none());
    }

    #[test]
    fn test_pan_interpolates_and_completes() {
        let mut state = projected_state();
        let start = Instant::now();
        state.pan_to(Coordinate::new(10.0, 10.0), start);
        assert!(state.is_animating());

        state.tick(start + Duration::from_millis(500));
        // Halfway through the 1000ms pan, smoothstep(0.5) = 0.5
        assert!((state.center.lat - 5.0).abs() < 0.1);
        assert!(state.is_animating());

        state.tick(start + Duration::from_millis(CAMERA_PAN_MS + 1));
        assert_eq!(state.center, Coordinate::new(10.0, 10.0));
        assert!(!state.is_animating());
    }

    #[test]
    fn test_new_pan_starts_from_interpolated_center() {
        let mut state = projected_state();
        let start = Instant::now();
        state.pan_to(Coordinate::new(10.0, 0.0), start);
        state.tick(start + Duration::from_millis(500));
        let midway = state.center;

        // Replacing the pan keeps the camera where it got to
        state.pan_to(Coordinate::new(-10.0, 0.0), start + Duration::from_millis(500));
        state.tick(start + Duration::from_millis(501));
        assert!((state.center.lat - midway.lat).abs() < 0.5);
    }

    #[test]
    fn test_zoom_clamps_span() {
        let mut state = MapViewState::new(Coordinate::new(0.0, 0.0), SPAN_MAX);
        state.zoom_out();
        assert_eq!(state.span, SPAN_MAX);
        state.span = SPAN_MIN;
        state.zoom_in();
        assert_eq!(state.span, SPAN_MIN);
    }

    #[test]
    fn test_nudge_cancels_animation() {
        let mut state = projected_state();
        state.pan_to(Coordinate::new(10.0, 10.0), Instant::now());
        state.nudge(1.0, 0.0);
        assert!(!state.is_animating());
    }
}
