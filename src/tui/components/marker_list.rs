//! # MarkerList Component
//!
//! Scrollable side panel listing the user position and every placed marker,
//! each labeled with its resolved address.
//!
//! `MarkerList` is a transient component (created each frame) that wraps
//! `&'a mut MarkerListState` (persistent scroll state) and the screen state
//! as props. Entries are appended in marker insertion order, which is the
//! display and iteration order of the screen state.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::Marker;
use crate::geo::types::Coordinate;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::fit_width;
use crate::tui::event::TuiEvent;

/// Scroll state for the marker list.
/// Must be persisted in the parent TuiState.
pub struct MarkerListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom as markers are appended.
    pub stick_to_bottom: bool,
    /// Outer area from the last render, for mouse-wheel routing.
    pub area: Rect,
}

impl Default for MarkerListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            area: Rect::default(),
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.area.x
            && col < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }
}

impl EventHandler for MarkerListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollPageUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_page_up();
                Some(())
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                Some(())
            }
            TuiEvent::MouseScroll { up: true, .. } => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_up();
                Some(())
            }
            TuiEvent::MouseScroll { up: false, .. } => {
                self.scroll_state.scroll_down();
                Some(())
            }
            _ => None,
        }
    }
}

/// Transient render wrapper: persistent state + per-frame props.
pub struct MarkerList<'a> {
    pub state: &'a mut MarkerListState,
    pub position: Option<Coordinate>,
    pub user_address: &'a str,
    pub markers: &'a [Marker],
}

impl MarkerList<'_> {
    /// One two-line entry per listed item: symbol + position, then address.
    fn entries(&self) -> Vec<(Line<'static>, Line<'static>)> {
        let mut entries = Vec::with_capacity(self.markers.len() + 1);
        if let Some(pos) = self.position {
            entries.push((
                Line::from(Span::styled(
                    format!("◎ You — {pos}"),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(format!("  {}", self.user_address)),
            ));
        }
        for (index, marker) in self.markers.iter().enumerate() {
            entries.push((
                Line::from(Span::styled(
                    format!("● #{} — {}", index + 1, marker.position),
                    Style::default().fg(Color::Red),
                )),
                Line::from(format!("  {}", marker.display_address())),
            ));
        }
        entries
    }
}

impl Component for MarkerList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.area = area;
        let block = Block::bordered().title("Markers");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let entries = self.entries();
        if entries.is_empty() {
            let hint = Paragraph::new("No markers yet")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, inner);
            return;
        }

        let content_width = inner.width.saturating_sub(1);
        let total_height = (entries.len() * 2) as u16;
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (head, detail) in entries {
            let head = fit_width(&head, content_width);
            let detail = fit_width(&detail, content_width);
            scroll_view.render_widget(Paragraph::new(head), Rect::new(0, y_offset, content_width, 1));
            scroll_view
                .render_widget(Paragraph::new(detail), Rect::new(0, y_offset + 1, content_width, 1));
            y_offset += 2;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn marker(lat: f64, lon: f64, address: Option<&str>) -> Marker {
        Marker {
            id: Uuid::new_v4(),
            position: Coordinate::new(lat, lon),
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let markers = vec![
            marker(1.0, 1.0, Some("first")),
            marker(2.0, 2.0, None),
            marker(3.0, 3.0, Some("third")),
        ];
        let mut state = MarkerListState::new();
        let list = MarkerList {
            state: &mut state,
            position: None,
            user_address: "",
            markers: &markers,
        };
        let entries = list.entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].0.to_string().starts_with("● #1"));
        assert_eq!(entries[1].1.to_string(), "  resolving address...");
        assert_eq!(entries[2].1.to_string(), "  third");
    }

    #[test]
    fn test_user_entry_comes_first_when_position_present() {
        let markers = vec![marker(1.0, 1.0, Some("somewhere"))];
        let mut state = MarkerListState::new();
        let list = MarkerList {
            state: &mut state,
            position: Some(Coordinate::new(37.4221, -122.0841)),
            user_address: "1600 Amphitheatre Pkwy",
            markers: &markers,
        };
        let entries = list.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].0.to_string().starts_with("◎ You"));
        assert_eq!(entries[0].1.to_string(), "  1600 Amphitheatre Pkwy");
    }

    #[test]
    fn test_page_up_releases_stick_to_bottom() {
        let mut state = MarkerListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_contains_uses_cached_area() {
        let mut state = MarkerListState::new();
        state.area = Rect::new(40, 1, 38, 20);
        assert!(state.contains(50, 10));
        assert!(!state.contains(10, 10));
        assert!(!state.contains(50, 30));
    }
}
