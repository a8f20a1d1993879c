//! # Banner Component
//!
//! Fixed bottom banner. Whenever at least one marker exists it shows the
//! address of the most recently appended marker; before that it shows a
//! usage hint.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::Marker;
use crate::tui::component::Component;
use crate::tui::components::fit_width;

pub struct Banner<'a> {
    pub last_marker: Option<&'a Marker>,
}

/// The banner line for the current marker list tail.
fn banner_text(last_marker: Option<&Marker>) -> String {
    match last_marker {
        Some(marker) => format!("Last marker address: {}", marker.display_address()),
        None => String::from("Click the map to drop a pin"),
    }
}

impl Component for Banner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.last_marker.is_some() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::styled(banner_text(self.last_marker), style);
        let inner_width = area.width.saturating_sub(2);
        let paragraph = Paragraph::new(fit_width(&line, inner_width)).block(Block::bordered());
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::types::Coordinate;
    use uuid::Uuid;

    #[test]
    fn test_banner_shows_last_marker_address() {
        let marker = Marker {
            id: Uuid::new_v4(),
            position: Coordinate::new(10.0, 20.0),
            address: Some("123 Main St".to_string()),
        };
        assert_eq!(
            banner_text(Some(&marker)),
            "Last marker address: 123 Main St"
        );
    }

    #[test]
    fn test_banner_shows_placeholder_while_resolving() {
        let marker = Marker {
            id: Uuid::new_v4(),
            position: Coordinate::new(10.0, 20.0),
            address: None,
        };
        assert_eq!(
            banner_text(Some(&marker)),
            "Last marker address: resolving address..."
        );
    }

    #[test]
    fn test_banner_hint_without_markers() {
        assert_eq!(banner_text(None), "Click the map to drop a pin");
    }
}
