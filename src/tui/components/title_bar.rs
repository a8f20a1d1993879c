//! # TitleBar Component
//!
//! Top status bar showing the active resolver, the current status message,
//! and a spinner while the one-shot location fetch is in flight.
//!
//! TitleBar is purely presentational — it receives all data as props and has
//! no internal state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar<'a> {
    pub resolver_name: &'a str,
    pub status_message: &'a str,
    pub is_locating: bool,
    pub spinner_frame: usize,
}

fn title_text(
    resolver_name: &str,
    status_message: &str,
    is_locating: bool,
    spinner_frame: usize,
) -> String {
    let base = format!("Pinpoint (resolver: {resolver_name})");
    let mut text = if status_message.is_empty() {
        base
    } else {
        format!("{base} | {status_message}")
    };
    if is_locating {
        let frame = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        text.push(' ');
        text.push(frame);
    }
    text
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = title_text(
            self.resolver_name,
            self.status_message,
            self.is_locating,
            self.spinner_frame,
        );
        frame.render_widget(Span::raw(text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_text_with_status() {
        assert_eq!(
            title_text("nominatim", "Locating...", false, 0),
            "Pinpoint (resolver: nominatim) | Locating..."
        );
    }

    #[test]
    fn test_title_text_without_status() {
        assert_eq!(
            title_text("nominatim", "", false, 0),
            "Pinpoint (resolver: nominatim)"
        );
    }

    #[test]
    fn test_title_text_spinner_wraps_around() {
        let a = title_text("nominatim", "Locating...", true, 0);
        let b = title_text("nominatim", "Locating...", true, SPINNER_FRAMES.len());
        assert_eq!(a, b);
    }
}
