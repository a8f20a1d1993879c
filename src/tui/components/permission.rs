//! # PermissionPrompt Component
//!
//! The only thing rendered while the screen is in `AwaitingPermission`:
//! a centered prompt asking for location access. Denial keeps the prompt
//! on screen with a note — pressing `y` re-prompts, nothing is remembered
//! across runs.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::PermissionStatus;
use crate::tui::component::Component;

pub struct PermissionPrompt {
    pub status: PermissionStatus,
}

fn prompt_lines(status: PermissionStatus) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Pinpoint needs access to your location"),
        Line::from("to center the map on where you are."),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" allow    "),
            Span::styled("[n]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" deny    "),
            Span::styled("[q]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ]),
    ];
    if status == PermissionStatus::Denied {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Permission denied — location and map features are disabled.",
            Style::default().fg(Color::Red),
        ));
    }
    lines
}

impl Component for PermissionPrompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = prompt_lines(self.status);
        let height = lines.len() as u16 + 2;
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [centered] = Layout::horizontal([Constraint::Length(64)])
            .flex(Flex::Center)
            .areas(centered);

        let paragraph = Paragraph::new(lines)
            .block(Block::bordered().title("Location Access"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, centered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_denial_note() {
        let lines = prompt_lines(PermissionStatus::NotDetermined);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].to_string().contains("needs access"));
    }

    #[test]
    fn test_prompt_with_denial_note() {
        let lines = prompt_lines(PermissionStatus::Denied);
        assert_eq!(lines.len(), 6);
        assert!(lines[5].to_string().contains("Permission denied"));
    }
}
