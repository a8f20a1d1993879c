use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseEventKind};

/// TUI-specific input events
pub enum TuiEvent {
    // Ctrl+C — always quits regardless of phase
    ForceQuit,
    // Plain keypress ('y'/'n' on the permission prompt, 'q', '+', '-', 'c', ...)
    InputChar(char),
    // Enter
    Submit,
    // Left mouse button released at (column, row) — a map tap
    MouseClick(u16, u16),
    // Mouse wheel at (column, row); zooms the map or scrolls the marker list
    // depending on what is under the pointer
    MouseScroll { col: u16, row: u16, up: bool },
    // PageUp/PageDown — marker list scrolling
    ScrollPageUp,
    ScrollPageDown,
    // Arrow keys — manual camera panning
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Resize,
}

/// Poll for an event with timeout (blocks up to `timeout`)
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if event::poll(timeout).unwrap_or(false) {
        match event::read() {
            Ok(Event::Key(key_event)) => {
                log::debug!(
                    "Key event: {:?} with modifiers {:?}",
                    key_event.code,
                    key_event.modifiers
                );
                match (key_event.modifiers, key_event.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                    (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                    (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                    (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                    (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                    (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                    (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                    (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                    (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                    _ => None,
                }
            }
            Ok(Event::Mouse(mouse_event)) => match mouse_event.kind {
                MouseEventKind::Up(_) => {
                    Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
                }
                MouseEventKind::ScrollUp => Some(TuiEvent::MouseScroll {
                    col: mouse_event.column,
                    row: mouse_event.row,
                    up: true,
                }),
                MouseEventKind::ScrollDown => Some(TuiEvent::MouseScroll {
                    col: mouse_event.column,
                    row: mouse_event.row,
                    up: false,
                }),
                _ => None,
            },
            Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
            _ => None,
        }
    } else {
        None
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}
