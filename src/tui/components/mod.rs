//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar with resolver name, status, and spinner
//! - `Banner`: Bottom banner showing the last marker's address
//! - `PermissionPrompt`: The gate screen shown before anything activates
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `MapView`: The map canvas — camera, pan animation, click hit testing
//! - `MarkerList`: Scrollable panel of placed markers
//!
//! ## Design Philosophy
//!
//! Components receive external data as "props" (struct fields), not by
//! directly accessing global state. Each component file contains everything
//! related to that component: state types, rendering logic, event handling,
//! and tests.

pub mod banner;
pub mod map_view;
pub mod marker_list;
pub mod permission;
pub mod title_bar;

pub use banner::Banner;
pub use map_view::{MapView, MapViewState};
pub use marker_list::{MarkerList, MarkerListState};
pub use permission::PermissionPrompt;
pub use title_bar::TitleBar;

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Truncates a line to the given display width, appending an ellipsis.
/// Span styling is preserved up to the cut.
pub(crate) fn fit_width(line: &Line<'_>, max_width: u16) -> Line<'static> {
    let max = max_width as usize;
    if line.width() <= max {
        let spans = line
            .spans
            .iter()
            .map(|s| Span::styled(s.content.to_string(), s.style))
            .collect::<Vec<_>>();
        return Line::from(spans);
    }

    let budget = max.saturating_sub(1); // room for the ellipsis
    let mut used = 0usize;
    let mut out: Vec<Span<'static>> = Vec::new();
    for span in &line.spans {
        let mut kept = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                if !kept.is_empty() {
                    out.push(Span::styled(kept, span.style));
                }
                out.push(Span::raw("…"));
                return Line::from(out);
            }
            kept.push(ch);
            used += w;
        }
        if !kept.is_empty() {
            out.push(Span::styled(kept, span.style));
        }
    }
    out.push(Span::raw("…"));
    Line::from(out)
}
