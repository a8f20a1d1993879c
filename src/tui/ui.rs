use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, Phase};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Banner, MapView, MarkerList, PermissionPrompt, TitleBar};

/// Width of the marker side panel.
const MARKER_PANEL_WIDTH: u16 = 38;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, banner_area] = layout.areas(frame.area());

    // Title bar
    TitleBar {
        resolver_name: app.resolver.name(),
        status_message: &app.status_message,
        is_locating: app.is_locating,
        spinner_frame,
    }
    .render(frame, title_area);

    // Main area — the permission prompt is the only thing rendered until
    // the gate opens; no map logic runs before that
    match app.phase {
        Phase::AwaitingPermission => {
            PermissionPrompt {
                status: app.permission,
            }
            .render(frame, main_area);
        }
        Phase::Active => {
            let [map_area, panel_area] =
                Layout::horizontal([Min(0), Length(MARKER_PANEL_WIDTH)]).areas(main_area);
            MapView {
                state: &mut tui.map_view,
                position: app.position,
                markers: &app.markers,
            }
            .render(frame, map_area);
            MarkerList {
                state: &mut tui.marker_list,
                position: app.position,
                user_address: app.display_address(),
                markers: &app.markers,
            }
            .render(frame, panel_area);
        }
    }

    // Bottom banner
    Banner {
        last_marker: app.markers.last(),
    }
    .render(frame, banner_area);
}
