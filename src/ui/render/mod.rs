mod board;
mod footer;
mod modals;
mod sidebar;
mod tab_bar;

use super::theme::Theme;
use super::Frame;
use crate::state::{SettingsState, UiState};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use board::board;
use footer::footer;
use modals::modals;
use sidebar::sidebar;
use tab_bar::tab_bar;

/// Render the full frame from state: tab bar, optional sidebar, board body,
/// footer, and any open overlays.
///
pub fn render(frame: &mut Frame, state: &mut UiState, settings: &SettingsState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.size());

    tab_bar(frame, chunks[0], state, theme);

    if state.is_sidebar_collapsed() {
        board(frame, chunks[1], state, theme);
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(20)])
            .split(chunks[1]);
        sidebar(frame, body[0], state, theme);
        board(frame, body[1], state, theme);
    }

    footer(frame, chunks[2], state, theme);

    modals(frame, state, settings, theme);
}

/// Return a rect of the given size centered within the container, clamped
/// to the container bounds.
///
fn centered_rect(width: u16, height: u16, container: Rect) -> Rect {
    let width = width.min(container.width);
    let height = height.min(container.height);
    Rect {
        x: container.x + (container.width - width) / 2,
        y: container.y + (container.height - height) / 2,
        width,
        height,
    }
}
