use super::Frame;
use crate::state::UiState;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the footer: prev/next controls (disabled at the respective
/// bound), position indicator, and the edit-mode badge.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &UiState, theme: &Theme) {
    let board_count = state.boards().len();
    let at_start = state.current_board_index() == 0;
    let at_end = board_count == 0 || state.current_board_index() == board_count - 1;

    let prev_style = if at_start {
        styling::disabled_control_style(theme)
    } else {
        styling::control_style(theme)
    };
    let next_style = if at_end {
        styling::disabled_control_style(theme)
    } else {
        styling::control_style(theme)
    };

    let position = if board_count == 0 {
        "-/-".to_string()
    } else {
        format!("{}/{}", state.current_board_index() + 1, board_count)
    };

    let mut spans = vec![
        Span::styled("◀ prev", prev_style),
        Span::raw("  "),
        Span::styled(position, styling::normal_text_style(theme)),
        Span::raw("  "),
        Span::styled("next ▶", next_style),
        Span::raw("   "),
        Span::styled(
            "Ctrl+K palette  Ctrl+, settings  Ctrl+B sidebar  q quit",
            styling::muted_text_style(theme),
        ),
    ];
    if state.is_edit_mode() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("EDIT", styling::edit_badge_style(theme)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(footer, size);
}
