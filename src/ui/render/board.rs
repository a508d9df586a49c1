use super::Frame;
use crate::state::UiState;
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the active board body. The board contents themselves come from
/// the presentational layer; the shell only frames the current board.
///
pub fn board(frame: &mut Frame, size: Rect, state: &UiState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));

    let paragraph = match state.current_board() {
        Some(board) => {
            let block = block.title(Span::styled(
                board.name.clone(),
                styling::overlay_title_style(theme),
            ));
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "Board {} of {}",
                        state.current_board_index() + 1,
                        state.boards().len()
                    ),
                    styling::normal_text_style(theme),
                )),
                Line::from(Span::styled(
                    "←/→ switch boards, 1-7 jump, Ctrl+K command palette",
                    styling::muted_text_style(theme),
                )),
            ])
            .block(block)
        }
        None => Paragraph::new(Line::from(Span::styled(
            format!("{} Loading...", spinner::frame(state.spinner_index())),
            styling::muted_text_style(theme),
        )))
        .block(block),
    };

    frame.render_widget(paragraph, size);
}
