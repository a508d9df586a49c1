use super::Frame;
use crate::state::UiState;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BLOCK_TITLE: &str = "Navigation";

/// Render the board list sidebar with a marker on the current entry.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &UiState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(BLOCK_TITLE);

    let items: Vec<ListItem> = state
        .boards()
        .iter()
        .enumerate()
        .map(|(i, board)| {
            let current = i == state.current_board_index();
            let marker = if current { "●" } else { "○" };
            let style = if current {
                styling::active_tab_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{} {}", marker, board.name),
                style,
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), size);
}
