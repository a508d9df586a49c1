use super::Frame;
use crate::state::UiState;
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

const BLOCK_TITLE: &str = "Boards";

/// Render the board indicator: one tab per board, marking exactly the
/// current entry. While the list is empty a loading spinner is shown
/// instead; that presentation persists if the load never completes.
///
pub fn tab_bar(frame: &mut Frame, size: Rect, state: &UiState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(BLOCK_TITLE);

    if state.boards().is_empty() {
        let loading = Paragraph::new(Line::from(Span::styled(
            format!(
                "{} Loading boards...",
                spinner::frame(state.spinner_index())
            ),
            styling::muted_text_style(theme),
        )))
        .block(block);
        frame.render_widget(loading, size);
        return;
    }

    let titles: Vec<Line> = state
        .boards()
        .iter()
        .enumerate()
        .map(|(i, board)| Line::from(Span::raw(format!("{} {}", i + 1, board.name))))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.current_board_index())
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::active_tab_style(theme))
        .block(block);
    frame.render_widget(tabs, size);
}
