use super::{centered_rect, Frame};
use crate::state::{SettingsState, ThemeMode, UiState};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render all open overlays. Distinct modal kinds may be open at the same
/// time; they are drawn in a fixed order with the command palette on top.
///
pub fn modals(frame: &mut Frame, state: &UiState, settings: &SettingsState, theme: &Theme) {
    if state.course_modal().is_open() {
        entity_modal(frame, "Course", state.course_modal().selected(), theme);
    }
    if state.project_modal().is_open() {
        entity_modal(frame, "Project", state.project_modal().selected(), theme);
    }
    if state.session_modal().is_open() {
        entity_modal(frame, "Session", state.session_modal().selected(), theme);
    }
    if state.is_settings_modal_open() {
        settings_modal(frame, settings, theme);
    }
    if state.is_command_palette_open() {
        command_palette(frame, state, theme);
    }
}

/// Render the command palette overlay with the current query.
///
fn command_palette(frame: &mut Frame, state: &UiState, theme: &Theme) {
    let area = centered_rect(56, 3, frame.size());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            "Command Palette",
            styling::overlay_title_style(theme),
        ));
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", styling::muted_text_style(theme)),
        Span::styled(
            state.palette_query().to_string(),
            styling::normal_text_style(theme),
        ),
    ]))
    .block(block);
    frame.render_widget(Clear, area);
    frame.render_widget(input, area);
}

/// Render the settings overlay from the settings container.
///
fn settings_modal(frame: &mut Frame, settings: &SettingsState, theme: &Theme) {
    let area = centered_rect(44, 8, frame.size());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            "Settings",
            styling::overlay_title_style(theme),
        ));
    let theme_label = match settings.theme() {
        ThemeMode::Dark => "dark",
        ThemeMode::Light => "light",
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("Theme: {} (t to toggle)", theme_label),
            styling::normal_text_style(theme),
        )),
        Line::from(Span::styled(
            format!("Idle threshold: {} min", settings.idle_threshold_minutes()),
            styling::normal_text_style(theme),
        )),
        Line::from(Span::styled(
            format!(
                "Auto-save interval: {} s",
                settings.auto_save_interval_seconds()
            ),
            styling::normal_text_style(theme),
        )),
        Line::from(Span::styled(
            format!(
                "Default board: {}",
                settings.default_board_gid().unwrap_or("-")
            ),
            styling::normal_text_style(theme),
        )),
        Line::from(Span::styled(
            "Esc to close",
            styling::muted_text_style(theme),
        )),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render an entity dialog frame. The form fields belong to the
/// presentational layer; the shell shows which entity is being edited.
///
fn entity_modal(frame: &mut Frame, title: &str, selected: Option<&str>, theme: &Theme) {
    let area = centered_rect(44, 5, frame.size());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            title.to_string(),
            styling::overlay_title_style(theme),
        ));
    let body = match selected {
        Some(gid) => format!("Editing {}", gid),
        None => format!("New {}", title.to_lowercase()),
    };
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(body, styling::normal_text_style(theme))),
        Line::from(Span::styled(
            "Esc to close",
            styling::muted_text_style(theme),
        )),
    ])
    .block(block);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
