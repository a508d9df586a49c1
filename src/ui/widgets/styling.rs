use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

/// Return the style for muted helper text.
///
pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for the selected tab and the marked indicator entry.
///
pub fn active_tab_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for disabled navigation controls.
///
pub fn disabled_control_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.text_muted.to_color())
        .add_modifier(Modifier::DIM)
}

/// Return the style for enabled navigation controls.
///
pub fn control_style(theme: &Theme) -> Style {
    Style::default().fg(theme.primary.to_color())
}

/// Return the style for the edit-mode badge.
///
pub fn edit_badge_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.warning.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for overlay titles.
///
pub fn overlay_title_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.accent.to_color())
        .add_modifier(Modifier::BOLD)
}
