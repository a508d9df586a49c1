//! Keyboard command dispatcher.
//!
//! A single global listener translating raw key events into state container
//! actions under a fixed, two-tier precedence:
//!
//! 1. Modifier (Ctrl/Super) chords are global commands and work even while
//!    a text-entry surface has focus, so settings can be opened mid-edit.
//! 2. Bare keys are navigation commands and are suppressed while typing so
//!    keystrokes never leak out of a form into board navigation.
//!
//! Classification is stateless per event; `classify` is a pure function
//! over the key and the focus capability check.

use crate::state::{SettingsState, UiState};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Commands a key event can translate to.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    OpenCommandPalette,
    OpenSettings,
    ToggleSidebar,
    NextBoard,
    PrevBoard,
    JumpToBoard(usize),
    ToggleEditMode,
    ToggleTheme,
    PaletteChar(char),
    PaletteBackspace,
    CloseTopmost,
    Exit,
    Ignored,
}

/// Translate one key event into a command. `text_input_focused` is the
/// capability check "does the current focus target accept free text"; the
/// container computes it, keeping the dispatcher itself toolkit-agnostic.
///
pub fn classify(key: &KeyEvent, text_input_focused: bool) -> Command {
    let modifier_held = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::SUPER);

    // Tier one: global chords, independent of focus.
    if modifier_held {
        return match key.code {
            KeyCode::Char('k') => Command::OpenCommandPalette,
            KeyCode::Char(',') => Command::OpenSettings,
            KeyCode::Char('b') => Command::ToggleSidebar,
            KeyCode::Char('c') => Command::Exit,
            _ => Command::Ignored,
        };
    }

    // Tier two: typing wins over navigation.
    if text_input_focused {
        return match key.code {
            KeyCode::Char(c) => Command::PaletteChar(c),
            KeyCode::Backspace => Command::PaletteBackspace,
            KeyCode::Esc | KeyCode::Enter => Command::CloseTopmost,
            _ => Command::Ignored,
        };
    }

    // Tier three: bare navigation keys.
    match key.code {
        KeyCode::Right => Command::NextBoard,
        KeyCode::Left => Command::PrevBoard,
        KeyCode::Char(c @ '1'..='7') => Command::JumpToBoard(c as usize - '1' as usize),
        KeyCode::Char('e') => Command::ToggleEditMode,
        KeyCode::Char('t') => Command::ToggleTheme,
        KeyCode::Char('q') => Command::Exit,
        KeyCode::Esc => Command::CloseTopmost,
        _ => Command::Ignored,
    }
}

/// Apply a classified command to the state containers. Returns false when
/// an application exit was requested.
///
fn apply(command: Command, state: &mut UiState, settings: &mut SettingsState) -> bool {
    match command {
        Command::OpenCommandPalette => {
            state.open_command_palette();
        }
        Command::OpenSettings => {
            state.open_settings_modal();
        }
        Command::ToggleSidebar => {
            state.toggle_sidebar();
        }
        Command::NextBoard => {
            state.next_board();
        }
        Command::PrevBoard => {
            state.prev_board();
        }
        Command::JumpToBoard(index) => {
            // Out-of-range targets are absorbed by the container.
            state.jump_to_board(index);
        }
        Command::ToggleEditMode => {
            state.toggle_edit_mode();
        }
        Command::ToggleTheme => {
            settings.toggle_theme();
        }
        Command::PaletteChar(c) => {
            // Entity dialogs own their text fields in the presentational
            // layer; only the palette query is routed here.
            state.push_palette_char(c);
        }
        Command::PaletteBackspace => {
            state.pop_palette_char();
        }
        Command::CloseTopmost => {
            if let Some(kind) = state.close_topmost_modal() {
                debug!("Closed {:?} modal.", kind);
            }
        }
        Command::Exit => return false,
        Command::Ignored => {}
    }
    true
}

/// Specify struct for managing the terminal events channel. The polling
/// thread is torn down with the handler when the UI loop ends.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut UiState, settings: &mut SettingsState) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => {
                let command = classify(&key, state.is_text_input_focused());
                if command != Command::Ignored {
                    debug!("Processing terminal event '{:?}' as {:?}...", key, command);
                }
                Ok(apply(command, state, settings))
            }
            Event::Tick => {
                state.tick_spinner();
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Board;
    use crate::state::{PresentationSink, ThemeMode};

    struct NullSink;

    impl PresentationSink for NullSink {
        fn apply(&self, _mode: ThemeMode) {}
    }

    fn settings() -> SettingsState {
        SettingsState::new(Box::new(NullSink), None)
    }

    fn boards(count: usize) -> Vec<Board> {
        (0..count)
            .map(|i| Board {
                gid: format!("gid-{}", i),
                name: format!("Board {}", i),
            })
            .collect()
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn modifier_chords_work_regardless_of_focus() {
        for focused in [false, true] {
            assert_eq!(
                classify(&key(KeyCode::Char('k'), KeyModifiers::CONTROL), focused),
                Command::OpenCommandPalette
            );
            assert_eq!(
                classify(&key(KeyCode::Char(','), KeyModifiers::CONTROL), focused),
                Command::OpenSettings
            );
            assert_eq!(
                classify(&key(KeyCode::Char('b'), KeyModifiers::CONTROL), focused),
                Command::ToggleSidebar
            );
        }
    }

    #[test]
    fn super_modifier_counts_as_the_platform_meta_key() {
        assert_eq!(
            classify(&key(KeyCode::Char('k'), KeyModifiers::SUPER), true),
            Command::OpenCommandPalette
        );
    }

    #[test]
    fn bare_navigation_keys_are_suppressed_while_typing() {
        assert_eq!(
            classify(&key(KeyCode::Right, KeyModifiers::NONE), true),
            Command::Ignored
        );
        assert_eq!(
            classify(&key(KeyCode::Left, KeyModifiers::NONE), true),
            Command::Ignored
        );
        // 'q' and digits become text instead of commands.
        assert_eq!(
            classify(&key(KeyCode::Char('q'), KeyModifiers::NONE), true),
            Command::PaletteChar('q')
        );
        assert_eq!(
            classify(&key(KeyCode::Char('3'), KeyModifiers::NONE), true),
            Command::PaletteChar('3')
        );
    }

    #[test]
    fn bare_navigation_keys_apply_when_nothing_has_text_focus() {
        assert_eq!(
            classify(&key(KeyCode::Right, KeyModifiers::NONE), false),
            Command::NextBoard
        );
        assert_eq!(
            classify(&key(KeyCode::Left, KeyModifiers::NONE), false),
            Command::PrevBoard
        );
        assert_eq!(
            classify(&key(KeyCode::Char('1'), KeyModifiers::NONE), false),
            Command::JumpToBoard(0)
        );
        assert_eq!(
            classify(&key(KeyCode::Char('7'), KeyModifiers::NONE), false),
            Command::JumpToBoard(6)
        );
        // Outside the digit range.
        assert_eq!(
            classify(&key(KeyCode::Char('8'), KeyModifiers::NONE), false),
            Command::Ignored
        );
        assert_eq!(
            classify(&key(KeyCode::Char('0'), KeyModifiers::NONE), false),
            Command::Ignored
        );
    }

    #[test]
    fn unhandled_keys_are_ignored() {
        assert_eq!(
            classify(&key(KeyCode::Char('z'), KeyModifiers::NONE), false),
            Command::Ignored
        );
        assert_eq!(
            classify(&key(KeyCode::Tab, KeyModifiers::NONE), false),
            Command::Ignored
        );
        assert_eq!(
            classify(&key(KeyCode::Char('z'), KeyModifiers::CONTROL), false),
            Command::Ignored
        );
    }

    #[test]
    fn ctrl_k_opens_the_palette_while_a_text_field_has_focus() {
        let mut state = UiState::default();
        let mut prefs = settings();
        state.set_boards(boards(3));
        state.open_course_modal(Some("course-1".to_string()));
        assert!(state.is_text_input_focused());

        let command = classify(
            &key(KeyCode::Char('k'), KeyModifiers::CONTROL),
            state.is_text_input_focused(),
        );
        assert!(apply(command, &mut state, &mut prefs));
        assert!(state.is_command_palette_open());
    }

    #[test]
    fn arrow_right_does_not_navigate_while_a_text_field_has_focus() {
        let mut state = UiState::default();
        let mut prefs = settings();
        state.set_boards(boards(3));
        state.open_command_palette();

        let command = classify(
            &key(KeyCode::Right, KeyModifiers::NONE),
            state.is_text_input_focused(),
        );
        assert!(apply(command, &mut state, &mut prefs));
        assert_eq!(state.current_board_index(), 0);
    }

    #[test]
    fn digit_jump_beyond_the_board_count_is_a_no_op() {
        let mut state = UiState::default();
        let mut prefs = settings();
        state.set_boards(boards(3));

        let command = classify(
            &key(KeyCode::Char('6'), KeyModifiers::NONE),
            state.is_text_input_focused(),
        );
        assert_eq!(command, Command::JumpToBoard(5));
        assert!(apply(command, &mut state, &mut prefs));
        assert_eq!(state.current_board_index(), 0);
    }

    #[test]
    fn exit_commands_stop_the_loop() {
        let mut state = UiState::default();
        let mut prefs = settings();
        assert!(!apply(
            classify(&key(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            &mut state,
            &mut prefs
        ));
        assert!(!apply(
            classify(&key(KeyCode::Char('q'), KeyModifiers::NONE), false),
            &mut state,
            &mut prefs
        ));
    }

    #[test]
    fn typed_characters_reach_the_palette_query() {
        let mut state = UiState::default();
        let mut prefs = settings();
        state.open_command_palette();

        for c in ['p', 'l', 'a', 'n'] {
            let command = classify(
                &key(KeyCode::Char(c), KeyModifiers::NONE),
                state.is_text_input_focused(),
            );
            apply(command, &mut state, &mut prefs);
        }
        assert_eq!(state.palette_query(), "plan");

        let command = classify(
            &key(KeyCode::Backspace, KeyModifiers::NONE),
            state.is_text_input_focused(),
        );
        apply(command, &mut state, &mut prefs);
        assert_eq!(state.palette_query(), "pla");
    }

    #[test]
    fn theme_toggle_applies_through_the_settings_container() {
        let mut state = UiState::default();
        let mut prefs = settings();
        let before = prefs.theme();
        apply(
            classify(&key(KeyCode::Char('t'), KeyModifiers::NONE), false),
            &mut state,
            &mut prefs,
        );
        assert_ne!(prefs.theme(), before);
    }
}
