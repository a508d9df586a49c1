//! UI state management module.
//!
//! This module houses the process-wide UI state container. All mutation
//! goes through named action methods; every external read is a pure
//! projection. Each action applies its fields as one atomic update, bumps
//! the observable state version exactly once, and then requests a
//! persistence write over the save channel.

mod error;
mod navigation;
mod settings;

pub use error::StateError;
pub use navigation::{ModalKind, ModalSelection};
pub use settings::{PresentationSink, Settings, SettingsState, ThemeMode};

use crate::api::Board;
use crate::app::StateSaveSender;
use crate::persist::Persistable;
use crate::ui::SPINNER_FRAME_COUNT;
use log::*;
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Maximum number of captured log entries kept for the debug overlay.
///
const DEBUG_ENTRY_LIMIT: usize = 200;

/// Houses data representative of UI state: navigation position, overlay
/// dialogs, and edit-mode flags. Boards themselves are opaque references
/// into the data API's domain.
///
pub struct UiState {
    save_sender: Option<StateSaveSender>,
    boards: Vec<Board>,
    current_board_index: usize,
    command_palette_open: bool,
    palette_query: String,
    settings_modal_open: bool,
    course_modal: ModalSelection,
    project_modal: ModalSelection,
    session_modal: ModalSelection,
    edit_mode: bool,
    sidebar_collapsed: bool,
    version: u64,
    restored_from_snapshot: bool,
    terminal_size: Rect,
    spinner_index: usize,
    debug_entries: Vec<String>,
}

/// Defines default UI state.
///
impl Default for UiState {
    fn default() -> UiState {
        UiState {
            save_sender: None,
            boards: vec![],
            current_board_index: 0,
            command_palette_open: false,
            palette_query: String::new(),
            settings_modal_open: false,
            course_modal: ModalSelection::default(),
            project_modal: ModalSelection::default(),
            session_modal: ModalSelection::default(),
            edit_mode: false,
            sidebar_collapsed: false,
            version: 0,
            restored_from_snapshot: false,
            terminal_size: Rect::default(),
            spinner_index: 0,
            debug_entries: vec![],
        }
    }
}

impl UiState {
    pub fn new(save_sender: StateSaveSender) -> Self {
        UiState {
            save_sender: Some(save_sender),
            ..UiState::default()
        }
    }

    /// Bump the observable state version and request a persistence write.
    /// Called exactly once at the end of every action method, after the
    /// action's atomic update completes.
    ///
    fn touch(&mut self) {
        self.version += 1;
        if let Some(sender) = &self.save_sender {
            // Fire-and-forget; a dropped receiver only means no persistence.
            sender.send(()).ok();
        }
    }

    // --- Board navigation -------------------------------------------------

    /// Returns the ordered board list.
    ///
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Returns the current board index. Valid while `boards` is non-empty.
    ///
    pub fn current_board_index(&self) -> usize {
        self.current_board_index
    }

    /// Returns the current board, or None while the list is still loading.
    ///
    pub fn current_board(&self) -> Option<&Board> {
        self.boards.get(self.current_board_index)
    }

    /// Returns the position of the board with the given gid.
    ///
    pub fn board_position(&self, gid: &str) -> Option<usize> {
        self.boards.iter().position(|board| board.gid == gid)
    }

    /// Replaces the board list, clamping the index on write so the
    /// invariant holds whatever list length arrives. Last writer wins.
    ///
    pub fn set_boards(&mut self, boards: Vec<Board>) -> &mut Self {
        debug!("Replacing board list with {} boards...", boards.len());
        self.boards = boards;
        self.current_board_index = match self.boards.len() {
            0 => 0,
            len => self.current_board_index.min(len - 1),
        };
        self.touch();
        self
    }

    /// Advances to the next board, saturating at the end of the list.
    ///
    pub fn next_board(&mut self) -> &mut Self {
        if self.current_board_index + 1 < self.boards.len() {
            self.current_board_index += 1;
            self.touch();
        }
        self
    }

    /// Moves to the previous board, saturating at the start of the list.
    ///
    pub fn prev_board(&mut self) -> &mut Self {
        if self.current_board_index > 0 {
            self.current_board_index -= 1;
            self.touch();
        }
        self
    }

    /// Jumps to the board at the given position. Out-of-range targets are
    /// silently ignored; callers are expected to pre-validate via the
    /// keyboard digit range, and a stray digit is not an error.
    ///
    pub fn jump_to_board(&mut self, index: usize) -> &mut Self {
        if index < self.boards.len() && index != self.current_board_index {
            self.current_board_index = index;
            self.touch();
        }
        self
    }

    // --- Modals -----------------------------------------------------------

    pub fn is_command_palette_open(&self) -> bool {
        self.command_palette_open
    }

    pub fn palette_query(&self) -> &str {
        &self.palette_query
    }

    pub fn open_command_palette(&mut self) -> &mut Self {
        self.command_palette_open = true;
        self.touch();
        self
    }

    /// Closes the palette and clears the query as one atomic update.
    ///
    pub fn close_command_palette(&mut self) -> &mut Self {
        self.command_palette_open = false;
        self.palette_query.clear();
        self.touch();
        self
    }

    pub fn push_palette_char(&mut self, c: char) -> &mut Self {
        if self.command_palette_open {
            self.palette_query.push(c);
            self.touch();
        }
        self
    }

    pub fn pop_palette_char(&mut self) -> &mut Self {
        if self.command_palette_open && self.palette_query.pop().is_some() {
            self.touch();
        }
        self
    }

    pub fn is_settings_modal_open(&self) -> bool {
        self.settings_modal_open
    }

    pub fn open_settings_modal(&mut self) -> &mut Self {
        self.settings_modal_open = true;
        self.touch();
        self
    }

    pub fn close_settings_modal(&mut self) -> &mut Self {
        self.settings_modal_open = false;
        self.touch();
        self
    }

    pub fn course_modal(&self) -> &ModalSelection {
        &self.course_modal
    }

    /// Opens the course dialog, optionally selecting a course to edit. The
    /// `(open, selected)` pair is applied as one atomic update.
    ///
    pub fn open_course_modal(&mut self, gid: Option<String>) -> &mut Self {
        self.course_modal.open(gid);
        self.touch();
        self
    }

    pub fn close_course_modal(&mut self) -> &mut Self {
        self.course_modal.close();
        self.touch();
        self
    }

    pub fn project_modal(&self) -> &ModalSelection {
        &self.project_modal
    }

    pub fn open_project_modal(&mut self, gid: Option<String>) -> &mut Self {
        self.project_modal.open(gid);
        self.touch();
        self
    }

    pub fn close_project_modal(&mut self) -> &mut Self {
        self.project_modal.close();
        self.touch();
        self
    }

    pub fn session_modal(&self) -> &ModalSelection {
        &self.session_modal
    }

    pub fn open_session_modal(&mut self, gid: Option<String>) -> &mut Self {
        self.session_modal.open(gid);
        self.touch();
        self
    }

    pub fn close_session_modal(&mut self) -> &mut Self {
        self.session_modal.close();
        self.touch();
        self
    }

    /// True while the input focus sits on a free-text entry surface: the
    /// command palette query or any entity-editing dialog. Bare-key
    /// navigation shortcuts must stay suppressed while this holds.
    ///
    pub fn is_text_input_focused(&self) -> bool {
        self.command_palette_open
            || self.course_modal.is_open()
            || self.project_modal.is_open()
            || self.session_modal.is_open()
    }

    /// Closes the topmost open overlay, if any, returning its kind.
    ///
    pub fn close_topmost_modal(&mut self) -> Option<ModalKind> {
        if self.command_palette_open {
            self.close_command_palette();
            Some(ModalKind::CommandPalette)
        } else if self.settings_modal_open {
            self.close_settings_modal();
            Some(ModalKind::Settings)
        } else if self.session_modal.is_open() {
            self.close_session_modal();
            Some(ModalKind::Session)
        } else if self.project_modal.is_open() {
            self.close_project_modal();
            Some(ModalKind::Project)
        } else if self.course_modal.is_open() {
            self.close_course_modal();
            Some(ModalKind::Course)
        } else {
            None
        }
    }

    // --- Flags ------------------------------------------------------------

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn toggle_edit_mode(&mut self) -> &mut Self {
        self.edit_mode = !self.edit_mode;
        self.touch();
        self
    }

    pub fn enable_edit_mode(&mut self) -> &mut Self {
        self.edit_mode = true;
        self.touch();
        self
    }

    pub fn disable_edit_mode(&mut self) -> &mut Self {
        self.edit_mode = false;
        self.touch();
        self
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn toggle_sidebar(&mut self) -> &mut Self {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.touch();
        self
    }

    // --- Bookkeeping ------------------------------------------------------

    /// Returns the observable state version. Bumped once per action.
    ///
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True if a stored snapshot was recovered at startup. A recovered
    /// board index takes precedence over the configured default board.
    ///
    pub fn was_restored(&self) -> bool {
        self.restored_from_snapshot
    }

    /// Sets the terminal size. Render-loop bookkeeping, not an action.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Advances the loading spinner. Render-loop bookkeeping, not an action.
    ///
    pub fn tick_spinner(&mut self) -> &mut Self {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
        self
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Appends a captured log entry for the debug overlay.
    ///
    pub fn push_debug_entry(&mut self, entry: String) -> &mut Self {
        self.debug_entries.push(entry);
        if self.debug_entries.len() > DEBUG_ENTRY_LIMIT {
            self.debug_entries.remove(0);
        }
        self
    }

    pub fn debug_entries(&self) -> &[String] {
        &self.debug_entries
    }
}

/// Declared persisted subset of the UI state. Navigation position and the
/// sidebar preference survive a reload; modals, the palette query, and edit
/// mode always start from their defaults.
///
#[derive(Serialize, Deserialize, Default)]
pub struct UiSnapshot {
    #[serde(default)]
    pub current_board_index: usize,
    #[serde(default)]
    pub sidebar_collapsed: bool,
}

impl Persistable for UiState {
    type Snapshot = UiSnapshot;
    const STORAGE_KEY: &'static str = "ui-state";

    fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            current_board_index: self.current_board_index,
            sidebar_collapsed: self.sidebar_collapsed,
        }
    }

    fn restore(&mut self, snapshot: UiSnapshot) {
        // Boards are not loaded yet at this point; set_boards clamps the
        // recovered index against whatever list eventually arrives.
        self.current_board_index = snapshot.current_board_index;
        self.sidebar_collapsed = snapshot.sidebar_collapsed;
        self.restored_from_snapshot = true;
    }
}
