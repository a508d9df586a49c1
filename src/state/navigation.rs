//! Navigation and modal state types.
//!
//! This module contains the value types used by the UI state container for
//! board navigation and overlay dialogs.

/// Specifying the fixed set of modal kinds.
///
/// Distinct kinds may be open at the same time (e.g. settings over a course
/// dialog); only one instance of each kind can exist.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ModalKind {
    CommandPalette,
    Settings,
    Course,
    Project,
    Session,
}

/// Open/selection pair for an entity-editing modal.
///
/// The selection is an opaque entity gid owned by the data API; it is
/// non-null only while the modal is open, and closing clears both fields as
/// one mutation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModalSelection {
    open: bool,
    selected: Option<String>,
}

impl ModalSelection {
    /// Open the modal, optionally selecting an entity to edit.
    ///
    pub fn open(&mut self, selected: Option<String>) {
        self.open = true;
        self.selected = selected;
    }

    /// Close the modal, clearing any selection.
    ///
    pub fn close(&mut self) {
        self.open = false;
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
