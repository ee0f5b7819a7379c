use crate::editor::{Highlight, Mode};
use serde::{Deserialize, Serialize};

/// Change notifications the editor sends to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorEvent {
    ModeChanged,
    HighlightChanged,
    SelectionChanged,
}

/// Read-only view of the editor's state handed to observers.
///
/// Observers pull whatever they need from it right after being notified;
/// it always reflects the state after the mutation that fired the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorStatus {
    pub(crate) mode: Mode,
    pub(crate) highlight: Highlight,
    pub(crate) selected: Option<usize>,
}

impl EditorStatus {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selected plane index, `-1` when nothing is selected
    pub fn selected_or_minus_one(&self) -> isize {
        self.selected.map_or(-1, |index| index as isize)
    }
}

/// Receives change notifications synchronously, in-line with the mutation.
///
/// Every method defaults to doing nothing, so hosts implement only the
/// notifications they care about.
pub trait EditorObserver {
    fn mode_changed(&mut self, _status: &EditorStatus) {}

    fn highlight_changed(&mut self, _status: &EditorStatus) {}

    fn selection_changed(&mut self, _status: &EditorStatus) {}

    /// Dispatch an event to the matching method
    fn notify(&mut self, event: EditorEvent, status: &EditorStatus) {
        match event {
            EditorEvent::ModeChanged => self.mode_changed(status),
            EditorEvent::HighlightChanged => self.highlight_changed(status),
            EditorEvent::SelectionChanged => self.selection_changed(status),
        }
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EditorObserver for NoopObserver {}
