use crate::error::HistoryError;
use crate::snapshot::Snapshot;

/// Manages whole-canvas snapshots for undo/redo
#[derive(Debug, Default)]
pub struct History {
    /// Snapshots that can be returned to, oldest first
    undo_stack: Vec<Snapshot>,
    /// Snapshots that were undone, most recently undone last
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot produced by a fresh edit.
    ///
    /// Any redo history is discarded.
    pub fn push(&mut self, snapshot: Snapshot) {
        log::debug!(
            "history: push snapshot {} (dropping {} redo entries)",
            snapshot.id(),
            self.redo_stack.len()
        );
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Steps back one snapshot and returns the one now on top.
    ///
    /// The floor snapshot is never popped.
    pub fn undo(&mut self) -> Result<&Snapshot, HistoryError> {
        if self.undo_stack.len() <= 1 {
            return Err(HistoryError::Empty("undo"));
        }
        let undone = self.undo_stack.pop().ok_or(HistoryError::Empty("undo"))?;
        self.redo_stack.push(undone);
        self.undo_stack.last().ok_or(HistoryError::Empty("undo"))
    }

    /// Re-applies the most recently undone snapshot and returns it.
    pub fn redo(&mut self) -> Result<&Snapshot, HistoryError> {
        let redone = self.redo_stack.pop().ok_or(HistoryError::Empty("redo"))?;
        self.undo_stack.push(redone);
        self.undo_stack.last().ok_or(HistoryError::Empty("redo"))
    }

    /// The snapshot the canvas currently reflects
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }
}
