//! Linear undo/redo history of stroke-level operations.
//!
//! Each entry stores enough to apply its inverse against the
//! [`StrokeStore`]: the added stroke, the erased strokes with their former
//! positions, or the full set removed by a clear. Recording a new entry
//! discards the redo branch. Undo and redo at an empty stack are no-ops.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::doc::{Stroke, StrokeStore};

/// A completed, undoable operation.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOp {
    /// A stroke was committed on top of the board.
    Add(Stroke),
    /// Strokes removed by the eraser, with ascending former positions.
    Erase(Vec<(usize, Stroke)>),
    /// Every stroke removed at once, in draw order.
    Clear(Vec<Stroke>),
}

#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<HistoryOp>,
    redo: Vec<HistoryOp>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new operation and invalidate redo.
    pub fn record(&mut self, op: HistoryOp) {
        self.undo.push(op);
        self.redo.clear();
    }

    /// Revert the most recent operation. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, store: &mut StrokeStore) -> bool {
        let Some(op) = self.undo.pop() else {
            return false;
        };
        let inverse = revert(op, store);
        self.redo.push(inverse);
        true
    }

    /// Re-apply the most recently undone operation.
    pub fn redo(&mut self, store: &mut StrokeStore) -> bool {
        let Some(op) = self.redo.pop() else {
            return false;
        };
        let replayed = replay(op, store);
        self.undo.push(replayed);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

/// Undo `op` against the store. Returns the entry to push on the redo stack.
fn revert(op: HistoryOp, store: &mut StrokeStore) -> HistoryOp {
    match op {
        HistoryOp::Add(stroke) => {
            // Keep the latest content; remote fragments may have landed after the commit.
            let latest = store.remove(&stroke.id).map_or(stroke, |(_, s)| s);
            HistoryOp::Add(latest)
        }
        HistoryOp::Erase(removed) => {
            for (index, stroke) in &removed {
                store.insert_at(*index, stroke.clone());
            }
            HistoryOp::Erase(removed)
        }
        HistoryOp::Clear(cleared) => {
            for (index, stroke) in cleared.iter().enumerate() {
                store.insert_at(index, stroke.clone());
            }
            HistoryOp::Clear(cleared)
        }
    }
}

/// Redo `op` against the store. Returns the entry to push back on the undo stack.
fn replay(op: HistoryOp, store: &mut StrokeStore) -> HistoryOp {
    match op {
        HistoryOp::Add(stroke) => {
            if !store.contains(&stroke.id) {
                store.push(stroke.clone());
            }
            HistoryOp::Add(stroke)
        }
        HistoryOp::Erase(removed) => {
            let ids: Vec<_> = removed.iter().map(|(_, s)| s.id.clone()).collect();
            HistoryOp::Erase(store.remove_where(|s| ids.contains(&s.id)))
        }
        HistoryOp::Clear(_) => HistoryOp::Clear(store.take_all()),
    }
}
