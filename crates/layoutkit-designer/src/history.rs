//! Undo/redo history for committed layout changes.

use std::collections::VecDeque;

use layoutkit_core::constants::DEFAULT_HISTORY_LIMIT;

use crate::model::PlacedEntity;

/// One committed change of a single entity.
///
/// `before` is `None` for an added entity and `after` is `None` for a removed one.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    pub id: u64,
    /// Short description shown in undo menus, e.g. "Rotate".
    pub label: String,
    pub before: Option<PlacedEntity>,
    pub after: Option<PlacedEntity>,
}

impl Change {
    pub fn new(
        id: u64,
        label: impl Into<String>,
        before: Option<PlacedEntity>,
        after: Option<PlacedEntity>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            before,
            after,
        }
    }

    /// Whether the change did anything.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Change>,
    redo_stack: Vec<Change>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records a committed change and clears the redo stack. No-op changes are dropped.
    pub fn record(&mut self, change: Change) {
        if change.is_noop() {
            return;
        }
        self.redo_stack.clear();
        self.undo_stack.push_back(change);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Pops the change to revert. The caller applies `change.before`.
    pub fn undo(&mut self) -> Option<Change> {
        let change = self.undo_stack.pop_back()?;
        self.redo_stack.push(change.clone());
        Some(change)
    }

    /// Pops the change to reapply. The caller applies `change.after`.
    pub fn redo(&mut self) -> Option<Change> {
        let change = self.redo_stack.pop()?;
        self.undo_stack.push_back(change.clone());
        Some(change)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|c| c.label.as_str())
    }
}
