use crate::canvas::Canvas;

/// Undo/redo as two stacks of full canvas snapshots.
///
/// Starting a stroke pushes onto the undo stack and drops every redo entry, so
/// the timeline never branches. Undo and redo move the current canvas onto the
/// opposite stack instead and leave the other stack alone.
#[derive(Debug, Default, Clone)]
pub struct SnapshotHistory {
    /// Snapshots that can be restored by undo, most recent last
    undo_stack: Vec<Canvas>,
    /// Snapshots that can be restored by redo, most recent last
    redo_stack: Vec<Canvas>,
    /// Maximum undo depth, unbounded when `None`
    limit: Option<usize>,
}

impl SnapshotHistory {
    /// Creates a new empty, unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `limit` undo snapshots, dropping the oldest first
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|&n| n > 0),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Remember `current` as the state to return to, discarding any redo entries.
    pub fn record_for_undo(&mut self, current: &Canvas) {
        self.push_undo(current.clone());
        self.redo_stack.clear();
    }

    /// Restore the most recent undo snapshot into `current`.
    ///
    /// Returns `false` and changes nothing when there is nothing to undo.
    pub fn undo_once(&mut self, current: &mut Canvas) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(current, previous));
        true
    }

    /// Restore the most recent redo snapshot into `current`.
    ///
    /// Returns `false` and changes nothing when there is nothing to redo.
    pub fn redo_once(&mut self, current: &mut Canvas) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let replaced = std::mem::replace(current, next);
        self.push_undo(replaced);
        true
    }

    /// Clear the snapshot history
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_undo(&mut self, snapshot: Canvas) {
        self.undo_stack.push(snapshot);
        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
    }
}
