//! Scoped, transactional undo/redo history.
//!
//! Each edit scope owns an independent pair of undo/redo stacks so edits in
//! one domain can never cross-contaminate another. Entries are `(before,
//! after)` snapshot pairs; replaying one forwards the appropriate snapshot
//! to the replay handler the owning component registered for that scope.
//! The history itself never inspects snapshot contents.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::buffer::ImageBuffer;
use crate::geometry::CropState;

/// Maximum retained undo entries per scope; older entries fall off.
pub const MAX_DEPTH: usize = 64;

/// An independent undo/redo domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditScope {
    /// Crop and format edits (commit, shape changes).
    Crop,
    /// Background-matte recomposites.
    Matte,
}

/// A point-in-time capture of the editable state.
#[derive(Debug, Clone)]
pub struct EditSnapshot {
    /// The committed pixel buffer at capture time.
    pub buffer: Arc<ImageBuffer>,
    /// The crop state at capture time.
    pub crop: CropState,
    /// Whether a crop had been committed at capture time.
    pub cropped: bool,
}

/// One undoable action: the state before it and after it.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub before: EditSnapshot,
    pub after: EditSnapshot,
}

/// Replay callback registered per scope. Receives the snapshot to restore;
/// it alone re-synchronizes the owning component's visible state.
pub type ReplayFn<T> = fn(&mut T, &EditSnapshot);

struct ScopeStack<T> {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    replay: ReplayFn<T>,
}

/// Undo/redo stacks keyed by [`EditScope`], generic over the replay target.
pub struct EditHistory<T> {
    scopes: HashMap<EditScope, ScopeStack<T>>,
}

impl<T> Default for EditHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EditHistory<T> {
    pub fn new() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }

    /// Register (or replace) the replay handler for a scope, creating its
    /// stacks. Pushes to an unregistered scope are dropped.
    pub fn register(&mut self, scope: EditScope, replay: ReplayFn<T>) {
        self.scopes
            .entry(scope)
            .and_modify(|s| s.replay = replay)
            .or_insert_with(|| ScopeStack {
                undo: VecDeque::new(),
                redo: Vec::new(),
                replay,
            });
    }

    /// Append an entry to a scope's undo stack.
    ///
    /// A new action invalidates the future: the scope's redo stack is
    /// cleared. The undo stack is bounded at [`MAX_DEPTH`]; the oldest entry
    /// falls off first.
    pub fn push(&mut self, scope: EditScope, entry: HistoryEntry) {
        let Some(stack) = self.scopes.get_mut(&scope) else {
            return;
        };
        stack.redo.clear();
        stack.undo.push_back(entry);
        while stack.undo.len() > MAX_DEPTH {
            stack.undo.pop_front();
        }
    }

    /// Undo the most recent entry in a scope.
    ///
    /// Forwards the entry's `before` snapshot to the scope's replay handler
    /// and moves the entry to the redo stack. A no-op returning `false` when
    /// the scope is empty or unregistered.
    pub fn undo(&mut self, scope: EditScope, target: &mut T) -> bool {
        let Some(stack) = self.scopes.get_mut(&scope) else {
            return false;
        };
        let Some(entry) = stack.undo.pop_back() else {
            return false;
        };
        (stack.replay)(target, &entry.before);
        stack.redo.push(entry);
        true
    }

    /// Redo the most recently undone entry in a scope; symmetric to
    /// [`Self::undo`] with the `after` snapshot.
    pub fn redo(&mut self, scope: EditScope, target: &mut T) -> bool {
        let Some(stack) = self.scopes.get_mut(&scope) else {
            return false;
        };
        let Some(entry) = stack.redo.pop() else {
            return false;
        };
        (stack.replay)(target, &entry.after);
        stack.undo.push_back(entry);
        true
    }

    pub fn can_undo(&self, scope: EditScope) -> bool {
        self.scopes
            .get(&scope)
            .map(|s| !s.undo.is_empty())
            .unwrap_or(false)
    }

    pub fn can_redo(&self, scope: EditScope) -> bool {
        self.scopes
            .get(&scope)
            .map(|s| !s.redo.is_empty())
            .unwrap_or(false)
    }

    /// Number of undoable entries in a scope.
    pub fn undo_depth(&self, scope: EditScope) -> usize {
        self.scopes.get(&scope).map(|s| s.undo.len()).unwrap_or(0)
    }

    /// Empty every scope's stacks, keeping registrations.
    ///
    /// Invoked on image load/unload so history never leaks across images.
    pub fn clear_all(&mut self) {
        for stack in self.scopes.values_mut() {
            stack.undo.clear();
            stack.redo.clear();
        }
    }
}
