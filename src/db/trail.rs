//! The trail of bindings.
//!
//! Every binding made in the binding store is recorded here, in order from first to last.
//! A [mark](Trail::mark) taken before some work, together with a rewind to that mark, undoes exactly the bindings the work made.
//!
//! Within a forward path the trail only grows.
//! Rewinding is how every choice point restores the store before an alternative is tried, and is the foundation of backtracking correctness.

use crate::structures::term::Variable;

/// A position in the trail, taken before some work so the work can be undone.
pub type Mark = usize;

/// A structure to hold the trail.
#[derive(Default)]
pub struct Trail {
    /// Each variable bound, in order of binding.
    entries: Vec<Variable>,
}

impl Trail {
    /// The current position, for a later [rewind](crate::db::bindings::BindingDB::rewind).
    pub fn mark(&self) -> Mark {
        self.entries.len()
    }

    /// Records that `variable` was bound.
    pub fn record(&mut self, variable: Variable) {
        self.entries.push(variable);
    }

    /// Removes and returns the most recent entry, while it lies above `mark`.
    pub fn pop_above(&mut self, mark: Mark) -> Option<Variable> {
        if self.entries.len() > mark {
            self.entries.pop()
        } else {
            None
        }
    }

    /// A count of all bindings recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
