//! Lookup navigation history.
//!
//! The stack records every relationship hop taken from the base object. It is
//! stored as an immutable `Arc<[LookupStackEntry]>` that is rebuilt on each
//! change, so a [`NavigationStack::snapshot`] handed to an observer (or held
//! by a pending load) never sees a later mutation.

use std::sync::Arc;

use fieldpath_types::LookupStackEntry;
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons a navigation request is rejected. State is never changed when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("maximum depth {max_depth} reached")]
    DepthExceeded { max_depth: usize },

    #[error("index {index} is out of bounds for a stack of depth {depth}")]
    OutOfBounds { index: isize, depth: usize },
}

/// What a successful [`NavigationStack::truncate_at`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncateOutcome {
    /// The stack was emptied; the base object is current again.
    Cleared,
    /// The index already pointed at the current object.
    Unchanged,
    /// Entries after the index were dropped.
    Truncated,
}

/// Breadcrumb entry describing one hop for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub index: usize,
    pub relationship_name: String,
    pub object_api_name: String,
    pub is_last: bool,
}

#[derive(Debug, Clone)]
pub struct NavigationStack {
    entries: Arc<[LookupStackEntry]>,
    max_depth: usize,
}

impl NavigationStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Arc::from([]),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn current_depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_at_max_depth(&self) -> bool {
        self.current_depth() >= self.max_depth
    }

    pub fn entries(&self) -> &[LookupStackEntry] {
        &self.entries
    }

    /// Shared, immutable view of the current history.
    pub fn snapshot(&self) -> Arc<[LookupStackEntry]> {
        Arc::clone(&self.entries)
    }

    /// Appends a hop, rejecting it once the configured depth is reached.
    pub fn push(&mut self, entry: LookupStackEntry) -> Result<(), NavigationError> {
        if self.is_at_max_depth() {
            warn!(max_depth = self.max_depth, "navigation push rejected at maximum depth");
            return Err(NavigationError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        debug!(
            relationship_name = %entry.relationship_name,
            object_api_name = %entry.object_api_name,
            depth = self.current_depth() + 1,
            "navigation push"
        );
        self.entries = self.entries.iter().cloned().chain(std::iter::once(entry)).collect();
        Ok(())
    }

    /// Returns to the hop at `index`; `-1` returns to the base object.
    ///
    /// Valid indexes are `-1..=current_depth() - 1`.
    pub fn truncate_at(&mut self, index: isize) -> Result<TruncateOutcome, NavigationError> {
        let depth = self.current_depth();
        if index < -1 || index >= depth as isize {
            warn!(index, depth, "navigation index out of bounds");
            return Err(NavigationError::OutOfBounds { index, depth });
        }
        if index == -1 {
            self.reset();
            return Ok(TruncateOutcome::Cleared);
        }
        let keep = index as usize + 1;
        if keep == depth {
            return Ok(TruncateOutcome::Unchanged);
        }
        debug!(index, from_depth = depth, "navigation truncate");
        self.entries = Arc::from(&self.entries[..keep]);
        Ok(TruncateOutcome::Truncated)
    }

    /// Replaces the whole history, as a full-stack navigation event does.
    pub fn replace(&mut self, entries: Vec<LookupStackEntry>) -> Result<(), NavigationError> {
        if entries.len() > self.max_depth {
            warn!(
                requested_depth = entries.len(),
                max_depth = self.max_depth,
                "navigation replacement exceeds maximum depth"
            );
            return Err(NavigationError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.entries = Arc::from(entries);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.entries = Arc::from([]);
    }

    /// Index that "go back one step" truncates to.
    pub fn previous_index(&self) -> isize {
        self.current_depth() as isize - 2
    }

    /// Dotted relationship path for `field_api_name` on the current object.
    pub fn build_path(&self, field_api_name: &str) -> String {
        build_relationship_path(&self.entries, field_api_name)
    }

    /// Object currently browsed: the last hop's target, or `base_object` when empty.
    pub fn current_object<'a>(&'a self, base_object: &'a str) -> &'a str {
        self.entries
            .last()
            .map(|entry| entry.object_api_name.as_str())
            .unwrap_or(base_object)
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let last = self.entries.len().saturating_sub(1);
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Breadcrumb {
                index,
                relationship_name: entry.relationship_name.clone(),
                object_api_name: entry.object_api_name.clone(),
                is_last: index == last,
            })
            .collect()
    }
}

/// Joins every relationship name in `entries` with `field_api_name` using `.`.
pub fn build_relationship_path(entries: &[LookupStackEntry], field_api_name: &str) -> String {
    entries
        .iter()
        .map(|entry| entry.relationship_name.as_str())
        .chain(std::iter::once(field_api_name))
        .collect::<Vec<_>>()
        .join(".")
}
