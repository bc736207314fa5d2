//! # Undo/Redo History
//!
//! Bounded snapshot history for the catalog.
//!
//! ## Design
//!
//! - Before each applied mutation the pre-mutation state is recorded on
//!   the undo stack
//! - Undo restores the last snapshot and pushes the current state onto
//!   the front of the redo stack
//! - Redo takes the front of the redo stack and pushes the current state
//!   back onto the undo stack
//! - Recording a fresh snapshot clears the redo stack
//! - The undo stack holds at most `max_levels` entries; the oldest are
//!   dropped first
//! - Batches group several mutations under one snapshot
//!
//! Snapshots are cheap: a [`CatalogState`] clone shares every page with
//! the live state until the engine copies the spine it edits.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.record(state.clone(), "addProduct");
//! state = next;
//!
//! if let Some(previous) = history.undo(state.clone()) {
//!     state = previous;
//! }
//! ```

use catalog_model::CatalogState;
use std::collections::VecDeque;

/// Undo depth used when none is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A captured catalog plus the label of the edit it precedes
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: CatalogState,
    pub description: Option<String>,
}

impl Snapshot {
    pub fn new(state: CatalogState, description: Option<String>) -> Self {
        Self { state, description }
    }
}

/// Undo/redo stacks for catalog editing
#[derive(Debug)]
pub struct History {
    /// Snapshots preceding applied edits (most recent last)
    past: VecDeque<Snapshot>,

    /// Undone states (next redo first)
    future: VecDeque<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Open batch label; while set, further records are absorbed
    batch: Option<Batch>,
}

#[derive(Debug)]
struct Batch {
    description: Option<String>,
    recorded: bool,
}

impl History {
    /// Create a history with the default limit (50)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_levels,
            batch: None,
        }
    }

    /// Record the state that precedes an edit.
    ///
    /// Inside a batch only the first call records a snapshot. Every call
    /// clears the redo stack.
    pub fn record(&mut self, before: CatalogState, description: impl Into<String>) {
        self.future.clear();

        let description = match &mut self.batch {
            Some(batch) if batch.recorded => return,
            Some(batch) => {
                batch.recorded = true;
                batch.description.clone().or_else(|| Some(description.into()))
            }
            None => Some(description.into()),
        };

        self.push_past(Snapshot::new(before, description));
    }

    /// Start grouping edits into one undo step
    pub fn begin_batch(&mut self, description: Option<String>) {
        self.batch = Some(Batch {
            description,
            recorded: false,
        });
    }

    /// Close the current batch. Returns true if it recorded a snapshot.
    pub fn end_batch(&mut self) -> bool {
        self.batch.take().map(|b| b.recorded).unwrap_or(false)
    }

    pub fn in_batch(&self) -> bool {
        self.batch.is_some()
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);

        if self.max_levels > 0 {
            while self.past.len() > self.max_levels {
                self.past.pop_front();
            }
        }
    }

    /// Step back. `current` becomes the first redo entry; returns the
    /// state to restore, or `None` when there is nothing to undo.
    ///
    /// An open batch is closed first, so later edits start a new step.
    pub fn undo(&mut self, current: CatalogState) -> Option<CatalogState> {
        self.batch = None;
        let previous = self.past.pop_back()?;
        self.future
            .push_front(Snapshot::new(current, previous.description.clone()));
        Some(previous.state)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: CatalogState) -> Option<CatalogState> {
        self.batch = None;
        let next = self.future.pop_front()?;
        self.push_past(Snapshot::new(current, next.description.clone()));
        Some(next.state)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Drop both stacks and any open batch
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.batch = None;
    }

    /// Label of the edit the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        self.past.back().and_then(|s| s.description.as_deref())
    }

    /// Label of the edit the next redo reapplies
    pub fn redo_description(&self) -> Option<&str> {
        self.future.front().and_then(|s| s.description.as_deref())
    }

    /// Recorded snapshots, oldest first
    pub fn past(&self) -> impl Iterator<Item = &Snapshot> {
        self.past.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_model::{GlobalSettingsPatch, Page};

    fn state_named(name: &str) -> CatalogState {
        let mut state = CatalogState::new([Page::with_default_grid("page-1", "sec-1")]);
        GlobalSettingsPatch {
            company_name: Some(name.to_string()),
            ..Default::default()
        }
        .merge_into(&mut state.global_settings);
        state
    }

    fn name(state: &CatalogState) -> &str {
        &state.global_settings.company_name
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.max_levels(), 50);
    }

    #[test]
    fn test_record_undo_redo() {
        let mut history = History::new();
        history.record(state_named("v0"), "setGlobalSettings");

        let restored = history.undo(state_named("v1")).unwrap();
        assert_eq!(name(&restored), "v0");
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 1);
        assert_eq!(history.redo_description(), Some("setGlobalSettings"));

        let again = history.redo(restored).unwrap();
        assert_eq!(name(&again), "v1");
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_undo_on_empty_is_none() {
        let mut history = History::new();
        assert!(history.undo(state_named("x")).is_none());
        assert!(history.redo(state_named("x")).is_none());
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut history = History::new();
        history.record(state_named("v0"), "a");
        history.undo(state_named("v1"));
        assert_eq!(history.redo_levels(), 1);

        history.record(state_named("v0"), "b");
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_drops_oldest() {
        let mut history = History::with_max_levels(2);
        for i in 0..3 {
            history.record(state_named(&format!("v{}", i)), format!("edit {}", i));
        }

        assert_eq!(history.undo_levels(), 2);
        let names: Vec<&str> = history.past().map(|s| name(&s.state)).collect();
        assert_eq!(names, vec!["v1", "v2"]);
    }

    #[test]
    fn test_batch_records_once() {
        let mut history = History::new();
        history.begin_batch(Some("Import CSV".to_string()));
        history.record(state_named("v0"), "addPage");
        history.record(state_named("v1"), "addSection");
        history.record(state_named("v2"), "addPage");
        assert!(history.end_batch());

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("Import CSV"));
        let restored = history.undo(state_named("v3")).unwrap();
        assert_eq!(name(&restored), "v0");
    }

    #[test]
    fn test_empty_batch_records_nothing() {
        let mut history = History::new();
        history.begin_batch(None);
        assert!(!history.end_batch());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_closes_open_batch() {
        let mut history = History::new();
        history.begin_batch(Some("Arrange".to_string()));
        history.record(state_named("v0"), "addPage");

        history.undo(state_named("v1"));
        assert!(!history.in_batch());
        assert_eq!(history.redo_levels(), 1);

        history.record(state_named("v0"), "addPage");
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }
}
