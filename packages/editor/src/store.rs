//! # Catalog Store
//!
//! The single owner of the live catalog.
//!
//! Every write goes through a `&mut self` command, so there is exactly
//! one writer at a time. Readers borrow [`CatalogStore::state`] or take a
//! [`CatalogStore::snapshot`], which is a cheap shared copy.
//!
//! ## Lifecycle
//!
//! ```text
//! intent ──→ record snapshot ──→ apply mutation ──→ new state ──→ reconcile
//!                  ↓                                    ↑
//!               History ──────── undo / redo ───────────┘
//! ```
//!
//! ## Policies
//!
//! - A mutation that resolves to a no-op records no history and leaves
//!   the version untouched. In strict mode it is returned as an error.
//! - `remove_page` refuses to delete the last page while
//!   `guard_last_page` is set. Raw [`Mutation::RemovePage`] values passed
//!   to [`CatalogStore::apply`] bypass this check.
//! - `import_catalog` installs a fresh baseline: both history stacks and
//!   the selection are cleared.

use crate::history::History;
use crate::mutations::{apply_mutation, Direction, Mutation, Outcome};
use crate::selection::{Selection, SelectionKind};
use crate::{EditorConfig, EditorError};
use catalog_model::{
    CatalogState, CoverPagePatch, GlobalSettingsPatch, IdGenerator, Product, ProductPatch,
    Section, SectionPatch,
};
use tracing::{debug, info, warn};

/// Editable catalog with undo/redo and focus state
#[derive(Debug)]
pub struct CatalogStore {
    state: CatalogState,
    history: History,
    selection: Selection,
    ids: IdGenerator,
    config: EditorConfig,

    /// Increments on every applied mutation, undo, redo and import
    version: u64,
}

impl CatalogStore {
    pub fn new(state: CatalogState, config: EditorConfig) -> Self {
        Self::with_ids(state, config, IdGenerator::new())
    }

    /// Create a store with an explicit id generator (deterministic ids)
    pub fn with_ids(state: CatalogState, config: EditorConfig, ids: IdGenerator) -> Self {
        Self {
            state,
            history: History::with_max_levels(config.history_limit),
            selection: Selection::default(),
            ids,
            config,
            version: 0,
        }
    }

    /// Store seeded with the sample catalog and default config
    pub fn sample() -> Self {
        Self::new(CatalogState::sample(), EditorConfig::default())
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Shared copy of the current state for readers and exporters
    pub fn snapshot(&self) -> CatalogState {
        self.state.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Fresh id that no entity in the catalog uses
    pub fn generate_id(&mut self, prefix: &str) -> String {
        let state = &self.state;
        self.ids.new_unique_id(prefix, |c| state.contains_id(c))
    }

    /// Offer a mutation to the engine, never failing.
    pub fn dispatch(&mut self, mutation: Mutation) -> Outcome {
        let (next, outcome) = apply_mutation(&self.state, &mutation, &mut self.ids);

        match &outcome {
            Outcome::Applied => {
                let previous = std::mem::replace(&mut self.state, next);
                self.history.record(previous, mutation.name());
                self.version += 1;
                debug!(mutation = mutation.name(), version = self.version, "Applied mutation");
            }
            Outcome::NoOp(reason) => {
                warn!(mutation = mutation.name(), reason = %reason, "Mutation was a no-op");
            }
        }

        outcome
    }

    /// Offer a mutation, honoring strict mode
    pub fn apply(&mut self, mutation: Mutation) -> Result<Outcome, EditorError> {
        let outcome = self.dispatch(mutation);
        match outcome.reason() {
            Some(reason) if self.config.strict => Err(EditorError::Mutation(reason.clone())),
            _ => Ok(outcome),
        }
    }

    pub fn set_global_settings(&mut self, patch: GlobalSettingsPatch) -> Result<Outcome, EditorError> {
        self.apply(Mutation::SetGlobalSettings { patch })
    }

    pub fn add_page(&mut self, page_id: Option<String>) -> Result<Outcome, EditorError> {
        self.apply(Mutation::AddPage { page_id })
    }

    /// Remove a page, refusing to empty the catalog when guarded
    pub fn remove_page(&mut self, page_id: &str) -> Result<Outcome, EditorError> {
        let is_last = self.state.pages.len() == 1 && self.state.pages[0].id == page_id;
        if self.config.guard_last_page && is_last {
            warn!(page_id, "Refusing to remove the last page");
            return Err(EditorError::LastPageDeletion(page_id.to_string()));
        }
        self.apply(Mutation::RemovePage {
            page_id: page_id.to_string(),
        })
    }

    pub fn reorder_pages(&mut self, old_index: usize, new_index: usize) -> Result<Outcome, EditorError> {
        self.apply(Mutation::ReorderPages { old_index, new_index })
    }

    pub fn add_section(&mut self, page_id: &str, section: Section) -> Result<Outcome, EditorError> {
        self.apply(Mutation::AddSection {
            page_id: page_id.to_string(),
            section,
        })
    }

    pub fn update_section(
        &mut self,
        page_id: &str,
        section_id: &str,
        patch: SectionPatch,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::UpdateSection {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
            patch,
        })
    }

    pub fn remove_section(&mut self, page_id: &str, section_id: &str) -> Result<Outcome, EditorError> {
        self.apply(Mutation::RemoveSection {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
        })
    }

    pub fn add_product(
        &mut self,
        page_id: &str,
        section_id: &str,
        product: Product,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::AddProduct {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
            product,
        })
    }

    pub fn update_product(
        &mut self,
        page_id: &str,
        section_id: &str,
        product_id: &str,
        patch: ProductPatch,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::UpdateProduct {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
            product_id: product_id.to_string(),
            patch,
        })
    }

    pub fn remove_product(
        &mut self,
        page_id: &str,
        section_id: &str,
        product_id: &str,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::RemoveProduct {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
            product_id: product_id.to_string(),
        })
    }

    pub fn reorder_section(
        &mut self,
        page_id: &str,
        section_id: &str,
        direction: Direction,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::ReorderSection {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
            direction,
        })
    }

    pub fn reorder_products(
        &mut self,
        page_id: &str,
        section_id: &str,
        old_index: usize,
        new_index: usize,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::ReorderProducts {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
            old_index,
            new_index,
        })
    }

    pub fn move_product(
        &mut self,
        source_page_id: &str,
        source_section_id: &str,
        target_page_id: &str,
        target_section_id: &str,
        product_id: &str,
        new_index: usize,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::MoveProduct {
            source_page_id: source_page_id.to_string(),
            source_section_id: source_section_id.to_string(),
            target_page_id: target_page_id.to_string(),
            target_section_id: target_section_id.to_string(),
            product_id: product_id.to_string(),
            new_index,
        })
    }

    pub fn move_product_to_next_page(
        &mut self,
        page_id: &str,
        section_id: &str,
        product_id: &str,
    ) -> Result<Outcome, EditorError> {
        self.apply(Mutation::MoveProductToNextPage {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
            product_id: product_id.to_string(),
        })
    }

    pub fn set_cover_page(&mut self, patch: CoverPagePatch) -> Result<Outcome, EditorError> {
        self.apply(Mutation::SetCoverPage { patch })
    }

    pub fn remove_cover_page(&mut self) -> Result<Outcome, EditorError> {
        self.apply(Mutation::RemoveCoverPage)
    }

    /// Replace the whole catalog and start history from scratch.
    ///
    /// Shape validation is the caller's job.
    pub fn import_catalog(&mut self, state: CatalogState) {
        self.state = state;
        self.history.clear();
        self.selection.clear();
        self.version += 1;
        info!(
            pages = self.state.pages.len(),
            products = self.state.product_count(),
            "Imported catalog"
        );
    }

    /// Undo the most recent edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.history.in_batch() {
            debug!("Undo closes the open batch");
        }
        let current = self.state.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.state = previous;
                self.version += 1;
                info!(version = self.version, "Undo");
                true
            }
            None => false,
        }
    }

    /// Redo the most recently undone edit
    pub fn redo(&mut self) -> bool {
        if self.history.in_batch() {
            debug!("Redo closes the open batch");
        }
        let current = self.state.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.state = next;
                self.version += 1;
                info!(version = self.version, "Redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch(Some(description.into()));
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_item(&mut self, kind: Option<SelectionKind>, id: Option<String>) {
        self.selection.select(kind, id);
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::sample()
    }
}
