//! # Catalog Editor
//!
//! Editing engine for paginated product catalogs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: pages → sections → products          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: CatalogStore                        │
//! │  - Apply mutations with validation          │
//! │  - Snapshot undo/redo (bounded)             │
//! │  - Selection focus                          │
//! │  - Bulk product import                      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ reconciler: measure pages → push overflow   │
//! │  forward one product per tick               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **State is immutable**: every mutation yields a new [`CatalogState`]
//!    that shares untouched pages, sections and products with the old one
//! 2. **Unknown targets are no-ops**: a mutation that cannot apply leaves
//!    the state exactly as it was and says why
//! 3. **One writer**: all edits go through `&mut CatalogStore`
//! 4. **Geometry is injected**: the reconciler only sees [`PageLayout`]s
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_editor::{CatalogStore, GridLayout, Reconciler};
//! use catalog_editor::model::Product;
//!
//! let mut store = CatalogStore::sample();
//! store.add_product("page-1", "section-2", Product::new("prod-3", "Caneca"))?;
//!
//! let report = Reconciler::default().run_until_stable(&mut store, &GridLayout::default())?;
//! println!("{} products moved", report.moves);
//!
//! store.undo();
//! ```

mod config;
mod errors;
mod history;
mod import;
mod layout;
mod mutations;
mod reconciler;
mod selection;
mod store;

pub use config::{EditorConfig, LayoutConfig, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use history::{History, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use import::{ImportSummary, ImportedProduct};
pub use layout::{GridLayout, LayoutProbe, MeasuredControl, MeasuredProduct, PageLayout};
pub use mutations::{apply_mutation, Direction, Mutation, MutationError, Outcome};
pub use reconciler::{
    ControlVisibility, Detection, ReconcileError, ReconcileReport, Reconciler, Tick,
};
pub use selection::{Resolved, Selection, SelectionKind};
pub use store::CatalogStore;

// Re-export the model for convenience
pub use catalog_model as model;
pub use catalog_model::CatalogState;
