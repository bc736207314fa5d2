//! # Catalog Model
//!
//! Entity shapes for the catalog editor: the normalized tree of
//! pages → sections → products plus the two singletons (cover page and
//! global presentation settings).
//!
//! ## Ownership
//!
//! ```text
//! CatalogState
//!  ├─ coverPage?        (singleton)
//!  ├─ globalSettings    (singleton)
//!  └─ pages[]           Arc<Page>
//!      └─ sections[]    Arc<Section>
//!          └─ products[] Arc<Product>   (product-grid sections only)
//! ```
//!
//! Every child sits behind an `Arc`, so cloning a [`CatalogState`] is a
//! shallow copy. Editors copy-on-write only the spine leading to the
//! entity they change; everything else stays pointer-equal to the
//! previous state.

pub mod entities;
pub mod error;
pub mod id_generator;
pub mod patch;
mod tree;

pub use entities::{
    CatalogState, Columns, CoverPage, GlobalSettings, Page, Product, Section, SectionType,
};
pub use error::ModelError;
pub use id_generator::{get_session_seed, IdGenerator};
pub use patch::{CoverPagePatch, GlobalSettingsPatch, ProductPatch, SectionPatch};
pub use tree::ProductLocation;
