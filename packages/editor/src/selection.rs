//! Focus tracking for the properties panel.
//!
//! The tracker stores whatever the UI last selected and never checks it
//! against the catalog. Consumers re-resolve the id on every read via
//! [`Selection::resolve`] and show an empty state when it is gone.

use catalog_model::{CatalogState, Page, Product, Section};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Page,
    Section,
    Product,
    Global,
}

/// The active `(type, id)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub kind: Option<SelectionKind>,
    pub id: Option<String>,
}

/// A selection resolved against a concrete catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Page(&'a Page),
    Section { page: &'a Page, section: &'a Section },
    Product {
        page: &'a Page,
        section: &'a Section,
        product: &'a Product,
    },
    Global,
}

impl Selection {
    pub fn select(&mut self, kind: Option<SelectionKind>, id: Option<String>) {
        self.kind = kind;
        self.id = id;
    }

    pub fn clear(&mut self) {
        self.select(None, None);
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }

    /// Look the selection up in `state`; `None` when nothing is selected
    /// or the selected entity no longer exists.
    pub fn resolve<'a>(&self, state: &'a CatalogState) -> Option<Resolved<'a>> {
        match (self.kind?, self.id.as_deref()) {
            (SelectionKind::Global, _) => Some(Resolved::Global),
            (SelectionKind::Page, Some(id)) => state.page(id).map(Resolved::Page),
            (SelectionKind::Section, Some(id)) => state
                .locate_section(id)
                .map(|(page, section)| Resolved::Section { page, section }),
            (SelectionKind::Product, Some(id)) => {
                let location = state.locate_product(id)?;
                let page = state.page(&location.page_id)?;
                let section = page.section(&location.section_id)?;
                let product = section.products().get(location.index)?;
                Some(Resolved::Product { page, section, product })
            }
            (_, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_resolve_product() {
        let state = CatalogState::sample();
        let mut selection = Selection::default();
        selection.select(Some(SelectionKind::Product), Some("prod-2".to_string()));

        match selection.resolve(&state) {
            Some(Resolved::Product { page, section, product }) => {
                assert_eq!(page.id, "page-1");
                assert_eq!(section.id, "section-2");
                assert_eq!(product.name, "Exemplo Produto 2");
            }
            other => panic!("Expected product, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_selection_resolves_to_none() {
        let state = CatalogState::sample();
        let mut selection = Selection::default();
        selection.select(Some(SelectionKind::Section), Some("gone".to_string()));

        assert!(!selection.is_empty());
        assert!(selection.resolve(&state).is_none());
    }

    #[test]
    fn test_global_needs_no_id() {
        let state = CatalogState::sample();
        let mut selection = Selection::default();
        selection.select(Some(SelectionKind::Global), None);
        assert_eq!(selection.resolve(&state), Some(Resolved::Global));

        selection.clear();
        assert!(selection.resolve(&state).is_none());
    }
}
