//! Id lookups across the page → section → product tree.

use crate::{CatalogState, Page, Product, Section};

/// Where a product currently lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLocation {
    pub page_id: String,
    pub section_id: String,
    pub index: usize,
}

impl CatalogState {
    pub fn page_index(&self, page_id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == page_id)
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id).map(|p| p.as_ref())
    }

    pub fn section(&self, page_id: &str, section_id: &str) -> Option<&Section> {
        self.page(page_id)?.section(section_id)
    }

    /// Find a product anywhere in the catalog.
    pub fn locate_product(&self, product_id: &str) -> Option<ProductLocation> {
        for page in &self.pages {
            for section in &page.sections {
                if let Some(index) = section.product_index(product_id) {
                    return Some(ProductLocation {
                        page_id: page.id.clone(),
                        section_id: section.id.clone(),
                        index,
                    });
                }
            }
        }
        None
    }

    /// Locate a section without knowing its page.
    pub fn locate_section(&self, section_id: &str) -> Option<(&Page, &Section)> {
        self.pages.iter().find_map(|page| {
            page.section(section_id).map(|section| (page.as_ref(), section))
        })
    }

    pub fn product_count(&self) -> usize {
        self.pages.iter().map(|p| p.product_count()).sum()
    }

    /// All products in page, section, grid order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.pages
            .iter()
            .flat_map(|page| page.sections.iter())
            .flat_map(|section| section.products().iter())
            .map(|p| p.as_ref())
    }

    /// True when any page, section or product already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.pages.iter().any(|page| {
            page.id == id
                || page.sections.iter().any(|section| {
                    section.id == id || section.products().iter().any(|p| p.id == id)
                })
        })
    }

    /// Every id in the catalog, in tree order. Duplicates are kept so
    /// callers can check uniqueness.
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for page in &self.pages {
            ids.push(page.id.as_str());
            for section in &page.sections {
                ids.push(section.id.as_str());
                ids.extend(section.products().iter().map(|p| p.id.as_str()));
            }
        }
        ids
    }
}
