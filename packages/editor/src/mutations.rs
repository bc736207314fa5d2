//! # Catalog Mutations
//!
//! Structural edit operations on a [`CatalogState`].
//!
//! ## Design Principles
//!
//! 1. **Intent as data**: every edit is a [`Mutation`] value, so drag and
//!    drop, panels and the overflow reconciler all speak the same language
//! 2. **Validated**: a mutation checks every precondition before it
//!    touches the tree, so a rejected mutation leaves no partial edit
//! 3. **Path-copy**: only the page/section/product spine leading to the
//!    change is copied; everything else stays shared with the prior state
//! 4. **Tolerant**: a stale id is a no-op, reported as a [`MutationError`]
//!    inside [`Outcome::NoOp`] rather than a failure
//!
//! ## Mutation Semantics
//!
//! ### Array moves (`ReorderPages`, `ReorderProducts`)
//! - Remove at `old_index`, reinsert at `new_index`
//! - Both indices are clamped into the list; equal clamped indices are
//!   `Unchanged`
//!
//! ### MoveProduct
//! - Source and destination are both resolved before the product is
//!   removed; the insert index is clamped against the destination list
//!   as it stands after the removal
//!
//! ### MoveProductToNextPage
//! - Targets the page right after the source page, creating it when the
//!   source is the last page
//! - Prepends to the first product-grid section of that page

use catalog_model::{
    CatalogState, CoverPage, CoverPagePatch, GlobalSettingsPatch, IdGenerator, Page, Product,
    ProductPatch, Section, SectionPatch, SectionType,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Structural edit intents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Shallow-merge presentation defaults
    SetGlobalSettings { patch: GlobalSettingsPatch },

    /// Append a page holding one empty 3-column grid
    AddPage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_id: Option<String>,
    },

    RemovePage { page_id: String },

    ReorderPages { old_index: usize, new_index: usize },

    /// Headers are inserted first, every other section type is appended
    AddSection { page_id: String, section: Section },

    UpdateSection {
        page_id: String,
        section_id: String,
        patch: SectionPatch,
    },

    RemoveSection { page_id: String, section_id: String },

    AddProduct {
        page_id: String,
        section_id: String,
        product: Product,
    },

    UpdateProduct {
        page_id: String,
        section_id: String,
        product_id: String,
        patch: ProductPatch,
    },

    RemoveProduct {
        page_id: String,
        section_id: String,
        product_id: String,
    },

    /// Swap a section with its neighbour
    ReorderSection {
        page_id: String,
        section_id: String,
        direction: Direction,
    },

    ReorderProducts {
        page_id: String,
        section_id: String,
        old_index: usize,
        new_index: usize,
    },

    MoveProduct {
        source_page_id: String,
        source_section_id: String,
        target_page_id: String,
        target_section_id: String,
        product_id: String,
        new_index: usize,
    },

    /// Overflow relocation: prepend to the next page's first grid
    MoveProductToNextPage {
        page_id: String,
        section_id: String,
        product_id: String,
    },

    SetCoverPage { patch: CoverPagePatch },

    RemoveCoverPage,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Section {section_id} not found on page {page_id}")]
    SectionNotFound { page_id: String, section_id: String },

    #[error("Product {product_id} not found in section {section_id}")]
    ProductNotFound {
        section_id: String,
        product_id: String,
    },

    #[error("Section {0} is not a product grid")]
    NotAProductGrid(String),

    #[error("Page {0} has no product-grid section")]
    NoProductGrid(String),

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Mutation leaves the catalog unchanged")]
    Unchanged,
}

/// What happened when a mutation was offered to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    NoOp(MutationError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn reason(&self) -> Option<&MutationError> {
        match self {
            Outcome::Applied => None,
            Outcome::NoOp(reason) => Some(reason),
        }
    }
}

/// Apply `mutation` to a copy of `state`.
///
/// The returned state shares every page, section and product that the
/// mutation did not touch. On a no-op the returned state is a plain
/// clone of the input.
pub fn apply_mutation(
    state: &CatalogState,
    mutation: &Mutation,
    ids: &mut IdGenerator,
) -> (CatalogState, Outcome) {
    let mut next = state.clone();
    match mutation.apply(&mut next, ids) {
        Ok(()) => (next, Outcome::Applied),
        Err(reason) => (state.clone(), Outcome::NoOp(reason)),
    }
}

impl Mutation {
    /// Debug name, also used as the history label
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetGlobalSettings { .. } => "setGlobalSettings",
            Mutation::AddPage { .. } => "addPage",
            Mutation::RemovePage { .. } => "removePage",
            Mutation::ReorderPages { .. } => "reorderPages",
            Mutation::AddSection { .. } => "addSection",
            Mutation::UpdateSection { .. } => "updateSection",
            Mutation::RemoveSection { .. } => "removeSection",
            Mutation::AddProduct { .. } => "addProduct",
            Mutation::UpdateProduct { .. } => "updateProduct",
            Mutation::RemoveProduct { .. } => "removeProduct",
            Mutation::ReorderSection { .. } => "reorderSection",
            Mutation::ReorderProducts { .. } => "reorderProducts",
            Mutation::MoveProduct { .. } => "moveProduct",
            Mutation::MoveProductToNextPage { .. } => "moveProductToNextPage",
            Mutation::SetCoverPage { .. } => "setCoverPage",
            Mutation::RemoveCoverPage => "removeCoverPage",
        }
    }

    /// Apply in place. Validates first; on error `state` is untouched.
    pub fn apply(&self, state: &mut CatalogState, ids: &mut IdGenerator) -> Result<(), MutationError> {
        self.validate(state)?;

        match self {
            Mutation::SetGlobalSettings { patch } => {
                patch.merge_into(&mut state.global_settings);
                Ok(())
            }

            Mutation::AddPage { page_id } => {
                let page_id = match page_id {
                    Some(id) => id.clone(),
                    None => ids.new_unique_id("page", |c| state.contains_id(c)),
                };
                let section_id = ids.new_unique_id("sec", |c| c == page_id || state.contains_id(c));
                state
                    .pages
                    .push(Arc::new(Page::with_default_grid(page_id, section_id)));
                Ok(())
            }

            Mutation::RemovePage { page_id } => {
                state.pages.retain(|p| &p.id != page_id);
                Ok(())
            }

            Mutation::ReorderPages { old_index, new_index } => {
                let (from, to) = clamp_move(state.pages.len(), *old_index, *new_index)?;
                array_move(&mut state.pages, from, to);
                Ok(())
            }

            Mutation::AddSection { page_id, section } => {
                let page = page_mut(state, page_id)?;
                let section = Arc::new(section.clone());
                if section.section_type == SectionType::Header {
                    page.sections.insert(0, section);
                } else {
                    page.sections.push(section);
                }
                Ok(())
            }

            Mutation::UpdateSection { page_id, section_id, patch } => {
                let section = section_mut(state, page_id, section_id)?;
                patch.merge_into(section);
                Ok(())
            }

            Mutation::RemoveSection { page_id, section_id } => {
                let page = page_mut(state, page_id)?;
                page.sections.retain(|s| &s.id != section_id);
                Ok(())
            }

            Mutation::AddProduct { page_id, section_id, product } => {
                let section = section_mut(state, page_id, section_id)?;
                section.products_mut().push(Arc::new(product.clone()));
                Ok(())
            }

            Mutation::UpdateProduct { page_id, section_id, product_id, patch } => {
                let section = section_mut(state, page_id, section_id)?;
                let index = product_index(section, product_id)?;
                let product = Arc::make_mut(&mut section.products_mut()[index]);
                patch.merge_into(product);
                Ok(())
            }

            Mutation::RemoveProduct { page_id, section_id, product_id } => {
                let section = section_mut(state, page_id, section_id)?;
                section.products_mut().retain(|p| &p.id != product_id);
                Ok(())
            }

            Mutation::ReorderSection { page_id, section_id, direction } => {
                let (page_index, from) = find_section(state, page_id, section_id)?;
                let len = state.pages[page_index].sections.len();
                let to = neighbour(from, len, *direction)?;
                Arc::make_mut(&mut state.pages[page_index]).sections.swap(from, to);
                Ok(())
            }

            Mutation::ReorderProducts { page_id, section_id, old_index, new_index } => {
                let (page_index, section_index) = find_section(state, page_id, section_id)?;
                let len = state.pages[page_index].sections[section_index].products().len();
                let (from, to) = clamp_move(len, *old_index, *new_index)?;
                let section = section_at_mut(state, page_index, section_index);
                array_move(section.products_mut(), from, to);
                Ok(())
            }

            Mutation::MoveProduct {
                source_page_id,
                source_section_id,
                target_page_id,
                target_section_id,
                product_id,
                new_index,
            } => {
                let (src_page, src_section) = find_section(state, source_page_id, source_section_id)?;
                let (dst_page, dst_section) = find_section(state, target_page_id, target_section_id)?;

                let source = section_at_mut(state, src_page, src_section);
                let index = product_index(source, product_id)?;
                let product = source.products_mut().remove(index);

                let target = section_at_mut(state, dst_page, dst_section);
                let products = target.products_mut();
                let insert_at = (*new_index).min(products.len());
                products.insert(insert_at, product);
                Ok(())
            }

            Mutation::MoveProductToNextPage { page_id, section_id, product_id } => {
                let (src_page, src_section) = find_section(state, page_id, section_id)?;
                let target_page = src_page + 1;

                if target_page >= state.pages.len() {
                    let new_page_id = ids.new_unique_id("page", |c| state.contains_id(c));
                    let new_section_id =
                        ids.new_unique_id("sec", |c| c == new_page_id || state.contains_id(c));
                    state
                        .pages
                        .push(Arc::new(Page::with_default_grid(new_page_id, new_section_id)));
                }

                let target_section = state.pages[target_page]
                    .first_product_grid()
                    .ok_or_else(|| MutationError::NoProductGrid(state.pages[target_page].id.clone()))?;

                let source = section_at_mut(state, src_page, src_section);
                let index = product_index(source, product_id)?;
                let product = source.products_mut().remove(index);

                section_at_mut(state, target_page, target_section)
                    .products_mut()
                    .insert(0, product);
                Ok(())
            }

            Mutation::SetCoverPage { patch } => {
                patch.merge_into(state.cover_page.get_or_insert_with(CoverPage::default));
                Ok(())
            }

            Mutation::RemoveCoverPage => {
                state.cover_page = Some(CoverPage::default());
                Ok(())
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, state: &CatalogState) -> Result<(), MutationError> {
        match self {
            Mutation::SetGlobalSettings { .. }
            | Mutation::SetCoverPage { .. }
            | Mutation::RemoveCoverPage => Ok(()),

            Mutation::AddPage { page_id } => match page_id {
                Some(id) if state.contains_id(id) => Err(MutationError::DuplicateId(id.clone())),
                _ => Ok(()),
            },

            Mutation::RemovePage { page_id } => {
                require_page(state, page_id)?;
                Ok(())
            }

            Mutation::ReorderPages { old_index, new_index } => {
                clamp_move(state.pages.len(), *old_index, *new_index)?;
                Ok(())
            }

            Mutation::AddSection { page_id, section } => {
                require_page(state, page_id)?;
                check_new_section_ids(state, section)
            }

            Mutation::UpdateSection { page_id, section_id, patch } => {
                find_section(state, page_id, section_id)?;
                if patch.is_empty() {
                    return Err(MutationError::Unchanged);
                }
                Ok(())
            }

            Mutation::RemoveSection { page_id, section_id } => {
                find_section(state, page_id, section_id)?;
                Ok(())
            }

            Mutation::AddProduct { page_id, section_id, product } => {
                require_grid(state, page_id, section_id)?;
                if state.contains_id(&product.id) {
                    return Err(MutationError::DuplicateId(product.id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateProduct { page_id, section_id, product_id, patch } => {
                let section = require_section(state, page_id, section_id)?;
                product_index(section, product_id)?;
                if patch.is_empty() {
                    return Err(MutationError::Unchanged);
                }
                Ok(())
            }

            Mutation::RemoveProduct { page_id, section_id, product_id } => {
                let section = require_section(state, page_id, section_id)?;
                product_index(section, product_id)?;
                Ok(())
            }

            Mutation::ReorderSection { page_id, section_id, direction } => {
                let page = require_page(state, page_id)?;
                let index = page.section_index(section_id).ok_or_else(|| {
                    MutationError::SectionNotFound {
                        page_id: page_id.clone(),
                        section_id: section_id.clone(),
                    }
                })?;
                neighbour(index, page.sections.len(), *direction)?;
                Ok(())
            }

            Mutation::ReorderProducts { page_id, section_id, old_index, new_index } => {
                let section = require_section(state, page_id, section_id)?;
                clamp_move(section.products().len(), *old_index, *new_index)?;
                Ok(())
            }

            Mutation::MoveProduct {
                source_page_id,
                source_section_id,
                target_page_id,
                target_section_id,
                product_id,
                ..
            } => {
                let source = require_section(state, source_page_id, source_section_id)?;
                require_grid(state, target_page_id, target_section_id)?;
                product_index(source, product_id)?;
                Ok(())
            }

            Mutation::MoveProductToNextPage { page_id, section_id, product_id } => {
                let source = require_section(state, page_id, section_id)?;
                product_index(source, product_id)?;

                let page_index = state
                    .page_index(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;

                // A page created on demand always carries a grid.
                if let Some(next) = state.pages.get(page_index + 1) {
                    if next.first_product_grid().is_none() {
                        return Err(MutationError::NoProductGrid(next.id.clone()));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Validate the clamped bounds of an array move.
fn clamp_move(len: usize, old_index: usize, new_index: usize) -> Result<(usize, usize), MutationError> {
    if len == 0 {
        return Err(MutationError::IndexOutOfRange { index: old_index, len });
    }
    let last = len - 1;
    let (from, to) = (old_index.min(last), new_index.min(last));
    if from == to {
        return Err(MutationError::Unchanged);
    }
    Ok((from, to))
}

fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

fn neighbour(index: usize, len: usize, direction: Direction) -> Result<usize, MutationError> {
    match direction {
        Direction::Up if index > 0 => Ok(index - 1),
        Direction::Down if index + 1 < len => Ok(index + 1),
        _ => Err(MutationError::Unchanged),
    }
}

fn require_page<'a>(state: &'a CatalogState, page_id: &str) -> Result<&'a Page, MutationError> {
    state
        .page(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))
}

fn require_section<'a>(
    state: &'a CatalogState,
    page_id: &str,
    section_id: &str,
) -> Result<&'a Section, MutationError> {
    require_page(state, page_id)?
        .section(section_id)
        .ok_or_else(|| MutationError::SectionNotFound {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
        })
}

fn require_grid<'a>(
    state: &'a CatalogState,
    page_id: &str,
    section_id: &str,
) -> Result<&'a Section, MutationError> {
    let section = require_section(state, page_id, section_id)?;
    if !section.is_product_grid() {
        return Err(MutationError::NotAProductGrid(section_id.to_string()));
    }
    Ok(section)
}

fn check_new_section_ids(state: &CatalogState, section: &Section) -> Result<(), MutationError> {
    if state.contains_id(&section.id) {
        return Err(MutationError::DuplicateId(section.id.clone()));
    }

    let mut seen = vec![section.id.as_str()];
    for product in section.products() {
        if state.contains_id(&product.id) || seen.contains(&product.id.as_str()) {
            return Err(MutationError::DuplicateId(product.id.clone()));
        }
        seen.push(product.id.as_str());
    }
    Ok(())
}

fn find_section(
    state: &CatalogState,
    page_id: &str,
    section_id: &str,
) -> Result<(usize, usize), MutationError> {
    let page_index = state
        .page_index(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;
    let section_index = state.pages[page_index]
        .section_index(section_id)
        .ok_or_else(|| MutationError::SectionNotFound {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
        })?;
    Ok((page_index, section_index))
}

fn product_index(section: &Section, product_id: &str) -> Result<usize, MutationError> {
    section
        .product_index(product_id)
        .ok_or_else(|| MutationError::ProductNotFound {
            section_id: section.id.clone(),
            product_id: product_id.to_string(),
        })
}

fn page_mut<'a>(state: &'a mut CatalogState, page_id: &str) -> Result<&'a mut Page, MutationError> {
    let index = state
        .page_index(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;
    Ok(Arc::make_mut(&mut state.pages[index]))
}

fn section_mut<'a>(
    state: &'a mut CatalogState,
    page_id: &str,
    section_id: &str,
) -> Result<&'a mut Section, MutationError> {
    let (page_index, section_index) = find_section(state, page_id, section_id)?;
    Ok(section_at_mut(state, page_index, section_index))
}

/// Copy-on-write the page → section spine and hand out the section.
fn section_at_mut(state: &mut CatalogState, page_index: usize, section_index: usize) -> &mut Section {
    let page = Arc::make_mut(&mut state.pages[page_index]);
    Arc::make_mut(&mut page.sections[section_index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_model::Columns;

    fn catalog() -> CatalogState {
        let grid_a = Section::product_grid("sec-a", Columns::Three)
            .with_products((1..=3).map(|i| Product::new(format!("a{}", i), format!("A{}", i))));
        let grid_b = Section::product_grid("sec-b", Columns::Three);
        CatalogState::new([
            Page::new("page-1", [grid_a, grid_b]),
            Page::new("page-2", [Section::header("hdr-2", "Title")]),
        ])
    }

    fn ids() -> IdGenerator {
        IdGenerator::from_seed("t")
    }

    fn product_ids(state: &CatalogState, page: &str, section: &str) -> Vec<String> {
        state
            .section(page, section)
            .unwrap()
            .products()
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveProduct {
            source_page_id: "page-1".to_string(),
            source_section_id: "sec-a".to_string(),
            target_page_id: "page-1".to_string(),
            target_section_id: "sec-b".to_string(),
            product_id: "a1".to_string(),
            new_index: 0,
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["op"], "moveProduct");
        assert_eq!(json["sourcePageId"], "page-1");

        let deserialized: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_validation_rejects_empty_ids() {
        let state = catalog();
        let mutation = Mutation::RemovePage { page_id: String::new() };
        assert_eq!(
            mutation.validate(&state),
            Err(MutationError::PageNotFound(String::new()))
        );
    }

    #[test]
    fn test_untouched_pages_are_shared() {
        let state = catalog();
        let mutation = Mutation::UpdateProduct {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            product_id: "a2".to_string(),
            patch: ProductPatch {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        };

        let (next, outcome) = apply_mutation(&state, &mutation, &mut ids());

        assert!(outcome.is_applied());
        assert!(Arc::ptr_eq(&state.pages[1], &next.pages[1]));
        assert!(!Arc::ptr_eq(&state.pages[0], &next.pages[0]));
        // Sibling section and sibling products are still shared.
        assert!(Arc::ptr_eq(&state.pages[0].sections[1], &next.pages[0].sections[1]));
        let before = state.pages[0].sections[0].products();
        let after = next.pages[0].sections[0].products();
        assert!(Arc::ptr_eq(&before[0], &after[0]));
        assert!(!Arc::ptr_eq(&before[1], &after[1]));
        assert_eq!(after[1].name, "Renamed");
        // The input is never modified.
        assert_eq!(before[1].name, "A2");
    }

    #[test]
    fn test_add_page_generates_ids() {
        let state = catalog();
        let mut ids = ids();
        let (next, outcome) = apply_mutation(&state, &Mutation::AddPage { page_id: None }, &mut ids);

        assert!(outcome.is_applied());
        assert_eq!(next.pages.len(), 3);
        let page = &next.pages[2];
        assert_eq!(page.id, "page-t-1");
        assert_eq!(page.sections[0].id, "sec-t-2");
        assert!(page.sections[0].is_product_grid());
    }

    #[test]
    fn test_add_page_rejects_duplicate_id() {
        let state = catalog();
        let (_, outcome) = apply_mutation(
            &state,
            &Mutation::AddPage { page_id: Some("sec-a".to_string()) },
            &mut ids(),
        );
        assert_eq!(outcome, Outcome::NoOp(MutationError::DuplicateId("sec-a".to_string())));
    }

    #[test]
    fn test_header_sections_lead() {
        let state = catalog();
        let mutation = Mutation::AddSection {
            page_id: "page-1".to_string(),
            section: Section::header("hdr-1", "Promo"),
        };
        let (next, _) = apply_mutation(&state, &mutation, &mut ids());
        let sections = &next.page("page-1").unwrap().sections;
        assert_eq!(sections[0].id, "hdr-1");
        assert_eq!(sections.len(), 3);

        let footer = Mutation::AddSection {
            page_id: "page-1".to_string(),
            section: Section::footer("ftr-1"),
        };
        let (next, _) = apply_mutation(&next, &footer, &mut ids());
        assert_eq!(next.page("page-1").unwrap().sections[3].id, "ftr-1");
    }

    #[test]
    fn test_reorder_section_boundaries() {
        let state = catalog();
        let up = Mutation::ReorderSection {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            direction: Direction::Up,
        };
        let (_, outcome) = apply_mutation(&state, &up, &mut ids());
        assert_eq!(outcome, Outcome::NoOp(MutationError::Unchanged));

        let down = Mutation::ReorderSection {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            direction: Direction::Down,
        };
        let (next, outcome) = apply_mutation(&state, &down, &mut ids());
        assert!(outcome.is_applied());
        let order: Vec<&str> = next.pages[0].sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["sec-b", "sec-a"]);
    }

    #[test]
    fn test_reorder_products_clamps_indices() {
        let state = catalog();
        let mutation = Mutation::ReorderProducts {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            old_index: 0,
            new_index: 99,
        };
        let (next, outcome) = apply_mutation(&state, &mutation, &mut ids());
        assert!(outcome.is_applied());
        assert_eq!(product_ids(&next, "page-1", "sec-a"), vec!["a2", "a3", "a1"]);
    }

    #[test]
    fn test_reorder_pages_moves_and_clamps() {
        let state = CatalogState::new([
            Page::with_default_grid("page-1", "s1"),
            Page::with_default_grid("page-2", "s2"),
            Page::with_default_grid("page-3", "s3"),
        ]);
        let page_order = |s: &CatalogState| s.pages.iter().map(|p| p.id.clone()).collect::<Vec<_>>();

        let (next, outcome) = apply_mutation(
            &state,
            &Mutation::ReorderPages { old_index: 0, new_index: 2 },
            &mut ids(),
        );
        assert!(outcome.is_applied());
        assert_eq!(page_order(&next), vec!["page-2", "page-3", "page-1"]);

        let (next, _) = apply_mutation(
            &state,
            &Mutation::ReorderPages { old_index: 7, new_index: 0 },
            &mut ids(),
        );
        assert_eq!(page_order(&next), vec!["page-3", "page-1", "page-2"]);

        let (_, outcome) = apply_mutation(
            &state,
            &Mutation::ReorderPages { old_index: 2, new_index: 5 },
            &mut ids(),
        );
        assert_eq!(outcome.reason(), Some(&MutationError::Unchanged));
    }

    #[test]
    fn test_update_section_merges_patch() {
        let state = catalog();
        let mutation = Mutation::UpdateSection {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            patch: SectionPatch {
                title: Some(Some("Ofertas".to_string())),
                columns: None,
            },
        };
        let (next, outcome) = apply_mutation(&state, &mutation, &mut ids());

        assert!(outcome.is_applied());
        let section = next.section("page-1", "sec-a").unwrap();
        assert_eq!(section.title.as_deref(), Some("Ofertas"));
        assert_eq!(section.columns, Some(Columns::Three));
        assert_eq!(product_ids(&next, "page-1", "sec-a"), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_empty_patches_are_unchanged() {
        let state = catalog();
        let (_, outcome) = apply_mutation(
            &state,
            &Mutation::UpdateProduct {
                page_id: "page-1".to_string(),
                section_id: "sec-a".to_string(),
                product_id: "a1".to_string(),
                patch: ProductPatch::default(),
            },
            &mut ids(),
        );
        assert_eq!(outcome, Outcome::NoOp(MutationError::Unchanged));

        let (_, outcome) = apply_mutation(
            &state,
            &Mutation::UpdateSection {
                page_id: "page-1".to_string(),
                section_id: "sec-b".to_string(),
                patch: SectionPatch::default(),
            },
            &mut ids(),
        );
        assert_eq!(outcome, Outcome::NoOp(MutationError::Unchanged));
    }

    #[test]
    fn test_reorder_empty_list_is_out_of_range() {
        let state = catalog();
        let mutation = Mutation::ReorderProducts {
            page_id: "page-1".to_string(),
            section_id: "sec-b".to_string(),
            old_index: 0,
            new_index: 1,
        };
        let (_, outcome) = apply_mutation(&state, &mutation, &mut ids());
        assert_eq!(
            outcome,
            Outcome::NoOp(MutationError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_move_product_within_same_section() {
        let state = catalog();
        let mutation = Mutation::MoveProduct {
            source_page_id: "page-1".to_string(),
            source_section_id: "sec-a".to_string(),
            target_page_id: "page-1".to_string(),
            target_section_id: "sec-a".to_string(),
            product_id: "a1".to_string(),
            new_index: 10,
        };
        let (next, outcome) = apply_mutation(&state, &mutation, &mut ids());
        assert!(outcome.is_applied());
        assert_eq!(product_ids(&next, "page-1", "sec-a"), vec!["a2", "a3", "a1"]);
    }

    #[test]
    fn test_move_product_to_missing_target_keeps_product() {
        let state = catalog();
        let mutation = Mutation::MoveProduct {
            source_page_id: "page-1".to_string(),
            source_section_id: "sec-a".to_string(),
            target_page_id: "page-9".to_string(),
            target_section_id: "sec-b".to_string(),
            product_id: "a1".to_string(),
            new_index: 0,
        };
        let (next, outcome) = apply_mutation(&state, &mutation, &mut ids());
        assert_eq!(outcome, Outcome::NoOp(MutationError::PageNotFound("page-9".to_string())));
        assert_eq!(next, state);
    }

    #[test]
    fn test_move_product_into_header_rejected() {
        let state = catalog();
        let mutation = Mutation::MoveProduct {
            source_page_id: "page-1".to_string(),
            source_section_id: "sec-a".to_string(),
            target_page_id: "page-2".to_string(),
            target_section_id: "hdr-2".to_string(),
            product_id: "a1".to_string(),
            new_index: 0,
        };
        let (_, outcome) = apply_mutation(&state, &mutation, &mut ids());
        assert_eq!(outcome, Outcome::NoOp(MutationError::NotAProductGrid("hdr-2".to_string())));
    }

    #[test]
    fn test_move_to_next_page_without_grid_is_atomic() {
        let state = catalog();
        let mutation = Mutation::MoveProductToNextPage {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            product_id: "a3".to_string(),
        };
        let (next, outcome) = apply_mutation(&state, &mutation, &mut ids());
        assert_eq!(outcome, Outcome::NoOp(MutationError::NoProductGrid("page-2".to_string())));
        assert_eq!(next.product_count(), 3);
        assert_eq!(product_ids(&next, "page-1", "sec-a"), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_move_to_next_page_creates_page_and_prepends() {
        let state = CatalogState::new([Page::new(
            "page-1",
            [Section::product_grid("sec-a", Columns::Three)
                .with_products((1..=3).map(|i| Product::new(format!("a{}", i), "x")))],
        )]);
        let mut ids = ids();

        let first = Mutation::MoveProductToNextPage {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            product_id: "a3".to_string(),
        };
        let (next, outcome) = apply_mutation(&state, &first, &mut ids);
        assert!(outcome.is_applied());
        assert_eq!(next.pages.len(), 2);
        let new_page = next.pages[1].id.clone();
        let new_section = next.pages[1].sections[0].id.clone();
        assert_eq!(product_ids(&next, &new_page, &new_section), vec!["a3"]);

        let second = Mutation::MoveProductToNextPage {
            page_id: "page-1".to_string(),
            section_id: "sec-a".to_string(),
            product_id: "a2".to_string(),
        };
        let (next, _) = apply_mutation(&next, &second, &mut ids);
        assert_eq!(next.pages.len(), 2);
        assert_eq!(product_ids(&next, &new_page, &new_section), vec!["a2", "a3"]);
    }

    #[test]
    fn test_add_section_rejects_duplicate_product_ids() {
        let state = catalog();
        let section = Section::product_grid("sec-new", Columns::Two)
            .with_products([Product::new("a1", "dup")]);
        let mutation = Mutation::AddSection {
            page_id: "page-2".to_string(),
            section,
        };
        let (_, outcome) = apply_mutation(&state, &mutation, &mut ids());
        assert_eq!(outcome, Outcome::NoOp(MutationError::DuplicateId("a1".to_string())));
    }

    #[test]
    fn test_remove_cover_page_resets() {
        let state = catalog();
        let enable = Mutation::SetCoverPage {
            patch: CoverPagePatch {
                enabled: Some(true),
                image_url: Some("cover.png".to_string()),
            },
        };
        let (next, _) = apply_mutation(&state, &enable, &mut ids());
        assert_eq!(
            next.cover_page,
            Some(CoverPage { enabled: true, image_url: "cover.png".to_string() })
        );

        let (next, _) = apply_mutation(&next, &Mutation::RemoveCoverPage, &mut ids());
        assert_eq!(next.cover_page, Some(CoverPage::default()));
    }
}
