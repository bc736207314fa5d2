//! # Page Geometry
//!
//! The reconciler never looks at a real renderer. Whatever paints pages
//! reports geometry through [`LayoutProbe`]; [`GridLayout`] is the
//! built-in probe that derives geometry from declared sizes.
//!
//! All coordinates are measured from the top edge of the page.

use crate::config::LayoutConfig;
use catalog_model::{Page, SectionType};

/// Bottom edge of one rendered product card
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredProduct {
    pub section_id: String,
    pub product_id: String,
    pub bottom: f32,
}

/// Bottom edge of a section's "add product" affordance
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredControl {
    pub section_id: String,
    pub bottom: f32,
}

/// Geometry of one page, products in visual order
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_id: String,
    /// Lowest y at which content may end
    pub boundary: f32,
    pub products: Vec<MeasuredProduct>,
    pub controls: Vec<MeasuredControl>,
}

/// Source of rendered geometry
pub trait LayoutProbe {
    fn measure(&self, page: &Page) -> PageLayout;
}

impl<F> LayoutProbe for F
where
    F: Fn(&Page) -> PageLayout,
{
    fn measure(&self, page: &Page) -> PageLayout {
        self(page)
    }
}

/// Declared-budget layout: sections stack top to bottom, products fill
/// rows of `columns` cards, and the add-product control takes the grid
/// slot after the last product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    config: LayoutConfig,
}

impl GridLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Bottom edge of grid row `row` for a grid starting at `top`
    fn row_bottom(&self, top: f32, row: usize) -> f32 {
        let rows = (row + 1) as f32;
        top + rows * self.config.row_height + row as f32 * self.config.row_gap
    }

    fn grid_height(&self, rows: usize) -> f32 {
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.config.row_height + (rows - 1) as f32 * self.config.row_gap
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutProbe for GridLayout {
    fn measure(&self, page: &Page) -> PageLayout {
        let cfg = &self.config;
        let mut cursor = cfg.padding;
        let mut products = Vec::new();
        let mut controls = Vec::new();

        for section in &page.sections {
            match section.section_type {
                SectionType::Header => cursor += cfg.header_height + cfg.row_gap,
                SectionType::Footer => cursor += cfg.footer_height + cfg.row_gap,
                SectionType::ProductGrid => {
                    let columns = section.column_count();
                    let items = section.products();

                    for (slot, product) in items.iter().enumerate() {
                        products.push(MeasuredProduct {
                            section_id: section.id.clone(),
                            product_id: product.id.clone(),
                            bottom: self.row_bottom(cursor, slot / columns),
                        });
                    }

                    controls.push(MeasuredControl {
                        section_id: section.id.clone(),
                        bottom: self.row_bottom(cursor, items.len() / columns),
                    });

                    let rows = items.len().div_ceil(columns);
                    cursor += self.grid_height(rows) + cfg.row_gap;
                }
            }
        }

        PageLayout {
            page_id: page.id.clone(),
            boundary: cfg.page_height - cfg.padding,
            products,
            controls,
        }
    }
}
