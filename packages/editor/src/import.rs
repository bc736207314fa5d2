//! Bulk product import.
//!
//! A spreadsheet reader hands over already-parsed rows; this module turns
//! them into products and spreads them over freshly appended pages.

use crate::mutations::{Mutation, Outcome};
use crate::store::CatalogStore;
use catalog_model::{Columns, Product, Section};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Flat fee added to cost for the wholesale price
const WHOLESALE_MARKUP: f64 = 5.0;

/// Multiplier applied to cost for the drop-shipping price
const DROP_MARKUP: f64 = 1.4;

const IMPORTED_TITLE: &str = "Produtos Importados";

/// One spreadsheet row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportedProduct {
    pub name: String,
    pub sku: Option<String>,
    pub retail_price: f64,
    pub cost_price: f64,
    pub image: Option<String>,
    pub stock: i64,
    pub category: String,
}

impl ImportedProduct {
    pub fn into_product(self, id: String) -> Product {
        let name = if self.name.trim().is_empty() {
            "Sem nome".to_string()
        } else {
            self.name
        };

        Product {
            sku: self.sku.filter(|s| !s.is_empty()),
            image: self.image.filter(|s| !s.is_empty()),
            sold_out: self.stock <= 0,
            category: Some(self.category).filter(|c| !c.is_empty()),
            ..Product::new(id, name).with_prices(
                self.retail_price,
                self.cost_price + WHOLESALE_MARKUP,
                self.cost_price * DROP_MARKUP,
            )
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub products: usize,
    pub pages: Vec<String>,
}

impl CatalogStore {
    /// Append imported rows as new pages of `items_per_page` products.
    ///
    /// Rows are ordered by category first, ignoring case; rows sharing a
    /// category keep their input order. The whole import is a single undo
    /// step.
    pub fn import_products(&mut self, mut rows: Vec<ImportedProduct>) -> ImportSummary {
        let mut summary = ImportSummary::default();
        if rows.is_empty() {
            return summary;
        }

        rows.sort_by_cached_key(|row| row.category.to_lowercase());
        let per_page = self.config().items_per_page.max(1);
        let total = rows.len();

        self.begin_batch("Import products");

        let mut rows = rows.into_iter().peekable();
        let mut chunk_index = 0;
        while rows.peek().is_some() {
            let chunk: Vec<ImportedProduct> = rows.by_ref().take(per_page).collect();

            let page_id = self.generate_id("page-import");
            let section_id = self.generate_id("section-csv");
            let products: Vec<Product> = chunk
                .into_iter()
                .map(|row| {
                    let id = self.generate_id("prod-csv");
                    row.into_product(id)
                })
                .collect();

            let title = if chunk_index == 0 {
                IMPORTED_TITLE.to_string()
            } else {
                format!("{} (Pág. {})", IMPORTED_TITLE, chunk_index + 1)
            };
            let count = products.len();
            let section = Section::product_grid(section_id, Columns::Three)
                .with_title(title)
                .with_products(products);

            let added = self.dispatch(Mutation::AddPage {
                page_id: Some(page_id.clone()),
            });
            if added == Outcome::Applied {
                let outcome = self.dispatch(Mutation::AddSection {
                    page_id: page_id.clone(),
                    section,
                });
                if outcome.is_applied() {
                    summary.products += count;
                    summary.pages.push(page_id);
                }
            }
            chunk_index += 1;
        }

        self.end_batch();
        info!(
            rows = total,
            products = summary.products,
            pages = summary.pages.len(),
            "Imported products"
        );
        summary
    }
}
