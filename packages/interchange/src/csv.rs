//! Product sheet export.
//!
//! Columns match what the bulk importer reads back, so an exported sheet
//! can be edited in a spreadsheet and imported again.

use crate::error::ExportError;
use catalog_model::{CatalogState, Product};
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

pub const CSV_HEADERS: [&str; 5] = [
    "Nome produto",
    "SKU",
    "Preço venda",
    "Imagem principal",
    "Estoque atual",
];

const SEPARATOR: &str = ";";
const BOM: &str = "\u{FEFF}";

/// Stock figure written for products that are not sold out
const IN_STOCK: &str = "100";

/// Render every product in page order as a BOM-prefixed CSV document
pub fn export_products(state: &CatalogState) -> Result<String, ExportError> {
    let mut lines = vec![CSV_HEADERS.join(SEPARATOR)];
    lines.extend(state.products().map(product_row));

    if lines.len() == 1 {
        return Err(ExportError::NoProducts);
    }

    Ok(format!("{}{}", BOM, lines.join("\n")))
}

pub fn write_products(path: &Path, state: &CatalogState) -> Result<usize, ExportError> {
    let content = export_products(state)?;
    std::fs::write(path, content)?;

    let rows = state.product_count();
    info!(path = %path.display(), rows, "Wrote product sheet");
    Ok(rows)
}

/// Conventional download name, e.g. `catalogo_export_2026-10-15.csv`
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("catalogo_export_{}.csv", date.format("%Y-%m-%d"))
}

fn product_row(product: &Product) -> String {
    let price = format!("{:.2}", product.retail_price).replace('.', ",");
    let stock = if product.sold_out { "0" } else { IN_STOCK };

    [
        quote(&product.name),
        quote(product.sku.as_deref().unwrap_or_default()),
        quote(&price),
        quote(product.image.as_deref().unwrap_or_default()),
        stock.to_string(),
    ]
    .join(SEPARATOR)
}

/// Double-quote a field, doubling embedded quotes. Empty fields stay bare.
fn quote(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }
    format!("\"{}\"", field.replace('"', "\"\""))
}
