use crate::catalog_file::{load_config, open, resolve, save};
use anyhow::{Context, Result};
use catalog_editor::ImportedProduct;
use clap::Args;
use colored::Colorize;
use std::fs;

#[derive(Debug, Args)]
pub struct ImportProductsArgs {
    /// Catalog backup file
    pub file: String,

    /// JSON array of parsed spreadsheet rows
    #[arg(short, long)]
    pub rows: String,
}

pub fn import_products(args: ImportProductsArgs, cwd: &str) -> Result<()> {
    let config = load_config(cwd)?;

    let rows_path = resolve(cwd, &args.rows);
    let content = fs::read_to_string(&rows_path)
        .with_context(|| format!("Cannot read {}", rows_path.display()))?;
    let rows: Vec<ImportedProduct> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a list of product rows", args.rows))?;

    if rows.is_empty() {
        println!("{}", "⚠️  No rows to import".yellow());
        return Ok(());
    }

    let catalog_path = resolve(cwd, &args.file);
    let mut store = open(&catalog_path, config)?;
    let summary = store.import_products(rows);
    save(&catalog_path, &store)?;

    println!(
        "  {} Imported {} products onto {} new pages",
        "✓".green(),
        summary.products,
        summary.pages.len()
    );
    Ok(())
}
