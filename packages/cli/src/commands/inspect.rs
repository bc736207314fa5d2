use crate::catalog_file::resolve;
use anyhow::{Context, Result};
use catalog_editor::model::{CatalogState, Product, Section, SectionType};
use catalog_interchange::read_backup;
use clap::Args;
use colored::Colorize;
use std::fmt::Write;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Catalog backup file
    #[arg(default_value = "catalog.json")]
    pub file: String,

    /// List every product under its section
    #[arg(short, long)]
    pub products: bool,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let path = resolve(cwd, &args.file);
    let backup = read_backup(&path).with_context(|| format!("Cannot open {}", path.display()))?;

    println!(
        "{} {} {}",
        "📖".bright_blue(),
        args.file.bright_white().bold(),
        format!(
            "(format {}, exported {})",
            backup.version.as_deref().unwrap_or("?"),
            backup
                .exported_at()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown".to_string())
        )
        .dimmed()
    );

    let state = backup.into_state();
    print!("{}", render_tree(&state, args.products));
    Ok(())
}

/// Plain-text outline of the catalog
pub fn render_tree(state: &CatalogState, with_products: bool) -> String {
    let mut out = String::new();

    if let Some(cover) = state.cover_page.as_ref().filter(|c| c.enabled) {
        let _ = writeln!(out, "Cover  {}", cover.image_url);
    }

    for (index, page) in state.pages.iter().enumerate() {
        let _ = writeln!(
            out,
            "Page {}  {}  ({} products)",
            index + 1,
            page.id,
            page.product_count()
        );
        for section in &page.sections {
            let _ = writeln!(out, "  {}", section_line(section));
            if with_products {
                for product in section.products() {
                    let _ = writeln!(out, "    {}", product_line(product));
                }
            }
        }
    }

    let _ = writeln!(
        out,
        "{} pages, {} products",
        state.pages.len(),
        state.product_count()
    );
    out
}

fn section_line(section: &Section) -> String {
    let title = section
        .title
        .as_deref()
        .map(|t| format!(" \"{}\"", t))
        .unwrap_or_default();

    match section.section_type {
        SectionType::ProductGrid => format!(
            "[{} x{}] {}{}  {} products",
            section.section_type,
            section.column_count(),
            section.id,
            title,
            section.products().len()
        ),
        _ => format!("[{}] {}{}", section.section_type, section.id, title),
    }
}

fn product_line(product: &Product) -> String {
    let mut line = format!(
        "{}  {}  R$ {}",
        product.id,
        product.name,
        format!("{:.2}", product.retail_price).replace('.', ",")
    );
    if product.sold_out {
        line.push_str("  (esgotado)");
    }
    line
}
