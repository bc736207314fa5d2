use crate::catalog_file::{load_config, open, resolve, save};
use anyhow::Result;
use catalog_editor::{GridLayout, Reconciler};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct PaginateArgs {
    /// Catalog backup file
    #[arg(default_value = "catalog.json")]
    pub file: String,

    /// Report what would move without writing the file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn paginate(args: PaginateArgs, cwd: &str) -> Result<()> {
    let config = load_config(cwd)?;
    let path = resolve(cwd, &args.file);
    let mut store = open(&path, config.clone())?;

    println!("{}", "📐 Reflowing pages...".bright_blue().bold());

    let report = Reconciler::from_config(&config)
        .run_until_stable(&mut store, &GridLayout::new(config.layout))?;

    for product_id in &report.oversized {
        println!(
            "  {} {} is taller than a page",
            "⚠️".yellow(),
            product_id.bright_white()
        );
    }

    let full = report.controls.values().filter(|visible| !**visible).count();
    println!(
        "  {} Moved {} products, {} new pages, {} full sections",
        "✓".green(),
        report.moves,
        report.pages_created,
        full
    );

    if report.moves > 0 && !args.dry_run {
        save(&path, &store)?;
        println!("  {} Saved {}", "✓".green(), args.file);
    }
    Ok(())
}
