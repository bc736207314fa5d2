use crate::catalog_file::resolve;
use anyhow::{Context, Result};
use catalog_interchange::{csv_file_name, read_backup, write_products};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ExportCsvArgs {
    /// Catalog backup file
    #[arg(default_value = "catalog.json")]
    pub file: String,

    /// Output file (defaults to catalogo_export_<date>.csv)
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn export_csv(args: ExportCsvArgs, cwd: &str) -> Result<()> {
    let path = resolve(cwd, &args.file);
    let state = read_backup(&path)
        .with_context(|| format!("Cannot open {}", path.display()))?
        .into_state();

    let output = args
        .output
        .unwrap_or_else(|| csv_file_name(chrono::Local::now().date_naive()));
    let output_path = resolve(cwd, &output);

    let rows = write_products(&output_path, &state)?;
    println!(
        "  {} Exported {} products → {}",
        "✓".green(),
        rows,
        output.bright_white()
    );
    Ok(())
}
