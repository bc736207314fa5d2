mod catalog_file;
mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, export_csv, import_products, init, inspect, paginate, ApplyArgs, ExportCsvArgs,
    ImportProductsArgs, InitArgs, InspectArgs, PaginateArgs,
};
use tracing_subscriber::EnvFilter;

/// Catalog CLI - edit paginated product catalogs from the terminal
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine activity (debug level) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an editor config and a starter catalog
    Init(InitArgs),

    /// Print the page/section/product tree of a catalog
    Inspect(InspectArgs),

    /// Apply a JSON list of mutations to a catalog
    Apply(ApplyArgs),

    /// Append spreadsheet rows as new product pages
    ImportProducts(ImportProductsArgs),

    /// Push overflowing products onto following pages until every page fits
    Paginate(PaginateArgs),

    /// Write every product to a `;`-separated sheet
    ExportCsv(ExportCsvArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Inspect(args) => inspect(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
                Command::ImportProducts(args) => import_products(args, &cwd),
                Command::Paginate(args) => paginate(args, &cwd),
                Command::ExportCsv(args) => export_csv(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
