use crate::catalog_file::{resolve, save};
use anyhow::Result;
use catalog_editor::model::{CatalogState, Page};
use catalog_editor::{CatalogStore, EditorConfig, DEFAULT_CONFIG_NAME};
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Catalog file to create
    #[arg(default_value = "catalog.json")]
    pub file: String,

    /// Start with one empty page instead of the sample catalog
    #[arg(long)]
    pub empty: bool,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = resolve(cwd, DEFAULT_CONFIG_NAME);
    let catalog_path = resolve(cwd, &args.file);

    if catalog_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.file.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing catalog...".bright_blue().bold());

    if !config_path.exists() || args.force {
        let config = EditorConfig::default();
        config.save(Path::new(cwd))?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    let state = if args.empty {
        CatalogState::new([Page::with_default_grid("page-1", "section-1")])
    } else {
        CatalogState::sample()
    };
    let store = CatalogStore::new(state, EditorConfig::default());
    save(&catalog_path, &store)?;
    println!("  {} Created {}", "✓".green(), args.file);

    println!();
    println!("{}", "✅ Catalog initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: catalog inspect {}", args.file);
    println!("  2. Run: catalog apply {} --mutations edits.json", args.file);
    println!("  3. Run: catalog export-csv {}", args.file);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_interchange::read_backup;

    fn run(dir: &Path, empty: bool, force: bool) {
        let args = InitArgs {
            file: "catalog.json".to_string(),
            empty,
            force,
        };
        init(args, &dir.display().to_string()).unwrap();
    }

    #[test]
    fn test_init_writes_config_and_sample() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false, false);

        assert!(dir.path().join(DEFAULT_CONFIG_NAME).exists());
        let backup = read_backup(&dir.path().join("catalog.json")).unwrap();
        assert_eq!(backup.into_state(), CatalogState::sample());
    }

    #[test]
    fn test_init_keeps_existing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), true, false);
        run(dir.path(), false, false);

        let backup = read_backup(&dir.path().join("catalog.json")).unwrap();
        assert_eq!(backup.product_count(), 0);

        run(dir.path(), false, true);
        let backup = read_backup(&dir.path().join("catalog.json")).unwrap();
        assert_eq!(backup.product_count(), 2);
    }
}
