use crate::catalog_file::{load_config, open, resolve, save};
use anyhow::{Context, Result};
use catalog_editor::{GridLayout, Mutation, Outcome, Reconciler};
use clap::Args;
use colored::Colorize;
use std::fs;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Catalog backup file
    pub file: String,

    /// JSON file holding one mutation or an array of mutations
    #[arg(short, long)]
    pub mutations: String,

    /// Reflow overflowing pages afterwards
    #[arg(long)]
    pub paginate: bool,

    /// Stop at the first mutation that changes nothing
    #[arg(long)]
    pub strict: bool,
}

/// One mutation or a list of them
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum MutationFile {
    Many(Vec<Mutation>),
    One(Mutation),
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let mut config = load_config(cwd)?;
    config.strict |= args.strict;

    let mutations_path = resolve(cwd, &args.mutations);
    let content = fs::read_to_string(&mutations_path)
        .with_context(|| format!("Cannot read {}", mutations_path.display()))?;
    let mutations = match serde_json::from_str::<MutationFile>(&content)
        .with_context(|| format!("{} is not a list of mutations", args.mutations))?
    {
        MutationFile::Many(list) => list,
        MutationFile::One(mutation) => vec![mutation],
    };

    let catalog_path = resolve(cwd, &args.file);
    let mut store = open(&catalog_path, config.clone())?;

    println!(
        "{}",
        format!("🔧 Applying {} mutations...", mutations.len())
            .bright_blue()
            .bold()
    );

    let total = mutations.len();
    let mut applied = 0;
    store.begin_batch(format!("Apply {}", args.mutations));
    for mutation in mutations {
        let name = mutation.name();
        match store.apply(mutation)? {
            Outcome::Applied => {
                applied += 1;
                println!("  {} {}", "✓".green(), name);
            }
            Outcome::NoOp(reason) => {
                println!("  {} {} - {}", "–".yellow(), name, reason.to_string().dimmed());
            }
        }
    }
    store.end_batch();

    if args.paginate {
        let report = Reconciler::from_config(&config)
            .run_until_stable(&mut store, &GridLayout::new(config.layout))?;
        if report.moves > 0 {
            println!(
                "  {} Moved {} products, {} new pages",
                "✓".green(),
                report.moves,
                report.pages_created
            );
        }
    }

    if store.can_undo() {
        save(&catalog_path, &store)?;
    }

    println!();
    println!(
        "{} {} applied, {} unchanged",
        "✅".green(),
        applied,
        total - applied
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_editor::model::{Columns, Page, Product, Section};
    use catalog_editor::{CatalogStore, EditorConfig};
    use catalog_interchange::read_backup;
    use std::path::Path;

    fn setup(dir: &Path, store: &CatalogStore, mutations: &str) -> String {
        save(&dir.join("catalog.json"), store).unwrap();
        fs::write(dir.join("edits.json"), mutations).unwrap();
        dir.display().to_string()
    }

    fn args(paginate: bool, strict: bool) -> ApplyArgs {
        ApplyArgs {
            file: "catalog.json".to_string(),
            mutations: "edits.json".to_string(),
            paginate,
            strict,
        }
    }

    #[test]
    fn test_apply_list_of_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = setup(
            dir.path(),
            &CatalogStore::sample(),
            r#"[
                { "op": "addProduct", "pageId": "page-1", "sectionId": "section-2",
                  "product": { "id": "prod-3", "name": "Garrafa", "retailPrice": 30 } },
                { "op": "removeProduct", "pageId": "page-1", "sectionId": "section-2", "productId": "ghost" },
                { "op": "reorderProducts", "pageId": "page-1", "sectionId": "section-2", "oldIndex": 2, "newIndex": 0 }
            ]"#,
        );

        apply(args(false, false), &cwd).unwrap();

        let state = read_backup(&dir.path().join("catalog.json")).unwrap().into_state();
        let ids: Vec<&str> = state.pages[0].sections[1]
            .products()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["prod-3", "prod-1", "prod-2"]);
    }

    #[test]
    fn test_single_mutation_object() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = setup(
            dir.path(),
            &CatalogStore::sample(),
            r#"{ "op": "setGlobalSettings", "patch": { "companyName": "Bazar" } }"#,
        );

        apply(args(false, false), &cwd).unwrap();

        let state = read_backup(&dir.path().join("catalog.json")).unwrap().into_state();
        assert_eq!(state.global_settings.company_name, "Bazar");
    }

    #[test]
    fn test_strict_stops_on_noop() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = setup(
            dir.path(),
            &CatalogStore::sample(),
            r#"[{ "op": "removePage", "pageId": "ghost" }]"#,
        );

        let err = apply(args(false, true), &cwd).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_apply_then_paginate() {
        let dir = tempfile::tempdir().unwrap();
        let grid = Section::product_grid("grid", Columns::Three)
            .with_products((1..=9).map(|n| Product::new(format!("p{}", n), "x")));
        let store = CatalogStore::new(
            catalog_editor::CatalogState::new([Page::new("page-1", [grid])]),
            EditorConfig::default(),
        );
        let cwd = setup(
            dir.path(),
            &store,
            r#"[{ "op": "addProduct", "pageId": "page-1", "sectionId": "grid",
                  "product": { "id": "p10", "name": "x" } }]"#,
        );

        apply(args(true, false), &cwd).unwrap();

        let state = read_backup(&dir.path().join("catalog.json")).unwrap().into_state();
        assert_eq!(state.pages.len(), 2);
        assert_eq!(state.pages[1].sections[0].products()[0].id, "p10");
    }
}
