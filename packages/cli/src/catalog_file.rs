//! Loading and saving the catalog a command works on

use anyhow::{Context, Result};
use catalog_editor::{CatalogStore, EditorConfig};
use catalog_interchange::{read_backup, write_backup};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a user-supplied path against the working directory
pub fn resolve(cwd: &str, file: &str) -> PathBuf {
    PathBuf::from(cwd).join(file)
}

/// Editor config from `cwd`, or defaults
pub fn load_config(cwd: &str) -> Result<EditorConfig> {
    EditorConfig::load(Path::new(cwd)).context("Failed to load catalog.config.json")
}

/// Open a backup file as an editable store
pub fn open(path: &Path, config: EditorConfig) -> Result<CatalogStore> {
    let backup = read_backup(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let store = CatalogStore::new(backup.into_state(), config);
    debug!(
        path = %path.display(),
        pages = store.state().pages.len(),
        "Opened catalog"
    );
    Ok(store)
}

pub fn save(path: &Path, store: &CatalogStore) -> Result<()> {
    write_backup(path, store.state()).with_context(|| format!("Cannot write {}", path.display()))?;
    debug!(path = %path.display(), version = store.version(), "Saved catalog");
    Ok(())
}
