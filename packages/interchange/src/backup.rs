//! Whole-catalog JSON backups.
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "exportDate": "2026-10-15T12:00:00.000Z",
//!   "pages": [...],
//!   "globalSettings": {...},
//!   "coverPage": {...}
//! }
//! ```

use crate::error::{ExportError, ImportError};
use catalog_model::{CatalogState, CoverPage, GlobalSettings, Page};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub const BACKUP_FORMAT_VERSION: &str = "1.0.0";

/// On-disk backup document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBackup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
    pub pages: Vec<Arc<Page>>,
    pub global_settings: GlobalSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_page: Option<CoverPage>,
}

impl CatalogBackup {
    /// Capture `state` as of `exported_at`
    pub fn at(state: &CatalogState, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: Some(BACKUP_FORMAT_VERSION.to_string()),
            export_date: Some(exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            pages: state.pages.clone(),
            global_settings: state.global_settings.clone(),
            cover_page: state.cover_page.clone(),
        }
    }

    pub fn from_state(state: &CatalogState) -> Self {
        Self::at(state, Utc::now())
    }

    /// Export timestamp, when present and well-formed
    pub fn exported_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.export_date.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    pub fn product_count(&self) -> usize {
        self.pages.iter().map(|p| p.product_count()).sum()
    }

    pub fn into_state(self) -> CatalogState {
        CatalogState {
            cover_page: self.cover_page,
            pages: self.pages,
            global_settings: self.global_settings,
        }
    }
}

/// Serialize `state` as a pretty-printed backup stamped with the current time
pub fn to_json(state: &CatalogState) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&CatalogBackup::from_state(state))?)
}

/// Parse a backup, rejecting documents that do not look like a catalog
pub fn from_json(content: &str) -> Result<CatalogBackup, ImportError> {
    let value: Value = serde_json::from_str(content).map_err(ImportError::Parse)?;
    check_shape(&value)?;
    let backup: CatalogBackup = serde_json::from_value(value).map_err(ImportError::Malformed)?;
    debug!(
        version = backup.version.as_deref().unwrap_or("unknown"),
        pages = backup.pages.len(),
        "Parsed catalog backup"
    );
    Ok(backup)
}

/// Minimal structural check run before deserializing
fn check_shape(value: &Value) -> Result<(), ImportError> {
    let root = value
        .as_object()
        .ok_or_else(|| ImportError::InvalidShape("document is not an object".to_string()))?;

    let pages = root
        .get("pages")
        .and_then(Value::as_array)
        .ok_or_else(|| ImportError::InvalidShape("`pages` must be an array".to_string()))?;

    if !root.get("globalSettings").is_some_and(Value::is_object) {
        return Err(ImportError::InvalidShape(
            "`globalSettings` must be an object".to_string(),
        ));
    }

    for (index, page) in pages.iter().enumerate() {
        let has_id = page
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.is_empty());
        if !has_id {
            return Err(ImportError::InvalidShape(format!("page {} has no id", index)));
        }
        if !page.get("sections").is_some_and(Value::is_array) {
            return Err(ImportError::InvalidShape(format!(
                "page {} has no sections array",
                index
            )));
        }
    }

    Ok(())
}

pub fn write_backup(path: &Path, state: &CatalogState) -> Result<(), ExportError> {
    std::fs::write(path, to_json(state)?)?;
    info!(path = %path.display(), pages = state.pages.len(), "Wrote catalog backup");
    Ok(())
}

pub fn read_backup(path: &Path) -> Result<CatalogBackup, ImportError> {
    let content = std::fs::read_to_string(path)?;
    from_json(&content)
}

/// Conventional download name, e.g. `catalogo_completo_2026-10-15.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("catalogo_completo_{}.json", date.format("%Y-%m-%d"))
}
