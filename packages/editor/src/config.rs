use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "catalog.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Undo depth (0 = unlimited)
    pub history_limit: usize,

    /// Surface no-op outcomes as errors
    pub strict: bool,

    /// Refuse to remove the only remaining page
    pub guard_last_page: bool,

    /// Products per page when distributing a bulk import
    pub items_per_page: usize,

    /// Slack subtracted from the page boundary before a product counts
    /// as overflowing
    pub overflow_tolerance: f32,

    /// Upper bound on reconciler ticks in one run
    pub max_reconcile_ticks: usize,

    /// Declared page geometry for the grid layout probe
    pub layout: LayoutConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: crate::history::DEFAULT_HISTORY_LIMIT,
            strict: false,
            guard_last_page: true,
            items_per_page: 9,
            overflow_tolerance: 10.0,
            max_reconcile_ticks: 1000,
            layout: LayoutConfig::default(),
        }
    }
}

/// Page geometry in CSS pixels. Defaults are an A4 sheet at 96 dpi.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_height: f32,
    pub padding: f32,
    pub header_height: f32,
    pub footer_height: f32,
    pub row_height: f32,
    pub row_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_height: 1123.0,
            padding: 32.0,
            header_height: 64.0,
            footer_height: 48.0,
            row_height: 320.0,
            row_gap: 16.0,
        }
    }
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when the
    /// file is absent
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded editor config");
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    /// Write config as pretty JSON into `dir`
    pub fn save(&self, dir: &Path) -> Result<(), EditorError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(DEFAULT_CONFIG_NAME), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{
            "historyLimit": 10,
            "strict": true,
            "layout": { "rowHeight": 200 }
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.history_limit, 10);
        assert!(config.strict);
        assert!(config.guard_last_page);
        assert_eq!(config.items_per_page, 9);
        assert_eq!(config.layout.row_height, 200.0);
        assert_eq!(config.layout.page_height, 1123.0);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.history_limit, 50);
        assert!(!config.strict);
        assert_eq!(config.overflow_tolerance, 10.0);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            items_per_page: 12,
            ..Default::default()
        };
        config.save(dir.path()).unwrap();

        assert_eq!(EditorConfig::load(dir.path()).unwrap(), config);
    }
}
