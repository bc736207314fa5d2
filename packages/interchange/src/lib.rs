//! # Catalog Interchange
//!
//! File formats the editor reads and writes:
//!
//! - **Backup** (`.json`): the whole catalog, pretty-printed, with a
//!   format version and export timestamp. Importing checks the document
//!   shape before deserializing.
//! - **Product sheet** (`.csv`): one row per product, `;`-separated,
//!   UTF-8 with a BOM so spreadsheet tools keep accented characters.

pub mod backup;
pub mod csv;
pub mod error;

pub use backup::{
    backup_file_name, from_json, read_backup, to_json, write_backup, CatalogBackup,
    BACKUP_FORMAT_VERSION,
};
pub use csv::{csv_file_name, export_products, write_products, CSV_HEADERS};
pub use error::{ExportError, ImportError};
