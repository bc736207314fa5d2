use thiserror::Error;

/// Errors raised while reading a catalog backup
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Backup is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Backup does not have the catalog format: {0}")]
    InvalidShape(String),

    #[error("Backup entities are malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while writing catalog files
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Catalog has no products to export")]
    NoProducts,

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
