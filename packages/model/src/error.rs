use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid column count: {0} (expected 2, 3 or 4)")]
    InvalidColumns(u8),

    #[error("Invalid section type: {0}")]
    InvalidSectionType(String),
}
