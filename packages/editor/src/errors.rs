//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Cannot remove the last remaining page: {0}")]
    LastPageDeletion(String),

    #[error("Reconcile error: {0}")]
    Reconcile(#[from] crate::reconciler::ReconcileError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
