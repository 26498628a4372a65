use std::path::PathBuf;
use thiserror::Error;

// Validation failures raised by the fight lifecycle. None of these leave
// the document partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FightError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no active fight")]
    NoActiveFight,

    #[error("invalid vote: {choice}. allowed: {}", .allowed.join(" "))]
    InvalidChoice { choice: String, allowed: [String; 2] },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for a single CLI invocation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fight(#[from] FightError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    // Validation problems are the caller's to fix; everything else is an
    // environment failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Fight(_) => 2,
            AppError::Store(_) | AppError::Render { .. } => 1,
        }
    }
}
