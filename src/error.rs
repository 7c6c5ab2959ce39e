//! Conversion error types.

use std::path::PathBuf;

/// Everything that can stop a conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unsupported conversion: input must be .md -> .html or .html -> .md")]
    Unsupported { input: PathBuf, output: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read style sheet {}: {source}", path.display())]
    StyleSheet {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] anyhow::Error),
}

impl ConvertError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::InputNotFound(_) => 2,
            ConvertError::Unsupported { .. } => 3,
            _ => 1,
        }
    }
}
