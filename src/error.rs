// File-level failure taxonomy for the extraction walk.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A failure confined to a single file during a codebase walk.
///
/// None of these abort a batch: the walker logs the failure with the file
/// path and continues with the remaining files. A failed file contributes
/// zero records to the aggregate, never partial ones.
#[derive(Debug, Error)]
pub enum FileFailure {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file's bytes are not valid UTF-8.
    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },

    /// The parser produced no tree for the file.
    #[error("parser rejected {path}")]
    Parse { path: PathBuf },

    /// The parser itself could not be constructed for the file's language.
    #[error("parser setup failed: {message}")]
    Parser { message: String },

    /// The file extension maps to no supported language.
    #[error("unsupported file extension for {path}")]
    Unsupported { path: PathBuf },
}
