//! Case loading error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a result table into cases.
#[derive(Debug, Error)]
pub enum CaseError {
    /// The result table does not exist.
    #[error("result table not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The table could not be opened or its header could not be read.
    #[error("failed to read result table {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A surviving row has a malformed or missing field. `row` is the
    /// 1-based data row in the source table (the header is not counted).
    #[error("invalid row {row}: {message}")]
    Validation { row: usize, message: String },

    /// No row had status `OK`. Publishing an empty challenge is refused.
    #[error("no successful cases found (status=OK) in {}", .0.display())]
    Empty(PathBuf),
}
