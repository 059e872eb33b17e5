use std::io;
use std::num::ParseFloatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors that abort matrix construction.
///
/// Lookups never produce one of these: a missing row or column resolves to
/// the matrix default score instead.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// The integer selector is not one of the bundled presets.
    #[error("Invalid matrix selector {0}: expected one of 45, 50, 62, 80, 90 or a file path")]
    InvalidSelector(u32),

    /// A data line does not hold a row symbol plus one numeric score per label.
    #[error("Malformed row on line {line}: {kind}")]
    MalformedRow {
        line: usize,
        kind: MalformedRowKind,
    },

    /// The number of distinct row symbols differs from the header width.
    #[error("Matrix is not square: {rows} distinct rows for {labels} column labels")]
    NonSquareMatrix { rows: usize, labels: usize },

    #[error("File I/O error for '{path}': {source}")]
    UnreadableSource {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum MalformedRowKind {
    #[error("expected {expected} tokens (row symbol and one score per label), found {found}")]
    WrongTokenCount { expected: usize, found: usize },
    #[error("score '{token}' is not a number: {source}")]
    InvalidScore {
        token: String,
        #[source]
        source: ParseFloatError,
    },
}
