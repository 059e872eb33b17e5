//! # BLOSUM
//!
//! Read-only access to BLOSUM-family substitution matrices for sequence
//! alignment: given two residue symbols, return their substitution score.
//!
//! ## Overview
//!
//! - **[`parser`]: Matrix files.** Reads whitespace-delimited, comment-tolerant
//!   matrices in the NCBI layout into a two-level table, rejecting malformed or
//!   non-square input as a whole.
//!
//! - **[`presets`]: Bundled matrices.** BLOSUM45, 50, 62, 80 and 90 over the 25
//!   standard symbols, built once per process and shared by every matrix that
//!   uses them.
//!
//! - **[`matrix`]: Lookups.** [`ScoringMatrix`] wraps either source and answers
//!   lookups with a caller-chosen default score for any absent pair, so queries
//!   containing gaps or unusual symbols never fail.
//!
//! ```
//! use blosum::{MatrixParser, Preset, ScoringMatrix};
//!
//! # fn main() -> blosum::Result<()> {
//! let blosum62 = ScoringMatrix::new(Preset::Blosum62)?;
//! assert_eq!(blosum62.score("H", "F"), -1.0);
//! assert_eq!(blosum62.repr(), "ScoringMatrix(62, default=-inf)");
//!
//! let parsed = MatrixParser::parse_str("   A  R\nA  4 -1\nR -1  5\n")?;
//! assert_eq!(parsed.table()["R"]["A"], -1.0);
//! assert!(parsed.coverage_warning().is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod matrix;
pub mod parser;
pub mod presets;
pub mod symbols;

pub use error::{MalformedRowKind, MatrixError, Result};
pub use matrix::{MatrixId, MatrixSource, RowView, ScoringMatrix};
pub use parser::{CoverageWarning, MatrixParser, MatrixTable, ParsedMatrixTable, load_matrix};
pub use presets::{ParsePresetError, Preset};
