use blosum::{MatrixError, MatrixSource, Preset};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Matrix selector cannot be empty.")]
    Empty,

    #[error("Matrix selector '{0}' is not a preset number (expected 45, 50, 62, 80 or 90).")]
    NumberOutOfRange(String),

    #[error(transparent)]
    Selector(#[from] MatrixError),
}

/// Interprets a matrix selector given on the command line or in a config file.
///
/// All-digit values must name a preset (`62`); `BLOSUM62`-style names select
/// a preset as well; anything else is taken as a path to a matrix file.
pub fn parse_matrix_selector(value: &str) -> Result<MatrixSource, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let number = trimmed
            .parse::<u32>()
            .map_err(|_| ParseError::NumberOutOfRange(trimmed.to_string()))?;
        return Ok(MatrixSource::try_from(number)?);
    }

    match trimmed.parse::<Preset>() {
        Ok(preset) => Ok(MatrixSource::Preset(preset)),
        Err(_) => Ok(MatrixSource::Path(PathBuf::from(value))),
    }
}
