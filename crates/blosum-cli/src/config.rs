pub mod defaults;

use crate::cli::MatrixArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use blosum::{MatrixSource, ScoringMatrix};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Values read from the optional TOML configuration file.
///
/// ```toml
/// matrix = "BLOSUM62"     # preset number, preset name or path
/// default-score = -10.0   # TOML also accepts -inf and inf
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    matrix: Option<String>,
    #[serde(rename = "default-score")]
    default_score: Option<f64>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Layers command-line values over file values over built-in defaults.
    pub fn merge_with_cli(&self, args: &MatrixArgs) -> Result<MatrixSettings> {
        let defaults = DefaultsConfig::default();

        let selector = args
            .matrix
            .as_ref()
            .or(self.matrix.as_ref())
            .unwrap_or(&defaults.matrix);
        let source = parser::parse_matrix_selector(selector).map_err(|e| match e {
            ParseError::Selector(inner) => CliError::Matrix(inner),
            other => CliError::Argument(other.to_string()),
        })?;

        let default_score = args
            .default_score
            .or(self.default_score)
            .unwrap_or(defaults.default_score);

        Ok(MatrixSettings {
            source,
            default_score,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSettings {
    pub source: MatrixSource,
    pub default_score: f64,
}

impl MatrixSettings {
    pub fn open(self) -> Result<ScoringMatrix> {
        info!("Opening matrix {:?} (default={})", self.source, self.default_score);
        let matrix = ScoringMatrix::with_default(self.source, self.default_score)?;
        if let Some(warning) = matrix.coverage_warning() {
            info!("Continuing despite coverage advisory: {}", warning);
        }
        Ok(matrix)
    }
}
