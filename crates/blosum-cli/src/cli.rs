use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "BLOSUM CLI - Look up substitution scores in bundled BLOSUM matrices or custom NCBI-style matrix files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the substitution score for a pair of residue symbols.
    Score(ScoreArgs),
    /// Print every explicit score in one row of the matrix.
    Row(RowArgs),
    /// List the row symbols defined by the matrix.
    Keys(MatrixArgs),
    /// Print the matrix with its identifier and default score.
    Show(ShowArgs),
    /// List the bundled BLOSUM presets.
    Presets,
}

/// Matrix selection shared by every lookup subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct MatrixArgs {
    /// Matrix to use: a preset (45, 50, 62, 80, 90 or e.g. 'BLOSUM62') or a path to a matrix file.
    /// Overrides `matrix` from the config file.
    #[arg(short, long, value_name = "PRESET_OR_PATH")]
    pub matrix: Option<String>,

    /// Score reported for symbol pairs absent from the matrix ('-inf' and 'inf' are accepted).
    /// Overrides `default-score` from the config file.
    #[arg(short, long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub default_score: Option<f64>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Row symbol (e.g. 'H').
    #[arg(required = true)]
    pub row: String,

    /// Column symbol (e.g. 'F').
    #[arg(required = true)]
    pub col: String,

    #[command(flatten)]
    pub matrix: MatrixArgs,
}

/// Arguments for the `row` subcommand.
#[derive(Args, Debug)]
pub struct RowArgs {
    /// Row symbol to print.
    #[arg(required = true)]
    pub row: String,

    #[command(flatten)]
    pub matrix: MatrixArgs,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Print only the canonical `ScoringMatrix(<id>, default=<score>)` form.
    #[arg(long)]
    pub repr: bool,
}
