use crate::error::{MatrixError, Result};
use crate::parser::{CoverageWarning, MatrixParser, MatrixTable};
use crate::presets::Preset;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a [`ScoringMatrix`] takes its scores from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixSource {
    /// One of the bundled BLOSUM tables.
    Preset(Preset),
    /// A matrix file in the NCBI layout, parsed once at construction.
    Path(PathBuf),
}

impl From<Preset> for MatrixSource {
    fn from(preset: Preset) -> Self {
        MatrixSource::Preset(preset)
    }
}

impl From<PathBuf> for MatrixSource {
    fn from(path: PathBuf) -> Self {
        MatrixSource::Path(path)
    }
}

impl From<&Path> for MatrixSource {
    fn from(path: &Path) -> Self {
        MatrixSource::Path(path.to_path_buf())
    }
}

impl From<&str> for MatrixSource {
    fn from(path: &str) -> Self {
        MatrixSource::Path(PathBuf::from(path))
    }
}

impl From<String> for MatrixSource {
    fn from(path: String) -> Self {
        MatrixSource::Path(PathBuf::from(path))
    }
}

impl TryFrom<u32> for MatrixSource {
    type Error = MatrixError;

    fn try_from(number: u32) -> Result<Self> {
        Preset::try_from(number).map(MatrixSource::Preset)
    }
}

/// Identifier rendered by the string forms of a matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixId {
    Preset(Preset),
    Path(String),
}

impl fmt::Display for MatrixId {
    /// Presets render as a bare number, paths as a double-quoted string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixId::Preset(preset) => write!(f, "{}", preset.number()),
            MatrixId::Path(path) => write!(f, "\"{}\"", path),
        }
    }
}

/// Read-only substitution matrix with a default score for absent pairs.
///
/// Lookups never fail: any row or column that the source does not define
/// resolves to [`ScoringMatrix::default_score`]. Symbol alphabets differ
/// between matrix files, and query sequences routinely contain gap or
/// ambiguity characters, so a miss is an ordinary outcome.
///
/// ```
/// use blosum::{Preset, ScoringMatrix};
///
/// # fn main() -> blosum::Result<()> {
/// let matrix = ScoringMatrix::new(Preset::Blosum62)?;
/// assert_eq!(matrix.score("H", "F"), -1.0);
/// assert_eq!(matrix.row("H").score("U"), f64::NEG_INFINITY);
///
/// let lenient = ScoringMatrix::with_default(Preset::Blosum62, -99.0)?;
/// assert_eq!(lenient.score("non", "existent"), -99.0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ScoringMatrix {
    id: MatrixId,
    default: f64,
    table: Cow<'static, MatrixTable>,
    coverage: Option<CoverageWarning>,
}

impl ScoringMatrix {
    /// Builds a matrix whose default score is negative infinity.
    pub fn new(source: impl Into<MatrixSource>) -> Result<Self> {
        Self::with_default(source, f64::NEG_INFINITY)
    }

    /// Builds a matrix from a preset or a file path.
    ///
    /// # Errors
    ///
    /// For path sources, returns `MatrixError::UnreadableSource` if the file
    /// cannot be read and any fatal parse error reported by
    /// [`MatrixParser::parse`]. Preset sources cannot fail.
    pub fn with_default(source: impl Into<MatrixSource>, default_score: f64) -> Result<Self> {
        match source.into() {
            MatrixSource::Preset(preset) => {
                debug!("Using bundled {} matrix.", preset);
                Ok(Self {
                    id: MatrixId::Preset(preset),
                    default: default_score,
                    table: Cow::Borrowed(preset.table()),
                    coverage: None,
                })
            }
            MatrixSource::Path(path) => {
                let (table, coverage) = MatrixParser::parse_path(&path)?.into_parts();
                Ok(Self {
                    id: MatrixId::Path(path.to_string_lossy().to_string()),
                    default: default_score,
                    table: Cow::Owned(table),
                    coverage,
                })
            }
        }
    }

    /// Builds a preset matrix from its number, failing with
    /// `MatrixError::InvalidSelector` for anything but 45, 50, 62, 80 or 90.
    pub fn from_preset_number(number: u32, default_score: f64) -> Result<Self> {
        Self::with_default(MatrixSource::try_from(number)?, default_score)
    }

    pub fn id(&self) -> &MatrixId {
        &self.id
    }

    pub fn default_score(&self) -> f64 {
        self.default
    }

    /// Coverage advisory recorded while parsing a custom matrix file.
    pub fn coverage_warning(&self) -> Option<&CoverageWarning> {
        self.coverage.as_ref()
    }

    /// Score for the pair, or the default score if the pair is absent.
    pub fn score(&self, row: &str, col: &str) -> f64 {
        self.row(row).score(col)
    }

    /// Score for the pair, or `None` if the source does not define it.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        self.row(row).get(col)
    }

    /// View of one row. Unknown rows yield an empty view.
    pub fn row(&self, row: &str) -> RowView<'_> {
        RowView {
            scores: self.table.get(row),
            default: self.default,
        }
    }

    /// Row symbols defined by the source table.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn contains_row(&self, row: &str) -> bool {
        self.table.contains_key(row)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Copy of the full table, without any default entries.
    pub fn to_table(&self) -> MatrixTable {
        self.table.as_ref().clone()
    }

    /// Canonical form, `ScoringMatrix(<id>, default=<score>)`.
    ///
    /// It mirrors the constructor arguments for debugging output; it does
    /// not capture the table and is not a serialization format.
    pub fn repr(&self) -> String {
        format!("ScoringMatrix({}, default={})", self.id, self.default)
    }
}

impl fmt::Debug for ScoringMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for ScoringMatrix {
    /// Header line with identifier and default, then the full table as a
    /// grid with rows and columns sorted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ScoringMatrix {} (default={})", self.id, self.default)?;

        let rows: BTreeSet<&str> = self.keys().collect();
        let cols: BTreeSet<&str> = self
            .table
            .values()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();

        write!(f, "{:<3}", "")?;
        for col in &cols {
            write!(f, " {:>5}", col)?;
        }
        writeln!(f)?;

        for row in &rows {
            let view = self.row(row);
            write!(f, "{:<3}", row)?;
            for col in &cols {
                write!(f, " {:>5}", view.score(col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Column lookup scoped to one row of a [`ScoringMatrix`].
///
/// Holds the row's scores (or nothing, for an unknown row) and the matrix
/// default, so `matrix.row(r).score(c)` behaves exactly like
/// `matrix.score(r, c)` whichever of the two symbols is missing.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    scores: Option<&'a HashMap<String, f64>>,
    default: f64,
}

impl<'a> RowView<'a> {
    pub fn score(&self, col: &str) -> f64 {
        self.get(col).unwrap_or(self.default)
    }

    pub fn get(&self, col: &str) -> Option<f64> {
        self.scores.and_then(|scores| scores.get(col)).copied()
    }

    pub fn default_score(&self) -> f64 {
        self.default
    }

    pub fn len(&self) -> usize {
        self.scores.map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Explicit `(column, score)` entries of the row, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + use<'a> {
        self.scores
            .into_iter()
            .flat_map(|scores| scores.iter())
            .map(|(col, score)| (col.as_str(), *score))
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        self.scores.cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const SQUARE: &str = "   A  R  N  D
A  4  1  0  0
R  1  5  0  0
N  0  0  6  1
D  0  0  1  0
";

    const WITH_COMMENTS: &str = "#  Test matrix
   A  R  N  D
A  4  1  0  0
# rows may be separated by comments
R  1  5  0  0
N  0  0  6  1
D  0  0 -1  0
";

    fn write_fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn fixture_sum(matrix: &ScoringMatrix) -> f64 {
        let labels = ["A", "R", "N", "D"];
        labels
            .iter()
            .flat_map(|a| labels.iter().map(move |b| matrix.row(a).score(b)))
            .sum()
    }

    #[test]
    fn scoring_matrix_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoringMatrix>();
    }

    #[test]
    fn preset_lookups_return_reference_scores() {
        let matrix = ScoringMatrix::new(Preset::Blosum62).unwrap();
        assert_eq!(matrix.score("H", "F"), -1.0);
        assert_eq!(matrix.row("K").score("R"), 2.0);
        assert_eq!(matrix.get("W", "*"), Some(-4.0));
        assert_eq!(matrix.len(), 25);
    }

    #[test]
    fn unknown_symbols_fall_back_to_default() {
        let matrix = ScoringMatrix::new(Preset::Blosum45).unwrap();
        assert_eq!(matrix.score("U", "R"), f64::NEG_INFINITY);
        assert_eq!(matrix.score("H", "U"), f64::NEG_INFINITY);
        assert_eq!(matrix.score("U", "U"), f64::NEG_INFINITY);
        assert_eq!(matrix.get("U", "R"), None);
    }

    #[test]
    fn unknown_row_yields_empty_view_with_custom_default() {
        let matrix = ScoringMatrix::with_default(Preset::Blosum62, -99.0).unwrap();
        let view = matrix.row("nonexistent");

        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert!(view.to_map().is_empty());
        assert_eq!(view.score("A"), -99.0);
        assert_eq!(matrix.row("non").score("existent"), -99.0);
        assert_eq!(matrix.score("H", "F"), -1.0);
    }

    #[test]
    fn from_preset_number_rejects_unknown_selectors() {
        let matrix = ScoringMatrix::from_preset_number(90, 0.0).unwrap();
        assert_eq!(matrix.score("H", "F"), -2.0);

        let result = ScoringMatrix::from_preset_number(70, 0.0);
        assert!(matches!(result, Err(MatrixError::InvalidSelector(70))));
    }

    #[test]
    fn custom_file_lookups_sum_to_expected_total() {
        let (_dir, path) = write_fixture("test.blosum", SQUARE);
        let matrix = ScoringMatrix::new(path.as_path()).unwrap();
        assert_eq!(fixture_sum(&matrix), 19.0);
    }

    #[test]
    fn custom_file_with_comments_sums_to_expected_total() {
        let (_dir, path) = write_fixture("comments.blosum", WITH_COMMENTS);
        let matrix = ScoringMatrix::new(path.as_path()).unwrap();
        assert_eq!(fixture_sum(&matrix), 17.0);
    }

    #[test]
    fn custom_file_exposes_coverage_warning() {
        let (_dir, path) = write_fixture("test.blosum", SQUARE);
        let matrix = ScoringMatrix::new(path.as_path()).unwrap();

        let warning = matrix.coverage_warning().unwrap();
        assert_eq!(warning.labels, 4);
        assert!(ScoringMatrix::new(Preset::Blosum80)
            .unwrap()
            .coverage_warning()
            .is_none());
    }

    #[test]
    fn to_table_matches_load_matrix() {
        let (_dir, path) = write_fixture("test.blosum", SQUARE);
        let matrix = ScoringMatrix::new(path.as_path()).unwrap();
        assert_eq!(matrix.to_table(), crate::load_matrix(&path).unwrap());
    }

    #[test]
    fn keys_lists_only_source_rows() {
        let (_dir, path) = write_fixture("test.blosum", SQUARE);
        let matrix = ScoringMatrix::new(path.as_path()).unwrap();
        let _ = matrix.score("U", "A");

        let mut keys: Vec<&str> = matrix.keys().collect();
        keys.sort();
        assert_eq!(keys, ["A", "D", "N", "R"]);
        assert!(matrix.contains_row("A"));
        assert!(!matrix.contains_row("U"));
    }

    #[test]
    fn malformed_file_fails_construction() {
        let (_dir, path) = write_fixture("fail.blosum", "   A  R\nA  1  2\nR  3\n");
        let result = ScoringMatrix::new(path.as_path());
        assert!(matches!(result, Err(MatrixError::MalformedRow { .. })));
    }

    #[test]
    fn non_square_file_fails_construction() {
        let (_dir, path) = write_fixture("fail2.blosum", "   A  R  N\nA  1  2  3\n");
        let result = ScoringMatrix::new(path.as_path());
        assert!(matches!(
            result,
            Err(MatrixError::NonSquareMatrix { rows: 1, labels: 3 })
        ));
    }

    #[test]
    fn missing_file_fails_construction() {
        let dir = tempdir().unwrap();
        let result = ScoringMatrix::new(dir.path().join("missing.blosum"));
        assert!(matches!(result, Err(MatrixError::UnreadableSource { .. })));
    }

    #[test]
    fn repr_renders_presets_and_infinite_defaults() {
        assert_eq!(
            ScoringMatrix::new(Preset::Blosum62).unwrap().repr(),
            "ScoringMatrix(62, default=-inf)"
        );
        assert_eq!(
            ScoringMatrix::with_default(Preset::Blosum62, f64::INFINITY)
                .unwrap()
                .repr(),
            "ScoringMatrix(62, default=inf)"
        );
        assert_eq!(
            ScoringMatrix::with_default(Preset::Blosum62, 0.0)
                .unwrap()
                .repr(),
            "ScoringMatrix(62, default=0)"
        );
        assert_eq!(
            ScoringMatrix::with_default(Preset::Blosum50, -1.5)
                .unwrap()
                .repr(),
            "ScoringMatrix(50, default=-1.5)"
        );
    }

    #[test]
    fn repr_quotes_custom_paths() {
        let (_dir, path) = write_fixture("test.blosum", SQUARE);
        let matrix = ScoringMatrix::with_default(path.as_path(), 0.0).unwrap();
        assert_eq!(
            matrix.repr(),
            format!("ScoringMatrix(\"{}\", default=0)", path.display())
        );
        assert_eq!(format!("{:?}", matrix), matrix.repr());
    }

    #[test]
    fn display_includes_identifier_default_and_table() {
        let (_dir, path) = write_fixture("test.blosum", SQUARE);
        let matrix = ScoringMatrix::with_default(path.as_path(), -99.0).unwrap();
        let rendered = matrix.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].contains(&path.display().to_string()));
        assert!(lines[0].contains("default=-99"));
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), ["A", "D", "N", "R"]);
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            ["A", "4", "0", "0", "1"]
        );
    }

    #[test]
    fn display_lists_rows_missing_from_header() {
        let (_dir, path) = write_fixture("ragged.blosum", "  X Y\nX 1 2\nZ 3 4\n");
        let matrix = ScoringMatrix::new(path.as_path()).unwrap();
        let rendered = matrix.to_string();
        assert!(rendered.starts_with("ScoringMatrix \""));
        assert!(rendered.contains("default=-inf"));
        assert!(rendered.lines().any(|l| l.split_whitespace().eq(["Z", "3", "4"])));
    }

    #[test]
    fn matrix_source_conversions() {
        assert_eq!(
            MatrixSource::from(Preset::Blosum50),
            MatrixSource::Preset(Preset::Blosum50)
        );
        assert_eq!(
            MatrixSource::from("m.txt"),
            MatrixSource::Path(PathBuf::from("m.txt"))
        );
        assert_eq!(
            MatrixSource::try_from(80).unwrap(),
            MatrixSource::Preset(Preset::Blosum80)
        );
        assert!(MatrixSource::try_from(81).is_err());
    }
}
