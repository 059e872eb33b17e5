use crate::error::{MalformedRowKind, MatrixError, Result};
use crate::symbols::{STANDARD_SYMBOL_COUNT, missing_standard_symbols};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Two-level score table: row symbol, then column symbol.
pub type MatrixTable = HashMap<String, HashMap<String, f64>>;

/// Advisory raised when a header does not declare the 25 standard symbols.
///
/// The matrix is still usable; lookups for the absent symbols fall back to
/// the default score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageWarning {
    /// Number of column labels declared by the header.
    pub labels: usize,
    /// Standard symbols that the header does not declare, sorted.
    pub missing: Vec<String>,
}

impl fmt::Display for CoverageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix declares {} labels instead of {} and may not cover all symbols",
            self.labels, STANDARD_SYMBOL_COUNT
        )?;
        if !self.missing.is_empty() {
            write!(f, " (missing: {})", self.missing.join(" "))?;
        }
        Ok(())
    }
}

/// Result of a successful parse: the table plus any coverage advisory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMatrixTable {
    table: MatrixTable,
    coverage: Option<CoverageWarning>,
}

impl ParsedMatrixTable {
    pub fn table(&self) -> &MatrixTable {
        &self.table
    }

    pub fn coverage_warning(&self) -> Option<&CoverageWarning> {
        self.coverage.as_ref()
    }

    pub fn into_table(self) -> MatrixTable {
        self.table
    }

    pub fn into_parts(self) -> (MatrixTable, Option<CoverageWarning>) {
        (self.table, self.coverage)
    }
}

/// Reader for whitespace-delimited substitution matrices in the NCBI layout.
///
/// ```text
/// #  comment lines start with '#'
///    A  R  N  D
/// A  4 -1 -2 -2
/// R -1  5  0 -2
/// N -2  0  6  1
/// D -2 -2  1  6
/// ```
///
/// The first non-comment line holds the column labels; each following line
/// holds a row symbol and one score per label. Parsing is all-or-nothing.
pub struct MatrixParser;

impl MatrixParser {
    /// Parses a matrix from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::MalformedRow` if a data line has the wrong number
    /// of tokens or a non-numeric score, `MatrixError::NonSquareMatrix` if the
    /// number of distinct rows differs from the number of labels, and
    /// `MatrixError::Io` if reading fails.
    pub fn parse(reader: &mut impl BufRead) -> Result<ParsedMatrixTable> {
        let mut significant = reader
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                Ok(line) if is_skippable(&line) => None,
                other => Some((idx + 1, other)),
            });

        let labels: Vec<String> = match significant.next() {
            Some((_, header)) => header?.split_whitespace().map(str::to_owned).collect(),
            None => Vec::new(),
        };
        let coverage = check_coverage(&labels);

        let mut table = MatrixTable::with_capacity(labels.len());
        for (line_num, line) in significant {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let (symbol, row) = parse_row(line_num, &tokens, &labels)?;
            table.insert(symbol, row);
        }

        if table.len() != labels.len() {
            return Err(MatrixError::NonSquareMatrix {
                rows: table.len(),
                labels: labels.len(),
            });
        }

        debug!(
            "Parsed substitution matrix with {} rows and {} columns.",
            table.len(),
            labels.len()
        );
        Ok(ParsedMatrixTable { table, coverage })
    }

    pub fn parse_str(content: &str) -> Result<ParsedMatrixTable> {
        Self::parse(&mut content.as_bytes())
    }

    /// Opens `path` and parses its contents.
    ///
    /// Read failures, including ones in the middle of the file, are reported
    /// as `MatrixError::UnreadableSource` carrying the path.
    pub fn parse_path<P: AsRef<Path>>(path: P) -> Result<ParsedMatrixTable> {
        let path = path.as_ref();
        debug!("Loading substitution matrix from {:?}", path);
        let unreadable = |source| MatrixError::UnreadableSource {
            path: path.to_string_lossy().to_string(),
            source,
        };

        let file = File::open(path).map_err(unreadable)?;
        let mut reader = BufReader::new(file);
        Self::parse(&mut reader).map_err(|e| match e {
            MatrixError::Io(source) => unreadable(source),
            other => other,
        })
    }
}

/// Parses the matrix file at `path` and returns the bare two-level table.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<MatrixTable> {
    MatrixParser::parse_path(path).map(ParsedMatrixTable::into_table)
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn check_coverage(labels: &[String]) -> Option<CoverageWarning> {
    if labels.len() == STANDARD_SYMBOL_COUNT {
        return None;
    }
    let warning = CoverageWarning {
        labels: labels.len(),
        missing: missing_standard_symbols(labels.iter().map(String::as_str)),
    };
    warn!("Substitution {}", warning);
    Some(warning)
}

fn parse_row(
    line_num: usize,
    tokens: &[&str],
    labels: &[String],
) -> Result<(String, HashMap<String, f64>)> {
    let expected = labels.len() + 1;
    if tokens.len() != expected {
        return Err(MatrixError::MalformedRow {
            line: line_num,
            kind: MalformedRowKind::WrongTokenCount {
                expected,
                found: tokens.len(),
            },
        });
    }

    let row = labels
        .iter()
        .zip(&tokens[1..])
        .map(|(label, token)| {
            token
                .parse::<f64>()
                .map(|score| (label.clone(), score))
                .map_err(|source| MatrixError::MalformedRow {
                    line: line_num,
                    kind: MalformedRowKind::InvalidScore {
                        token: token.to_string(),
                        source,
                    },
                })
        })
        .collect::<Result<HashMap<_, _>>>()?;

    Ok((tokens[0].to_string(), row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SQUARE: &str = "   A  R  N  D
A  4  1  0  0
R  1  5  0  0
N  0  0  6  1
D  0  0  1  0
";

    const WITH_COMMENTS: &str = "# Matrix made by hand
#  for parser tests

   A  R  N  D
A  4  1  0  0
  # indented comment between rows
R  1  5  0  0
N  0  0  6  1
# another one
D  0  0 -1  0


";

    fn sum_over(table: &MatrixTable, labels: &[&str]) -> f64 {
        labels
            .iter()
            .flat_map(|a| labels.iter().map(move |b| table[*a][*b]))
            .sum()
    }

    #[test]
    fn parse_reads_square_matrix() {
        let parsed = MatrixParser::parse_str(SQUARE).unwrap();
        let table = parsed.table();

        assert_eq!(table.len(), 4);
        assert_eq!(table["A"]["A"], 4.0);
        assert_eq!(table["R"]["A"], 1.0);
        assert_eq!(table["N"]["D"], 1.0);
        assert_eq!(sum_over(table, &["A", "R", "N", "D"]), 19.0);
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let parsed = MatrixParser::parse_str(WITH_COMMENTS).unwrap();
        let table = parsed.table();

        assert_eq!(table.len(), 4);
        assert_eq!(table["D"]["N"], -1.0);
        assert_eq!(sum_over(table, &["A", "R", "N", "D"]), 17.0);
    }

    #[test]
    fn parse_keeps_asymmetric_scores() {
        let parsed = MatrixParser::parse_str("  X Y\nX 1 2\nY 3 4\n").unwrap();
        assert_eq!(parsed.table()["X"]["Y"], 2.0);
        assert_eq!(parsed.table()["Y"]["X"], 3.0);
    }

    #[test]
    fn parse_accepts_fractional_and_tab_separated_scores() {
        let parsed = MatrixParser::parse_str("\tA\tB\nA\t0.5\t-1.25\nB\t-1.25\t2e1\n").unwrap();
        assert_eq!(parsed.table()["A"]["B"], -1.25);
        assert_eq!(parsed.table()["B"]["B"], 20.0);
    }

    #[test]
    fn parse_reports_coverage_warning_for_partial_alphabet() {
        let parsed = MatrixParser::parse_str(SQUARE).unwrap();
        let warning = parsed.coverage_warning().unwrap();

        assert_eq!(warning.labels, 4);
        assert_eq!(warning.missing.len(), 21);
        assert!(warning.to_string().contains("may not cover all symbols"));
    }

    #[test]
    fn parse_has_no_coverage_warning_for_full_alphabet() {
        let labels = "A R N D C Q E G H I L K M F P S T W Y V B J Z X *";
        let mut content = format!("{labels}\n");
        for symbol in labels.split_whitespace() {
            content.push_str(symbol);
            content.push_str(&" 0".repeat(25));
            content.push('\n');
        }

        let parsed = MatrixParser::parse_str(&content).unwrap();
        assert_eq!(parsed.table().len(), 25);
        assert!(parsed.coverage_warning().is_none());
    }

    #[test]
    fn parse_fails_for_row_with_missing_values() {
        let content = "  A R\nA 1 2\nR 3\n";
        let result = MatrixParser::parse_str(content);
        assert!(matches!(
            result,
            Err(MatrixError::MalformedRow {
                line: 3,
                kind: MalformedRowKind::WrongTokenCount {
                    expected: 3,
                    found: 2
                }
            })
        ));
    }

    #[test]
    fn parse_fails_for_row_with_extra_values() {
        let content = "  A R\nA 1 2 3\nR 3 4\n";
        let result = MatrixParser::parse_str(content);
        assert!(matches!(
            result,
            Err(MatrixError::MalformedRow {
                line: 2,
                kind: MalformedRowKind::WrongTokenCount { .. }
            })
        ));
    }

    #[test]
    fn parse_fails_for_non_numeric_score() {
        let content = "  A R\nA 1 two\nR 3 4\n";
        match MatrixParser::parse_str(content) {
            Err(MatrixError::MalformedRow {
                line,
                kind: MalformedRowKind::InvalidScore { token, .. },
            }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "two");
            }
            other => panic!("expected InvalidScore, got {:?}", other),
        }
    }

    #[test]
    fn parse_fails_when_rows_are_missing() {
        let content = "  A R N\nA 1 2 3\nR 3 4 5\n";
        let result = MatrixParser::parse_str(content);
        assert!(matches!(
            result,
            Err(MatrixError::NonSquareMatrix { rows: 2, labels: 3 })
        ));
    }

    #[test]
    fn parse_treats_duplicate_row_symbols_as_non_square() {
        let content = "  A R\nA 1 2\nA 3 4\n";
        let result = MatrixParser::parse_str(content);
        assert!(matches!(
            result,
            Err(MatrixError::NonSquareMatrix { rows: 1, labels: 2 })
        ));
    }

    #[test]
    fn parse_accepts_empty_input_as_vacuously_square() {
        let parsed = MatrixParser::parse_str("# only a comment\n\n").unwrap();
        assert!(parsed.table().is_empty());
        assert_eq!(parsed.coverage_warning().map(|w| w.labels), Some(0));
    }

    #[test]
    fn parse_path_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.blosum");
        fs::write(&file_path, SQUARE).unwrap();

        let parsed = MatrixParser::parse_path(&file_path).unwrap();
        assert_eq!(parsed.table()["R"]["R"], 5.0);
    }

    #[test]
    fn parse_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("non_existent.blosum");

        let result = MatrixParser::parse_path(&file_path);
        assert!(matches!(result, Err(MatrixError::UnreadableSource { .. })));
    }

    #[test]
    fn parse_path_reports_mid_file_read_failure_with_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("latin1.blosum");
        fs::write(&file_path, b"   A  R\nA  4 -1\nR \xff\xfe 5\n").unwrap();

        match MatrixParser::parse_path(&file_path) {
            Err(MatrixError::UnreadableSource { path, source }) => {
                assert_eq!(path, file_path.to_string_lossy());
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn load_matrix_returns_bare_table() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("comments.blosum");
        fs::write(&file_path, WITH_COMMENTS).unwrap();

        let table = load_matrix(&file_path).unwrap();
        assert_eq!(table, MatrixParser::parse_str(WITH_COMMENTS).unwrap().into_table());
    }
}
