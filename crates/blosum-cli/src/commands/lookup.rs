use crate::cli::{RowArgs, ScoreArgs};
use crate::config::PartialConfig;
use crate::error::Result;
use std::io::Write;
use tracing::debug;

pub fn run_score(args: ScoreArgs, config: &PartialConfig, out: &mut impl Write) -> Result<()> {
    let matrix = config.merge_with_cli(&args.matrix)?.open()?;
    let score = matrix.score(&args.row, &args.col);
    if matrix.get(&args.row, &args.col).is_none() {
        debug!(
            "Pair {}/{} is not in {}; reporting the default score.",
            args.row,
            args.col,
            matrix.id()
        );
    }
    writeln!(out, "{}", score)?;
    Ok(())
}

pub fn run_row(args: RowArgs, config: &PartialConfig, out: &mut impl Write) -> Result<()> {
    let matrix = config.merge_with_cli(&args.matrix)?.open()?;
    let view = matrix.row(&args.row);
    if view.is_empty() {
        debug!("Row {} is not in {}.", args.row, matrix.id());
    }

    let mut entries: Vec<(&str, f64)> = view.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (col, score) in entries {
        writeln!(out, "{}\t{}", col, score)?;
    }
    Ok(())
}
