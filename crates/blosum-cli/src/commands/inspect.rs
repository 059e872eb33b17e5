use crate::cli::{MatrixArgs, ShowArgs};
use crate::config::PartialConfig;
use crate::error::Result;
use std::io::Write;

pub fn run_keys(args: MatrixArgs, config: &PartialConfig, out: &mut impl Write) -> Result<()> {
    let matrix = config.merge_with_cli(&args)?.open()?;
    let mut keys: Vec<&str> = matrix.keys().collect();
    keys.sort_unstable();
    writeln!(out, "{}", keys.join(" "))?;
    Ok(())
}

pub fn run_show(args: ShowArgs, config: &PartialConfig, out: &mut impl Write) -> Result<()> {
    let matrix = config.merge_with_cli(&args.matrix)?.open()?;
    if args.repr {
        writeln!(out, "{}", matrix.repr())?;
    } else {
        write!(out, "{}", matrix)?;
        if let Some(warning) = matrix.coverage_warning() {
            writeln!(out, "warning: {}", warning)?;
        }
    }
    Ok(())
}
