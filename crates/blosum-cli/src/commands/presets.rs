use crate::error::Result;
use blosum::Preset;
use std::io::Write;

pub fn run(out: &mut impl Write) -> Result<()> {
    for preset in Preset::ALL {
        let table = preset.table();
        writeln!(
            out,
            "{}\t{}\t{}x{}",
            preset.number(),
            preset,
            table.len(),
            table.values().next().map_or(0, |row| row.len())
        )?;
    }
    Ok(())
}
