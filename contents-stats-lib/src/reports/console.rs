use crate::Result;
use crate::contents::{Architecture, RankedPackage};
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(architecture: Architecture, ranked: &[RankedPackage], use_colors: bool, writer: &mut W) -> Result<()> {
    if ranked.is_empty() {
        writeln!(writer, "No packages found in the Contents index for the {architecture} architecture")?;
        return Ok(());
    }

    let header = format!("Top {} packages for the {architecture} architecture", ranked.len());
    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }
    writeln!(writer)?;

    let rank_width = ranked.len().to_string().len();
    let name_width = ranked.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let count_width = ranked.iter().map(|p| p.count.to_string().len()).max().unwrap_or(0);

    for (index, package) in ranked.iter().enumerate() {
        let count = format!("{:>count_width$}", package.count);
        let count = if use_colors { count.green().to_string() } else { count };

        writeln!(writer, "{:>rank_width$}. {:<name_width$}  {count}", index + 1, package.name)?;
    }

    Ok(())
}
