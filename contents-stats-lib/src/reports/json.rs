use crate::Result;
use crate::contents::{Architecture, FetchOutcome, RankedPackage};
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(architecture: Architecture, outcome: &FetchOutcome, ranked: &[RankedPackage], writer: &mut W) -> Result<()> {
    let packages: Vec<_> = ranked
        .iter()
        .enumerate()
        .map(|(index, package)| {
            json!({
                "rank": index + 1,
                "name": package.name,
                "count": package.count,
            })
        })
        .collect();

    let output = json!({
        "architecture": architecture.as_str(),
        "source": outcome.source(),
        "packages": packages,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
