use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::NameItem;

/// Write items as `rank,name` records without a header, the layout the
/// loader reads. Alphabetical lists carry an empty rank field.
pub fn write_items<W: Write>(writer: W, items: &[NameItem]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);
    for item in items {
        csv.write_record([item.rank.as_str(), item.name.as_str()])
            .with_context(|| format!("writing {}", item.name))?;
    }
    csv.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn export_to_path(path: &Path, items: &[NameItem]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_items(file, items)?;
    log::info!("Exported {} names to {}", items.len(), path.display());
    Ok(())
}
