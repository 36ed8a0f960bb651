use crate::mesh::ensure_parent;
use anyhow::{Context, Result};
use cytostage_model::Document;
use std::fmt::Write as _;
use std::path::Path;

/// Plain-text bill of materials, one merged line per purchased item.
pub fn write_bom(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut text = format!("bill of materials: {}\n\n", document.name());
    for line in document.bom() {
        let _ = writeln!(text, "{:>4} x {}", line.qty, line.item);
    }
    std::fs::write(path, text)
        .with_context(|| format!("write BOM file {}", path.display()))?;
    Ok(())
}
