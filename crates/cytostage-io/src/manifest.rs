use crate::mesh::ensure_parent;
use anyhow::{Context, Result};
use cytostage_model::{Document, ParameterSet, PartCategory, Placement};
use serde::Serialize;
use std::path::Path;

/// What the saved document records for one element: everything except the
/// geometry itself, which goes to its own STEP/STL file.
#[derive(Debug, Serialize)]
pub struct ElementRecord {
    pub guid: String,
    pub name: String,
    pub category: PartCategory,
    pub placement: Placement,
    pub parameters: ParameterSet,
}

#[derive(Debug, Serialize)]
pub struct DocumentManifest {
    pub document: String,
    pub elements: Vec<ElementRecord>,
}

impl DocumentManifest {
    pub fn from_document(document: &Document) -> Self {
        let elements = document
            .iter()
            .map(|e| ElementRecord {
                guid: e.guid.to_string(),
                name: e.name.clone(),
                category: e.category,
                placement: e.placement,
                parameters: e.parameters.clone(),
            })
            .collect();
        Self {
            document: document.name().to_string(),
            elements,
        }
    }
}

pub fn write_manifest(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let manifest = DocumentManifest::from_document(document);
    let text = serde_json::to_string_pretty(&manifest).context("serialize document manifest")?;
    std::fs::write(path, text)
        .with_context(|| format!("write manifest file {}", path.display()))?;
    Ok(())
}
