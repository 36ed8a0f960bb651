use crate::mesh::ensure_parent;
use anyhow::{Context, Result};
use cytostage_topology::Solid;
use std::path::Path;
use truck_stepio::out;

pub fn export_step(solid: &Solid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let compressed = solid.compress();
    let header = out::StepHeaderDescriptor {
        file_name: path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("part.step")
            .to_string(),
        organization_system: "cytostage".to_string(),
        ..Default::default()
    };

    let step_string =
        out::CompleteStepDisplay::new(out::StepModel::from(&compressed), header).to_string();

    std::fs::write(path, step_string)
        .with_context(|| format!("write STEP file {}", path.display()))?;
    Ok(())
}
