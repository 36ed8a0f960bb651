use anyhow::Result;
use cytostage_io::{DEFAULT_TESSELLATION_TOLERANCE, export_stl, write_bom};
use cytostage_parts::{StageConfig, stage_layout};

fn main() -> Result<()> {
    let document = stage_layout(&StageConfig::default())?;
    write_bom(&document, "out/bom.txt")?;
    for element in document.iter() {
        export_stl(
            element.geometry(),
            format!("out/{}.stl", element.name),
            DEFAULT_TESSELLATION_TOLERANCE,
        )?;
    }
    Ok(())
}
