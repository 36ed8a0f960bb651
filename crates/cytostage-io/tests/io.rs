use anyhow::Result;
use cytostage_base::Guid;
use cytostage_io::{
    DEFAULT_TESSELLATION_TOLERANCE, export_step, export_stl, triangulate_solid, write_bom,
    write_manifest,
};
use cytostage_model::{BomLine, Document, ParameterSet, ParameterValue, PartCategory, PartElement};
use cytostage_topology::SolidBuilder;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_millis(),
        Err(_) => 0,
    };
    path.push(format!("cytostage_{stamp}_{file_name}"));
    path
}

fn block_document() -> Result<Document> {
    let solid = SolidBuilder::box_solid(40.0, 20.0, 10.0)?;
    let mut parameters = ParameterSet::new();
    parameters.insert("Width".to_string(), ParameterValue::Number(40.0));
    let element = PartElement::new(
        Guid::new(),
        "block",
        PartCategory::Generic,
        parameters,
        solid,
    )
    .with_hardware(vec![BomLine::new(2, "bolt M4x10")]);
    let mut doc = Document::new("test_doc");
    doc.add(element)?;
    Ok(doc)
}

#[test]
fn export_step_creates_file() -> Result<()> {
    let solid = SolidBuilder::box_solid(100.0, 200.0, 300.0)?;
    let path = temp_path("box.step");

    export_step(&solid, &path)?;

    let metadata = fs::metadata(&path)?;
    assert!(metadata.len() > 0);

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn triangulation_produces_mesh() -> Result<()> {
    let solid = SolidBuilder::box_solid(100.0, 200.0, 300.0)?;
    let mesh = triangulate_solid(&solid, DEFAULT_TESSELLATION_TOLERANCE);
    assert!(!mesh.positions().is_empty());
    assert!(mesh.faces().len() > 0);
    Ok(())
}

#[test]
fn export_stl_creates_binary_file() -> Result<()> {
    let solid = SolidBuilder::box_solid(30.0, 20.0, 10.0)?;
    let path = temp_path("block.stl");

    export_stl(&solid, &path, DEFAULT_TESSELLATION_TOLERANCE)?;

    // binary STL: 80-byte header, 4-byte count, 50 bytes per triangle
    let metadata = fs::metadata(&path)?;
    assert!(metadata.len() >= 84 + 50);

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn manifest_records_every_element() -> Result<()> {
    let doc = block_document()?;
    let path = temp_path("doc.json");

    write_manifest(&doc, &path)?;

    let text = fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(value["document"], "test_doc");
    assert_eq!(value["elements"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(value["elements"][0]["name"], "block");

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn bom_lists_merged_hardware() -> Result<()> {
    let doc = block_document()?;
    let path = temp_path("bom.txt");

    write_bom(&doc, &path)?;

    let text = fs::read_to_string(&path)?;
    assert!(text.contains("bill of materials: test_doc"));
    assert!(text.contains("2 x bolt M4x10"));

    let _ = fs::remove_file(&path);
    Ok(())
}
