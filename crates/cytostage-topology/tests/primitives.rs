use cytostage_topology::{Point3, Result, SolidBuilder};

#[test]
fn box_solid_exists() -> Result<()> {
    let solid = SolidBuilder::box_solid(100.0, 200.0, 300.0)?;
    assert!(solid.face_iter().count() > 0);
    Ok(())
}

#[test]
fn hex_prism_has_eight_faces() -> Result<()> {
    let solid = SolidBuilder::regular_prism(6, 4.0, 3.2, 0.0)?;
    assert_eq!(solid.face_iter().count(), 8);
    Ok(())
}

#[test]
fn wedge_has_five_faces() -> Result<()> {
    let solid = SolidBuilder::wedge(10.0, 6.0, 10.0)?;
    assert_eq!(solid.face_iter().count(), 5);
    Ok(())
}

#[test]
fn axis_variants_share_the_z_cylinder_shape() -> Result<()> {
    let along_z = SolidBuilder::cylinder_z(Point3::new(0.0, 0.0, 0.0), 4.0, 24.0)?;
    let along_x = SolidBuilder::cylinder_x(Point3::new(0.0, 0.0, 0.0), 4.0, 24.0)?;
    let along_y = SolidBuilder::cylinder_y(Point3::new(0.0, 0.0, 0.0), 4.0, 24.0)?;
    let faces = along_z.face_iter().count();
    assert_eq!(along_x.face_iter().count(), faces);
    assert_eq!(along_y.face_iter().count(), faces);
    Ok(())
}
