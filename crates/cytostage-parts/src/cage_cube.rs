use crate::MIN_WALL;
use crate::holes::{hole_through_y, hole_through_z};
use anyhow::{Context, Result};
use cytostage_base::Guid;
use cytostage_catalog::{TOL, bolt, cage_cube_30, profile};
use cytostage_model::{BomLine, ParameterSet, ParameterValue, PartCategory, PartElement};
use cytostage_shapeops::{CUT_OVERSHOOT, DEFAULT_SHAPEOPS_TOLERANCE, cut_list, fuse_all, union};
use cytostage_topology::{Point3, SolidBuilder, Vector3, rotated_z, translated};

const WALL_T: f64 = 6.0;
// thin enough to fit between the lower rod holes and the plate edge
const GUSSET_T: f64 = 3.0;

/// Bracket holding a 30 mm optical cage cube against a vertical plate:
/// central beam bore, four cage-rod holes on the rod square, flange onto an
/// extrusion rail.
pub fn cage_cube_mount(profile_side: f64, name: &str) -> Result<PartElement> {
    let cube = cage_cube_30();
    let p = profile(profile_side)
        .with_context(|| format!("no aluminum profile with side {profile_side}"))?;
    let rail_bolt = bolt(p.bolt_metric).context("rail bolt size missing from catalog")?;

    let plate_w = cube.side + 2.0 * MIN_WALL;
    let plate_h = WALL_T + MIN_WALL + cube.side + MIN_WALL;
    let flange_d = p.side + WALL_T + 2.0;
    let center_z = plate_h - MIN_WALL - cube.side / 2.0;

    let plate = SolidBuilder::box_centered_xy(plate_w, WALL_T, plate_h, 0.0)?;
    let flange = SolidBuilder::box_centered_xy(plate_w - 2.0, flange_d, WALL_T, 0.0)?;
    let flange = translated(&flange, Vector3::new(0.0, (flange_d - WALL_T) / 2.0, 0.0));
    let gusset = SolidBuilder::wedge(flange_d - WALL_T - 2.0, GUSSET_T, plate_h / 3.0)?;
    let gusset = rotated_z(
        &gusset,
        Point3::new(0.0, 0.0, 0.0),
        std::f64::consts::FRAC_PI_2,
    );
    let gusset = translated(&gusset, Vector3::new(0.0, WALL_T / 2.0 - 0.5, WALL_T - 0.5));
    let left = translated(&gusset, Vector3::new(-plate_w / 2.0 + 0.5 + GUSSET_T, 0.0, 0.0));
    let right = translated(&gusset, Vector3::new(plate_w / 2.0 - 0.5, 0.0, 0.0));
    let body = fuse_all(&[plate, flange, left, right], DEFAULT_SHAPEOPS_TOLERANCE)
        .context("fusing cage mount body")?;

    let mut cuts = vec![hole_through_y(cube.bore_d + TOL, 0.0, center_z, WALL_T)?];
    let rod_ref = hole_through_y(cube.rod_d + TOL, 0.0, 0.0, WALL_T)?;
    let half = cube.rod_sep / 2.0;
    for (rx, rz) in [(-half, -half), (-half, half), (half, -half), (half, half)] {
        cuts.push(translated(&rod_ref, Vector3::new(rx, 0.0, center_z + rz)));
    }
    let rail_y = WALL_T / 2.0 + 1.0 + p.side / 2.0;
    for fx in [-plate_w / 4.0, plate_w / 4.0] {
        cuts.push(hole_through_z(
            rail_bolt.shank_hole_d(),
            fx,
            rail_y,
            0.0,
            WALL_T,
        )?);
    }
    let solid =
        cut_list(&body, &cuts, DEFAULT_SHAPEOPS_TOLERANCE).context("cutting cage mount")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("PlateW".to_string(), ParameterValue::Number(plate_w));
    parameters.insert("PlateH".to_string(), ParameterValue::Number(plate_h));
    parameters.insert("RodSep".to_string(), ParameterValue::Number(cube.rod_sep));
    parameters.insert("BoreD".to_string(), ParameterValue::Number(cube.bore_d));

    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::CageCube,
        parameters,
        solid,
    )
    .with_hardware(vec![
        BomLine::new(2, format!("bolt M{}x10", rail_bolt.metric)),
        BomLine::new(2, format!("t-nut M{}", rail_bolt.metric)),
    ]))
}

/// The cage cube itself, as a placeholder solid: beam bores crossing on both
/// horizontal axes plus the four rod holes.
pub fn cage_cube_block(name: &str) -> Result<PartElement> {
    let cube = cage_cube_30();

    let block =
        SolidBuilder::box_centered_xy(cube.side, cube.side, cube.side, -cube.side / 2.0)?;
    let bore_y = hole_through_y(cube.bore_d, 0.0, 0.0, cube.side)?;
    let bore_x = SolidBuilder::cylinder_x(
        Point3::new(-cube.side / 2.0 - CUT_OVERSHOOT, 0.0, 0.0),
        cube.bore_d / 2.0,
        cube.side + 2.0 * CUT_OVERSHOOT,
    )?;
    let bores = union(&bore_y, &bore_x, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("fusing cage cube bores")?;

    let mut cuts = vec![bores];
    let rod_ref = hole_through_y(cube.rod_d, 0.0, 0.0, cube.side)?;
    let half = cube.rod_sep / 2.0;
    for (rx, rz) in [(-half, -half), (-half, half), (half, -half), (half, half)] {
        cuts.push(translated(&rod_ref, Vector3::new(rx, 0.0, rz)));
    }
    let solid =
        cut_list(&block, &cuts, DEFAULT_SHAPEOPS_TOLERANCE).context("cutting cage cube")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("Side".to_string(), ParameterValue::Number(cube.side));
    parameters.insert("RodSep".to_string(), ParameterValue::Number(cube.rod_sep));

    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::CageCube,
        parameters,
        solid,
    )
    .with_hardware(vec![BomLine::new(1, "30 mm cage cube".to_string())]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_plate_spans_the_rod_square() {
        let cube = cage_cube_30();
        let mount = cage_cube_mount(20.0, "cage_mount").unwrap();
        let plate_w = mount.number_parameter("PlateW").unwrap();
        assert!(plate_w > cube.rod_sep + cube.rod_d);
    }
}
