use crate::MIN_WALL;
use crate::holes::{hole_through_z, tube_z, vertical_bolt_cuts};
use anyhow::{Context, Result};
use cytostage_base::Guid;
use cytostage_catalog::{ball_bearing, bolt, washer};
use cytostage_model::{
    BomLine, CompositePart, ParameterSet, ParameterValue, PartCategory, PartElement, Placement,
};
use cytostage_shapeops::{DEFAULT_SHAPEOPS_TOLERANCE, cut_list};
use cytostage_topology::{SolidBuilder, Vector3, translated};

const BASE_T: f64 = 7.0;

/// Idle-pulley holder: a plate carrying a bolt axle with a
/// washer / ball-bearing / washer stack the belt runs around. The stack
/// elements ride along with the holder as one composite.
pub fn idle_pulley_holder(name: &str) -> Result<CompositePart> {
    let bearing = ball_bearing("624").context("idle bearing missing from catalog")?;
    let axle_bolt = bolt(4).context("axle bolt size missing from catalog")?;
    let axle_washer = washer(4).context("axle washer missing from catalog")?;
    let mount_bolt = bolt(4).context("mount bolt size missing from catalog")?;

    let plate_w = bearing.out_d + 2.0 * MIN_WALL + 2.0 * (mount_bolt.head_d + 2.0 * MIN_WALL);
    let plate_d = bearing.out_d + 2.0 * MIN_WALL;
    let axle_x = plate_w / 2.0 - bearing.out_d / 2.0 - MIN_WALL;

    let plate = SolidBuilder::plate(plate_w, plate_d, BASE_T)?;
    let plate = translated(&plate, Vector3::new(-plate_w / 2.0, -plate_d / 2.0, 0.0));

    let axle_cuts = vertical_bolt_cuts(axle_bolt, 0.0, BASE_T)?;
    let mount_x = -plate_w / 2.0 + mount_bolt.head_d / 2.0 + MIN_WALL;
    let cuts = vec![
        translated(&axle_cuts.shank, Vector3::new(axle_x, 0.0, 0.0)),
        translated(&axle_cuts.nut_pocket, Vector3::new(axle_x, 0.0, 0.0)),
        hole_through_z(mount_bolt.shank_hole_d(), mount_x, 0.0, 0.0, BASE_T)?,
        hole_through_z(
            mount_bolt.shank_hole_d(),
            mount_x + mount_bolt.head_d + MIN_WALL,
            0.0,
            0.0,
            BASE_T,
        )?,
    ];
    let solid =
        cut_list(&plate, &cuts, DEFAULT_SHAPEOPS_TOLERANCE).context("cutting pulley holder")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("PlateW".to_string(), ParameterValue::Number(plate_w));
    parameters.insert("PlateD".to_string(), ParameterValue::Number(plate_d));
    parameters.insert(
        "Bearing".to_string(),
        ParameterValue::Text(bearing.code.to_string()),
    );

    let holder = PartElement::new(
        Guid::new(),
        format!("{name}_plate"),
        PartCategory::Pulley,
        parameters,
        solid,
    )
    .with_hardware(vec![
        BomLine::new(1, format!("bolt M{}x25", axle_bolt.metric)),
        BomLine::new(1, format!("nut M{}", axle_bolt.metric)),
        BomLine::new(2, format!("bolt M{}x10", mount_bolt.metric)),
        BomLine::new(2, format!("t-nut M{}", mount_bolt.metric)),
    ]);

    let mut composite = CompositePart::new(name);
    composite.push(holder, Placement::identity());

    let mut stack_z = BASE_T;
    let washer_solid = tube_z(axle_washer.out_d, axle_washer.in_d, axle_washer.thickness)?;
    let bearing_solid = tube_z(bearing.out_d, bearing.bore_d, bearing.width)?;
    let stack: [(&str, _, f64, BomLine); 3] = [
        (
            "washer_lower",
            washer_solid.clone(),
            axle_washer.thickness,
            BomLine::new(1, format!("washer M{}", axle_washer.metric)),
        ),
        (
            "bearing",
            bearing_solid,
            bearing.width,
            BomLine::new(1, format!("ball bearing {}", bearing.code)),
        ),
        (
            "washer_upper",
            washer_solid,
            axle_washer.thickness,
            BomLine::new(1, format!("washer M{}", axle_washer.metric)),
        ),
    ];
    for (label, solid, thickness, line) in stack {
        let element = PartElement::new(
            Guid::new(),
            format!("{name}_{label}"),
            PartCategory::Hardware,
            ParameterSet::new(),
            solid,
        )
        .with_hardware(vec![line]);
        composite.push(element, Placement::at(axle_x, 0.0, stack_z));
        stack_z += thickness;
    }
    Ok(composite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_rides_above_the_plate() {
        let composite = idle_pulley_holder("idler").unwrap();
        assert_eq!(composite.children().len(), 4);
        for child in &composite.children()[1..] {
            assert!(child.placement.z >= BASE_T);
        }
    }
}
