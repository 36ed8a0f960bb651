use crate::MIN_WALL;
use crate::holes::{hole_through_z, slot_through_y};
use anyhow::{Context, Result};
use cytostage_base::Guid;
use cytostage_catalog::{TOL, bolt, nema, profile};
use cytostage_model::{BomLine, ParameterSet, ParameterValue, PartCategory, PartElement};
use cytostage_shapeops::{DEFAULT_SHAPEOPS_TOLERANCE, cut_list, fuse_all};
use cytostage_topology::{Point3, SolidBuilder, Vector3, rotated_z, translated};
use tracing::debug;

const WALL_T: f64 = 5.0;
/// Vertical play of the motor slots, for belt tensioning.
const TENSION_LEN: f64 = 6.0;
const GUSSET_T: f64 = 5.0;

/// L-bracket holding a NEMA stepper against a vertical face, with slotted
/// motor holes so the motor can slide to tension the belt, and a flange
/// bolted onto an extrusion rail.
pub fn nema_holder(size: u32, profile_side: f64, name: &str) -> Result<PartElement> {
    let motor = nema(size).with_context(|| format!("no NEMA {size} motor in catalog"))?;
    let p = profile(profile_side)
        .with_context(|| format!("no aluminum profile with side {profile_side}"))?;
    let motor_bolt = bolt(motor.bolt_metric).context("motor bolt size missing from catalog")?;
    let rail_bolt = bolt(p.bolt_metric).context("rail bolt size missing from catalog")?;

    let plate_w = motor.side + 2.0 * MIN_WALL;
    let plate_h = motor.side + TENSION_LEN + 2.0 * MIN_WALL;
    let flange_d = p.side + WALL_T + 2.0;
    let motor_z = plate_h - MIN_WALL - motor.side / 2.0;
    debug!(plate_w, plate_h, motor_z, "derived motor holder dimensions");

    // vertical motor plate, centered on the YZ origin plane
    let plate = SolidBuilder::box_centered_xy(plate_w, WALL_T, plate_h, 0.0)?;
    // flange extending +Y along the rail, narrower than the plate so the
    // fused side faces stay apart
    let flange = SolidBuilder::box_centered_xy(plate_w - 2.0, flange_d, WALL_T, 0.0)?;
    let flange = translated(&flange, Vector3::new(0.0, (flange_d - WALL_T) / 2.0, 0.0));
    // gussets lean from the flange up the back of the plate, outboard of the
    // motor bolt slots
    let gusset = SolidBuilder::wedge(flange_d - WALL_T - 2.0, GUSSET_T, plate_h / 2.0)?;
    let gusset = rotated_z(
        &gusset,
        Point3::new(0.0, 0.0, 0.0),
        std::f64::consts::FRAC_PI_2,
    );
    let gusset = translated(&gusset, Vector3::new(0.0, WALL_T / 2.0 - 0.5, WALL_T - 0.5));
    let left = translated(&gusset, Vector3::new(-plate_w / 2.0 + 1.5 + GUSSET_T, 0.0, 0.0));
    let right = translated(&gusset, Vector3::new(plate_w / 2.0 - 1.5, 0.0, 0.0));

    let body = fuse_all(&[plate, flange, left, right], DEFAULT_SHAPEOPS_TOLERANCE)
        .context("fusing motor holder body")?;

    let mut cuts = Vec::new();
    cuts.push(slot_through_y(
        motor.boss_d + TOL,
        TENSION_LEN,
        0.0,
        motor_z,
        WALL_T,
    )?);
    let slot_ref = slot_through_y(
        motor_bolt.shank_hole_d(),
        TENSION_LEN,
        0.0,
        0.0,
        WALL_T,
    )?;
    let half_sep = motor.bolt_sep / 2.0;
    for (sx, sz) in [
        (-half_sep, -half_sep),
        (-half_sep, half_sep),
        (half_sep, -half_sep),
        (half_sep, half_sep),
    ] {
        cuts.push(translated(&slot_ref, Vector3::new(sx, 0.0, motor_z + sz)));
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
        cut_list(&body, &cuts, DEFAULT_SHAPEOPS_TOLERANCE).context("cutting motor holder")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("Nema".to_string(), ParameterValue::Integer(size as i64));
    parameters.insert("PlateW".to_string(), ParameterValue::Number(plate_w));
    parameters.insert("PlateH".to_string(), ParameterValue::Number(plate_h));
    parameters.insert("FlangeD".to_string(), ParameterValue::Number(flange_d));
    parameters.insert(
        "TensionLen".to_string(),
        ParameterValue::Number(TENSION_LEN),
    );

    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::MotorMount,
        parameters,
        solid,
    )
    .with_hardware(vec![
        BomLine::new(1, format!("NEMA {size} stepper")),
        BomLine::new(4, format!("bolt M{}x8", motor_bolt.metric)),
        BomLine::new(2, format!("bolt M{}x10", rail_bolt.metric)),
        BomLine::new(2, format!("t-nut M{}", rail_bolt.metric)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_motor_is_rejected() {
        assert!(nema_holder(34, 20.0, "mh").is_err());
    }
}
