use crate::MIN_WALL;
use crate::holes::hole_through_z;
use anyhow::{Context, Result};
use cytostage_base::Guid;
use cytostage_catalog::{TOL, belt_gt2, bolt};
use cytostage_model::{BomLine, ParameterSet, ParameterValue, PartCategory, PartElement};
use cytostage_shapeops::{CUT_OVERSHOOT, DEFAULT_SHAPEOPS_TOLERANCE, cut_list};
use cytostage_topology::{Point3, SolidBuilder, Vector3, translated};

const CLAMP_LEN: f64 = 16.0;
const CLAMP_W: f64 = 10.0;

/// Small block that pinches a GT2 belt: open-top belt slot along X, two
/// pinch bolts through the slot.
pub fn belt_clamp(name: &str) -> Result<PartElement> {
    let belt = belt_gt2();
    let pinch_bolt = bolt(3).context("pinch bolt size missing from catalog")?;

    let height = MIN_WALL + belt.width + 2.0;
    let block = SolidBuilder::box_centered_xy(CLAMP_LEN, CLAMP_W, height, 0.0)?;

    let slot = SolidBuilder::box_centered_xy(
        CLAMP_LEN + 2.0 * CUT_OVERSHOOT,
        belt.thickness + TOL,
        height - MIN_WALL + CUT_OVERSHOOT,
        MIN_WALL,
    )?;
    let bolt_x = CLAMP_LEN / 2.0 - 4.0;
    let cuts = vec![
        slot,
        hole_through_z(pinch_bolt.shank_hole_d(), -bolt_x, 0.0, 0.0, height)?,
        hole_through_z(pinch_bolt.shank_hole_d(), bolt_x, 0.0, 0.0, height)?,
    ];
    let solid =
        cut_list(&block, &cuts, DEFAULT_SHAPEOPS_TOLERANCE).context("cutting belt clamp")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("Length".to_string(), ParameterValue::Number(CLAMP_LEN));
    parameters.insert("Width".to_string(), ParameterValue::Number(CLAMP_W));
    parameters.insert("Height".to_string(), ParameterValue::Number(height));

    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::Clamp,
        parameters,
        solid,
    )
    .with_hardware(vec![
        BomLine::new(2, format!("bolt M{}x16", pinch_bolt.metric)),
        BomLine::new(2, format!("nut M{}", pinch_bolt.metric)),
    ]))
}

const TENSIONER_LEN: f64 = 30.0;
const TENSIONER_W: f64 = 12.0;
const TENSIONER_H: f64 = 12.0;

/// Belt tensioner: an axial bolt pulls against a captive nut dropped in from
/// the top; the belt loops through a slot at the far end.
pub fn belt_tensioner(name: &str) -> Result<PartElement> {
    let belt = belt_gt2();
    let tension_bolt = bolt(4).context("tension bolt size missing from catalog")?;

    let block = SolidBuilder::box_centered_xy(TENSIONER_LEN, TENSIONER_W, TENSIONER_H, 0.0)?;
    let axis_z = TENSIONER_H / 2.0;

    let channel = SolidBuilder::cylinder_x(
        Point3::new(-TENSIONER_LEN / 2.0 - CUT_OVERSHOOT, 0.0, axis_z),
        tension_bolt.shank_hole_d() / 2.0,
        TENSIONER_LEN + 2.0 * CUT_OVERSHOOT,
    )?;

    // captive nut slot, open at the top face
    let nut_r = tension_bolt.nut_circumradius() + TOL / 2.0;
    let nut_slot = SolidBuilder::box_centered_xy(
        tension_bolt.nut_h + TOL,
        tension_bolt.nut_s + TOL,
        TENSIONER_H / 2.0 + nut_r + CUT_OVERSHOOT,
        axis_z - nut_r,
    )?;
    let nut_slot = translated(
        &nut_slot,
        Vector3::new(-TENSIONER_LEN / 2.0 + 8.0, 0.0, 0.0),
    );

    let belt_slot = SolidBuilder::box_centered_xy(
        8.0,
        TENSIONER_W + 2.0 * CUT_OVERSHOOT,
        belt.width + TOL,
        axis_z - (belt.width + TOL) / 2.0,
    )?;
    let belt_slot = translated(&belt_slot, Vector3::new(TENSIONER_LEN / 2.0 - 6.0, 0.0, 0.0));

    let cuts = vec![channel, nut_slot, belt_slot];
    let solid =
        cut_list(&block, &cuts, DEFAULT_SHAPEOPS_TOLERANCE).context("cutting belt tensioner")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("Length".to_string(), ParameterValue::Number(TENSIONER_LEN));
    parameters.insert("Width".to_string(), ParameterValue::Number(TENSIONER_W));
    parameters.insert("Height".to_string(), ParameterValue::Number(TENSIONER_H));

    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::Clamp,
        parameters,
        solid,
    )
    .with_hardware(vec![
        BomLine::new(1, format!("bolt M{}x40", tension_bolt.metric)),
        BomLine::new(1, format!("nut M{}", tension_bolt.metric)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cytostage_catalog::belt_gt2;

    #[test]
    fn clamp_block_clears_the_belt() {
        let belt = belt_gt2();
        let clamp = belt_clamp("clamp").unwrap();
        let height = clamp.number_parameter("Height").unwrap();
        assert!(height > belt.width + MIN_WALL);
    }
}
