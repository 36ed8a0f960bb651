use anyhow::{Context, Result, bail};
use cytostage_base::Guid;
use cytostage_catalog::profile;
use cytostage_model::{BomLine, ParameterSet, ParameterValue, PartCategory, PartElement};
use cytostage_shapeops::{CUT_OVERSHOOT, DEFAULT_SHAPEOPS_TOLERANCE, cut_list};
use cytostage_topology::{Point3, Solid, SolidBuilder, Vector3, rotated_z, translated};
use truck_modeling::{Rad, builder};

/// Extrusion axis in the document frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Z => "Z",
        }
    }
}

/// T-slot aluminum extrusion of catalog cross-section. Built along +Z from
/// the origin and rotated down onto +X when asked; the cross-section stays
/// centered on the axis.
pub fn alu_extrusion(side: f64, length: f64, axis: Axis, name: &str) -> Result<PartElement> {
    if length <= 0.0 {
        bail!("extrusion length must be > 0");
    }
    let p = profile(side).with_context(|| format!("no aluminum profile with side {side}"))?;

    let envelope = SolidBuilder::box_centered_xy(p.side, p.side, length, 0.0)?;

    let bore = SolidBuilder::cylinder_z(
        Point3::new(0.0, 0.0, -CUT_OVERSHOOT),
        p.bore_d / 2.0,
        length + 2.0 * CUT_OVERSHOOT,
    )?;

    // reference T-slot on the +Y face; the other three faces carry rotated
    // duplicates of the same shape
    let opening = SolidBuilder::box_centered_xy(
        p.slot_w,
        p.lip_t + CUT_OVERSHOOT,
        length + 2.0 * CUT_OVERSHOOT,
        -CUT_OVERSHOOT,
    )?;
    let opening = translated(
        &opening,
        Vector3::new(0.0, p.side / 2.0 + (CUT_OVERSHOOT - p.lip_t) / 2.0, 0.0),
    );
    // the cavity reaches halfway into the lip so the two cuts overlap
    // instead of meeting face to face
    let cavity = SolidBuilder::box_centered_xy(
        p.cavity_w,
        p.cavity_t + p.lip_t / 2.0,
        length + 2.0 * CUT_OVERSHOOT,
        -CUT_OVERSHOOT,
    )?;
    let cavity = translated(
        &cavity,
        Vector3::new(
            0.0,
            p.side / 2.0 - p.lip_t - p.cavity_t / 2.0 + p.lip_t / 4.0,
            0.0,
        ),
    );

    let mut cuts = vec![bore];
    let origin = Point3::new(0.0, 0.0, 0.0);
    for quarter in 0..4 {
        let angle = std::f64::consts::FRAC_PI_2 * quarter as f64;
        cuts.push(rotated_z(&opening, origin, angle));
        cuts.push(rotated_z(&cavity, origin, angle));
    }

    let solid = cut_list(&envelope, &cuts, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("cutting extrusion profile")?;
    let solid = orient(&solid, axis);

    let mut parameters = ParameterSet::new();
    parameters.insert("Side".to_string(), ParameterValue::Number(p.side));
    parameters.insert("Length".to_string(), ParameterValue::Number(length));
    parameters.insert(
        "Axis".to_string(),
        ParameterValue::Text(axis.label().to_string()),
    );

    let side_mm = p.side as u32;
    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::Extrusion,
        parameters,
        solid,
    )
    .with_hardware(vec![BomLine::new(
        1,
        format!("aluminum extrusion {side_mm}x{side_mm} L={length:.0}"),
    )]))
}

fn orient(solid: &Solid, axis: Axis) -> Solid {
    match axis {
        Axis::Z => solid.clone(),
        Axis::X => builder::rotated(
            solid,
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
            Rad(std::f64::consts::FRAC_PI_2),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_profile_is_rejected() {
        assert!(alu_extrusion(25.0, 100.0, Axis::X, "rail").is_err());
        assert!(alu_extrusion(20.0, 0.0, Axis::X, "rail").is_err());
    }
}
