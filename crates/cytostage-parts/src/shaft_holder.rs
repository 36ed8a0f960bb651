use crate::MIN_WALL;
use crate::holes::{hole_through_z, rotated_to_x};
use anyhow::{Context, Result, bail};
use cytostage_base::Guid;
use cytostage_catalog::{TOL, bolt, stock_bolt_length};
use cytostage_model::{BomLine, ParameterSet, ParameterValue, PartCategory, PartElement};
use cytostage_shapeops::{CUT_OVERSHOOT, DEFAULT_SHAPEOPS_TOLERANCE, cut_list, union};
use cytostage_topology::{Point3, SolidBuilder, Vector3, translated};
use tracing::debug;

const BASE_T: f64 = 6.0;
const SLIT_W: f64 = 2.0;

/// SK-style shaft holder: base plate plus a slitted pillar that clamps a
/// smooth rod running along Y at height `rod_h` above the base bottom.
pub fn shaft_holder(rod_d: f64, rod_h: f64, name: &str) -> Result<PartElement> {
    if rod_d <= 0.0 {
        bail!("rod diameter must be > 0");
    }
    if rod_h < rod_d / 2.0 + BASE_T + MIN_WALL {
        bail!("rod height {rod_h} leaves no pillar below the rod bore");
    }
    let base_bolt = bolt(4).context("base bolt size missing from catalog")?;
    let clamp_bolt = bolt(3).context("clamp bolt size missing from catalog")?;

    let pillar_w = rod_d + 4.0 * MIN_WALL;
    let depth = rod_d + 2.0 * MIN_WALL + 2.0;
    let base_l = pillar_w + 2.0 * (base_bolt.head_d + 2.0 * MIN_WALL);
    let clamp_z = rod_h + rod_d / 2.0 + clamp_bolt.shank_d / 2.0 + 1.0;
    let pillar_top = clamp_z + clamp_bolt.shank_d / 2.0 + MIN_WALL;
    debug!(pillar_w, base_l, pillar_top, "derived shaft holder dimensions");

    // the pillar is embedded into the base; fused faces must not be coplanar
    let base = SolidBuilder::box_centered_xy(base_l, depth + 2.0, BASE_T, 0.0)?;
    let pillar = SolidBuilder::box_centered_xy(
        pillar_w,
        depth,
        pillar_top - (BASE_T - 1.0),
        BASE_T - 1.0,
    )?;
    let body = union(&base, &pillar, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("fusing shaft holder pillar onto base")?;

    let rod_bore = SolidBuilder::cylinder_y(
        Point3::new(0.0, -depth / 2.0 - CUT_OVERSHOOT, rod_h),
        (rod_d + TOL) / 2.0,
        depth + 2.0 * CUT_OVERSHOOT,
    )?;
    let slit = SolidBuilder::box_centered_xy(
        SLIT_W,
        depth + 2.0 * CUT_OVERSHOOT,
        pillar_top - rod_h + CUT_OVERSHOOT,
        rod_h,
    )?;

    let clamp_shank = SolidBuilder::cylinder_x(
        Point3::new(-pillar_w / 2.0 - CUT_OVERSHOOT, 0.0, clamp_z),
        clamp_bolt.shank_hole_d() / 2.0,
        pillar_w + 2.0 * CUT_OVERSHOOT,
    )?;
    let head_depth = clamp_bolt.head_h + TOL;
    let clamp_head = SolidBuilder::cylinder_x(
        Point3::new(pillar_w / 2.0 - head_depth, 0.0, clamp_z),
        clamp_bolt.head_hole_d() / 2.0,
        head_depth + CUT_OVERSHOOT,
    )?;
    let nut_depth = clamp_bolt.nut_h + TOL + CUT_OVERSHOOT;
    let clamp_nut = SolidBuilder::regular_prism(
        6,
        clamp_bolt.nut_circumradius() + TOL / 2.0,
        nut_depth,
        0.0,
    )?;
    let clamp_nut = translated(
        &rotated_to_x(&clamp_nut),
        Vector3::new(-pillar_w / 2.0 - CUT_OVERSHOOT, 0.0, clamp_z),
    );

    let bolt_x = base_l / 2.0 - base_bolt.head_d / 2.0 - MIN_WALL;
    let base_holes = [
        hole_through_z(base_bolt.shank_hole_d(), -bolt_x, 0.0, 0.0, BASE_T)?,
        hole_through_z(base_bolt.shank_hole_d(), bolt_x, 0.0, 0.0, BASE_T)?,
    ];

    let mut cuts = vec![rod_bore, slit, clamp_shank, clamp_head, clamp_nut];
    cuts.extend(base_holes);
    let solid =
        cut_list(&body, &cuts, DEFAULT_SHAPEOPS_TOLERANCE).context("cutting shaft holder")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("RodD".to_string(), ParameterValue::Number(rod_d));
    parameters.insert("RodH".to_string(), ParameterValue::Number(rod_h));
    parameters.insert("BaseL".to_string(), ParameterValue::Number(base_l));
    parameters.insert("Depth".to_string(), ParameterValue::Number(depth));
    parameters.insert("PillarTop".to_string(), ParameterValue::Number(pillar_top));

    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::Bracket,
        parameters,
        solid,
    )
    .with_hardware(vec![
        BomLine::new(2, format!("bolt M{}x10", base_bolt.metric)),
        BomLine::new(2, format!("t-nut M{}", base_bolt.metric)),
        BomLine::new(
            1,
            format!(
                "bolt M{}x{}",
                clamp_bolt.metric,
                stock_bolt_length(pillar_w)
            ),
        ),
        BomLine::new(1, format!("nut M{}", clamp_bolt.metric)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_rod_height_is_rejected() {
        assert!(shaft_holder(8.0, 5.0, "sh").is_err());
    }
}
