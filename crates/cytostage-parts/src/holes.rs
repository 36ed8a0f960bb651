use anyhow::{Context, Result};
use cytostage_catalog::{Bolt, LinearBearing, TOL, TIGHT_TOL};
use cytostage_shapeops::{
    CUT_OVERSHOOT, DEFAULT_SHAPEOPS_TOLERANCE, difference, stadium_slot,
};
use cytostage_topology::{Point3, Solid, SolidBuilder, Vector3, translated};
use truck_modeling::{Rad, builder};

/// The three cavities a vertical clamp bolt needs: shank channel through the
/// whole stack, head pocket sunk from the top face, hex nut pocket sunk from
/// the bottom face. Built on the Z axis at x = y = 0; position with
/// [`clone_at`].
pub struct VerticalBoltCuts {
    pub shank: Solid,
    pub head_pocket: Solid,
    pub nut_pocket: Solid,
}

pub fn vertical_bolt_cuts(bolt: &Bolt, z_bottom: f64, z_top: f64) -> Result<VerticalBoltCuts> {
    let shank = SolidBuilder::cylinder_z(
        Point3::new(0.0, 0.0, z_bottom - CUT_OVERSHOOT),
        bolt.shank_hole_d() / 2.0,
        (z_top - z_bottom) + 2.0 * CUT_OVERSHOOT,
    )
    .context("bolt shank channel")?;

    let head_depth = bolt.head_h + TOL;
    let head_pocket = SolidBuilder::cylinder_z(
        Point3::new(0.0, 0.0, z_top - head_depth),
        bolt.head_hole_d() / 2.0,
        head_depth + CUT_OVERSHOOT,
    )
    .context("bolt head pocket")?;

    let nut_depth = bolt.nut_h + TOL;
    let nut_pocket = SolidBuilder::regular_prism(
        6,
        bolt.nut_circumradius() + TOL / 2.0,
        nut_depth + CUT_OVERSHOOT,
        z_bottom - CUT_OVERSHOOT,
    )
    .context("nut pocket")?;

    Ok(VerticalBoltCuts {
        shank,
        head_pocket,
        nut_pocket,
    })
}

/// Duplicate a reference shape at each XY offset. The clones stay
/// geometrically identical to the source, only the placement differs.
pub fn clone_at(reference: &Solid, positions: &[(f64, f64)]) -> Vec<Solid> {
    positions
        .iter()
        .map(|(x, y)| translated(reference, Vector3::new(*x, *y, 0.0)))
        .collect()
}

/// Through-channel for a smooth rod along X, spanning the whole `length` of
/// the part plus overshoot.
pub fn rod_channel_x(rod_d: f64, y: f64, z: f64, length: f64) -> Result<Solid> {
    SolidBuilder::cylinder_x(
        Point3::new(-length / 2.0 - CUT_OVERSHOOT, y, z),
        (rod_d + TIGHT_TOL) / 2.0,
        length + 2.0 * CUT_OVERSHOOT,
    )
    .context("rod channel")
}

/// Through-channel for a smooth rod along Y.
pub fn rod_channel_y(rod_d: f64, x: f64, z: f64, width: f64) -> Result<Solid> {
    SolidBuilder::cylinder_y(
        Point3::new(x, -width / 2.0 - CUT_OVERSHOOT, z),
        (rod_d + TIGHT_TOL) / 2.0,
        width + 2.0 * CUT_OVERSHOOT,
    )
    .context("rod channel")
}

/// Pocket for a linear bearing with its axis along X, centered at `x_center`.
pub fn bearing_pocket_x(bearing: &LinearBearing, x_center: f64, y: f64, z: f64) -> Result<Solid> {
    let len = bearing.length + TOL;
    SolidBuilder::cylinder_x(
        Point3::new(x_center - len / 2.0, y, z),
        (bearing.out_d + TOL) / 2.0,
        len,
    )
    .context("bearing pocket")
}

/// Pocket for a linear bearing with its axis along Y, centered at `y_center`.
pub fn bearing_pocket_y(bearing: &LinearBearing, x: f64, y_center: f64, z: f64) -> Result<Solid> {
    let len = bearing.length + TOL;
    SolidBuilder::cylinder_y(
        Point3::new(x, y_center - len / 2.0, z),
        (bearing.out_d + TOL) / 2.0,
        len,
    )
    .context("bearing pocket")
}

/// Slotted hole pierced through the part along Y, long axis vertical (Z).
/// `width` is the hole diameter, `slot_len` the center-to-center end
/// distance, `thickness` the pierced material.
pub fn slot_through_y(
    width: f64,
    slot_len: f64,
    x: f64,
    z_center: f64,
    thickness: f64,
) -> Result<Solid> {
    let through = thickness + 2.0 * CUT_OVERSHOOT;
    let slot = stadium_slot(
        width,
        slot_len,
        through,
        -through / 2.0,
        DEFAULT_SHAPEOPS_TOLERANCE,
    )?;
    // stand the slot upright (long axis Z), then point it through Y
    let slot = builder::rotated(
        &slot,
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
        Rad(-std::f64::consts::FRAC_PI_2),
    );
    let slot = builder::rotated(
        &slot,
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_z(),
        Rad(std::f64::consts::FRAC_PI_2),
    );
    Ok(translated(&slot, Vector3::new(x, 0.0, z_center)))
}

/// Plain circular hole through the part along Y.
pub fn hole_through_y(hole_d: f64, x: f64, z: f64, thickness: f64) -> Result<Solid> {
    SolidBuilder::cylinder_y(
        Point3::new(x, -thickness / 2.0 - CUT_OVERSHOOT, z),
        hole_d / 2.0,
        thickness + 2.0 * CUT_OVERSHOOT,
    )
    .context("through hole")
}

/// Plain circular hole through the part along Z.
pub fn hole_through_z(hole_d: f64, x: f64, y: f64, z_min: f64, height: f64) -> Result<Solid> {
    SolidBuilder::cylinder_z(
        Point3::new(x, y, z_min - CUT_OVERSHOOT),
        hole_d / 2.0,
        height + 2.0 * CUT_OVERSHOOT,
    )
    .context("through hole")
}

/// Ring solid for bearing and washer stand-ins: outer cylinder minus bore.
pub fn tube_z(out_d: f64, bore_d: f64, height: f64) -> Result<Solid> {
    let outer = SolidBuilder::cylinder_z(Point3::new(0.0, 0.0, 0.0), out_d / 2.0, height)?;
    let bore = SolidBuilder::cylinder_z(
        Point3::new(0.0, 0.0, -CUT_OVERSHOOT),
        bore_d / 2.0,
        height + 2.0 * CUT_OVERSHOOT,
    )?;
    Ok(difference(&outer, &bore, DEFAULT_SHAPEOPS_TOLERANCE)?)
}

/// Rotate a Z-built solid so its axis lies along +X.
pub fn rotated_to_x(solid: &Solid) -> Solid {
    builder::rotated(
        solid,
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
        Rad(std::f64::consts::FRAC_PI_2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_are_congruent_with_their_source() {
        let reference =
            SolidBuilder::cylinder_z(Point3::new(0.0, 0.0, 0.0), 2.0, 30.0).unwrap();
        let clones = clone_at(&reference, &[(10.0, 5.0), (-10.0, -5.0)]);
        assert_eq!(clones.len(), 2);
        for clone in &clones {
            assert_eq!(
                clone.face_iter().count(),
                reference.face_iter().count()
            );
        }
    }

    #[test]
    fn bolt_cuts_cover_the_clamp_stack() {
        let bolt = cytostage_catalog::bolt(4).unwrap();
        let cuts = vertical_bolt_cuts(bolt, -12.0, 12.0).unwrap();
        assert!(cuts.shank.face_iter().count() > 0);
        assert!(cuts.head_pocket.face_iter().count() > 0);
        // hex pocket: 6 sides + top + bottom
        assert_eq!(cuts.nut_pocket.face_iter().count(), 8);
    }
}
