use crate::holes::{bearing_pocket_x, clone_at, rod_channel_x, vertical_bolt_cuts};
use crate::MIN_WALL;
use anyhow::{Context, Result, bail};
use cytostage_base::Guid;
use cytostage_catalog::{Bolt, LinearBearing, bolt, linear_bearing_for_rod, stock_bolt_length};
use cytostage_model::{
    BomLine, CompositePart, ParameterSet, ParameterValue, PartCategory, PartElement, Placement,
};
use cytostage_shapeops::{DEFAULT_SHAPEOPS_TOLERANCE, cut_list};
use cytostage_topology::SolidBuilder;
use tracing::debug;

/// Thin linear-bearing housing: a base and a cap clamping one bearing, rod
/// axis along X at the parting plane.
#[derive(Clone, Copy, Debug)]
pub struct BearingHouseDims {
    pub rod_d: f64,
    pub bearing: &'static LinearBearing,
    pub bolt: &'static Bolt,
    /// Bolt-separation minimum from the bearing envelope.
    pub sep_from_bearing: f64,
    /// Bolt-separation minimum from the rod bore plus wall.
    pub sep_from_rod: f64,
    pub bolt_sep: f64,
    pub length: f64,
    pub width: f64,
    pub part_height: f64,
}

impl BearingHouseDims {
    pub fn derive(rod_d: f64) -> Result<Self> {
        if rod_d <= 0.0 {
            bail!("rod diameter must be > 0");
        }
        let bearing = linear_bearing_for_rod(rod_d)
            .with_context(|| format!("no linear bearing for rod diameter {rod_d}"))?;
        let metric = if rod_d >= 10.0 { 4 } else { 3 };
        let bolt = bolt(metric).context("housing bolt size missing from catalog")?;

        let sep_from_bearing = bearing.out_d + 2.0 * MIN_WALL + bolt.shank_d;
        let sep_from_rod = rod_d + 4.0 * MIN_WALL + bolt.shank_d;
        let bolt_sep = sep_from_bearing.max(sep_from_rod);

        let length = (bearing.length + 2.0 * MIN_WALL).max(bolt.head_d + 4.0 * MIN_WALL);
        let width = bolt_sep + bolt.head_d + 2.0 * MIN_WALL;
        let part_height = bearing.out_d / 2.0 + MIN_WALL;

        let dims = Self {
            rod_d,
            bearing,
            bolt,
            sep_from_bearing,
            sep_from_rod,
            bolt_sep,
            length,
            width,
            part_height,
        };
        debug!(
            bolt_sep = dims.bolt_sep,
            length = dims.length,
            "derived bearing house dimensions"
        );
        Ok(dims)
    }
}

pub fn bearing_house(rod_d: f64, name: &str) -> Result<CompositePart> {
    let dims = BearingHouseDims::derive(rod_d)?;

    let rod_channel = rod_channel_x(rod_d, 0.0, 0.0, dims.length)?;
    let pocket = bearing_pocket_x(dims.bearing, 0.0, 0.0, 0.0)?;

    let bolt_positions = [(0.0, -dims.bolt_sep / 2.0), (0.0, dims.bolt_sep / 2.0)];
    let bolt_ref = vertical_bolt_cuts(dims.bolt, -dims.part_height, dims.part_height)?;
    let shanks = clone_at(&bolt_ref.shank, &bolt_positions);
    let heads = clone_at(&bolt_ref.head_pocket, &bolt_positions);
    let nuts = clone_at(&bolt_ref.nut_pocket, &bolt_positions);

    let mut base_cuts = vec![rod_channel.clone(), pocket.clone()];
    base_cuts.extend(shanks.iter().cloned());
    base_cuts.extend(nuts);

    let mut cap_cuts = vec![rod_channel, pocket];
    cap_cuts.extend(shanks);
    cap_cuts.extend(heads);

    let base_env =
        SolidBuilder::box_centered_xy(dims.length, dims.width, dims.part_height, -dims.part_height)?;
    let cap_env = SolidBuilder::box_centered_xy(dims.length, dims.width, dims.part_height, 0.0)?;
    let base_solid = cut_list(&base_env, &base_cuts, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("cutting bearing house base")?;
    let cap_solid = cut_list(&cap_env, &cap_cuts, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("cutting bearing house cap")?;

    let mut parameters = ParameterSet::new();
    parameters.insert("RodD".to_string(), ParameterValue::Number(dims.rod_d));
    parameters.insert("BoltSep".to_string(), ParameterValue::Number(dims.bolt_sep));
    parameters.insert("Length".to_string(), ParameterValue::Number(dims.length));
    parameters.insert("Width".to_string(), ParameterValue::Number(dims.width));
    parameters.insert(
        "PartHeight".to_string(),
        ParameterValue::Number(dims.part_height),
    );
    parameters.insert(
        "Bearing".to_string(),
        ParameterValue::Text(dims.bearing.code.to_string()),
    );

    let base = PartElement::new(
        Guid::new(),
        format!("{name}_base"),
        PartCategory::Housing,
        parameters.clone(),
        base_solid,
    )
    .with_hardware(vec![
        BomLine::new(
            2,
            format!(
                "bolt M{}x{}",
                dims.bolt.metric,
                stock_bolt_length(2.0 * dims.part_height)
            ),
        ),
        BomLine::new(2, format!("nut M{}", dims.bolt.metric)),
        BomLine::new(1, format!("linear bearing {}", dims.bearing.code)),
    ]);
    let cap = PartElement::new(
        Guid::new(),
        format!("{name}_cap"),
        PartCategory::Housing,
        parameters,
        cap_solid,
    );

    let mut composite = CompositePart::new(name);
    composite.push(base, Placement::identity());
    composite.push(cap, Placement::identity());
    Ok(composite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bolt_separation_covers_both_envelopes() {
        for rod_d in [6.0, 8.0, 10.0, 12.0] {
            let dims = BearingHouseDims::derive(rod_d).unwrap();
            assert!(dims.bolt_sep >= dims.sep_from_bearing);
            assert!(dims.bolt_sep >= dims.sep_from_rod);
            assert_eq!(dims.bolt_sep, dims.sep_from_bearing.max(dims.sep_from_rod));
            assert!(dims.length >= dims.bearing.length + 2.0 * MIN_WALL);
        }
    }

    #[test]
    fn unknown_rod_is_rejected() {
        assert!(BearingHouseDims::derive(9.0).is_err());
    }
}
