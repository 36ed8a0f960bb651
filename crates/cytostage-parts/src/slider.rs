use crate::holes::{
    bearing_pocket_x, bearing_pocket_y, clone_at, rod_channel_x, rod_channel_y, tube_z,
    vertical_bolt_cuts,
};
use crate::{BEARING_WALL, BELT_CLAMP_SPAN, MIN_WALL};
use anyhow::{Context, Result, bail};
use cytostage_base::Guid;
use cytostage_catalog::{
    Belt, Bolt, LinearBearing, TOL, belt_gt2, bolt, linear_bearing_for_rod, stock_bolt_length,
};
use cytostage_model::{
    BomLine, CompositePart, ParameterSet, ParameterValue, PartCategory, PartElement, Placement,
};
use cytostage_shapeops::{CUT_OVERSHOOT, DEFAULT_SHAPEOPS_TOLERANCE, cut_list};
use cytostage_topology::{Point3, Solid, SolidBuilder, Vector3, translated};
use tracing::debug;
use truck_modeling::{Rad, builder};

/// Which X face of an end slider carries the belt-clamp cavity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(&self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Derived dimensions of an end-shaft slider: the block that rides a pair of
/// hold rods and carries one end of the slide rod. All values are fixed at
/// derivation time.
#[derive(Clone, Copy, Debug)]
pub struct EndSliderDims {
    pub slide_rod_d: f64,
    pub hold_rod_d: f64,
    pub hold_rod_sep: f64,
    pub bearing: &'static LinearBearing,
    pub bolt: &'static Bolt,
    /// Envelope minimum from hold-rod span plus clamp-bolt room.
    pub len_from_holdrod_sep: f64,
    /// Envelope minimum from the bearing pockets plus wall.
    pub len_from_bearing: f64,
    pub length: f64,
    pub width: f64,
    pub part_height: f64,
    /// Vertical distance between the slide-rod axis and the hold-rod plane.
    pub slide2holdrod: f64,
    pub holdrod2end: f64,
    pub bolt_x: f64,
    pub bolt_y: f64,
}

impl EndSliderDims {
    pub fn derive(slide_rod_d: f64, hold_rod_d: f64, hold_rod_sep: f64) -> Result<Self> {
        if slide_rod_d <= 0.0 || hold_rod_d <= 0.0 || hold_rod_sep <= 0.0 {
            bail!("rod dimensions must be > 0");
        }
        let bearing = linear_bearing_for_rod(hold_rod_d)
            .with_context(|| format!("no linear bearing for rod diameter {hold_rod_d}"))?;
        let metric = if hold_rod_d >= 10.0 { 4 } else { 3 };
        let bolt = bolt(metric).context("clamp bolt size missing from catalog")?;

        // The block must be long enough for the rods plus bolt room outboard,
        // and long enough for the bearing pockets plus wall. Whichever is
        // larger wins.
        let len_from_holdrod_sep =
            hold_rod_sep + hold_rod_d + 2.0 * (bolt.shank_d + 2.0 * MIN_WALL);
        let len_from_bearing = hold_rod_sep + bearing.out_d + 2.0 * BEARING_WALL;
        let length = len_from_holdrod_sep.max(len_from_bearing);
        let holdrod2end = (length - hold_rod_sep) / 2.0;

        let w_from_bearing = bearing.length + 2.0 * BEARING_WALL;
        let w_from_belt = BELT_CLAMP_SPAN + 2.0 * MIN_WALL;
        let width = w_from_bearing.max(w_from_belt);

        let slide2holdrod = bearing.out_d / 2.0 + slide_rod_d / 2.0 + MIN_WALL;
        let part_height = (bearing.out_d / 2.0 + MIN_WALL)
            .max(slide2holdrod + slide_rod_d / 2.0 + MIN_WALL);

        let bolt_x = hold_rod_sep / 2.0 - bearing.out_d / 2.0 - MIN_WALL - bolt.shank_d / 2.0;
        if bolt_x < bolt.shank_d {
            bail!(
                "hold rod separation {hold_rod_sep} leaves no room for clamp bolts \
                 between the bearing pockets"
            );
        }
        let bolt_y = width / 2.0 - MIN_WALL - bolt.shank_d / 2.0;
        if bolt_y - bolt.shank_hole_d() / 2.0 < slide_rod_d / 2.0 + MIN_WALL {
            bail!("slider width {width} cannot contain its clamp bolts");
        }

        let dims = Self {
            slide_rod_d,
            hold_rod_d,
            hold_rod_sep,
            bearing,
            bolt,
            len_from_holdrod_sep,
            len_from_bearing,
            length,
            width,
            part_height,
            slide2holdrod,
            holdrod2end,
            bolt_x,
            bolt_y,
        };
        debug!(
            length = dims.length,
            width = dims.width,
            part_height = dims.part_height,
            "derived end slider dimensions"
        );
        Ok(dims)
    }

    fn parameters(&self) -> ParameterSet {
        let mut parameters = ParameterSet::new();
        parameters.insert(
            "SlideRodD".to_string(),
            ParameterValue::Number(self.slide_rod_d),
        );
        parameters.insert(
            "HoldRodD".to_string(),
            ParameterValue::Number(self.hold_rod_d),
        );
        parameters.insert(
            "HoldRodSep".to_string(),
            ParameterValue::Number(self.hold_rod_sep),
        );
        parameters.insert("Length".to_string(), ParameterValue::Number(self.length));
        parameters.insert("Width".to_string(), ParameterValue::Number(self.width));
        parameters.insert(
            "PartHeight".to_string(),
            ParameterValue::Number(self.part_height),
        );
        parameters.insert(
            "Slide2HoldRod".to_string(),
            ParameterValue::Number(self.slide2holdrod),
        );
        parameters.insert(
            "HoldRod2End".to_string(),
            ParameterValue::Number(self.holdrod2end),
        );
        parameters.insert(
            "Bearing".to_string(),
            ParameterValue::Text(self.bearing.code.to_string()),
        );
        parameters
    }
}

/// Build an end-shaft slider as a composite: clamping top and bottom halves
/// plus the two hold-rod bearings. The composite is built around the local
/// origin, hold rods along Y at the parting plane. With `belt` set to `None`
/// the clamp cavity is simply left out of the cut lists.
pub fn end_slider(
    slide_rod_d: f64,
    hold_rod_d: f64,
    hold_rod_sep: f64,
    side: Side,
    belt: Option<Belt>,
    name: &str,
) -> Result<CompositePart> {
    let dims = EndSliderDims::derive(slide_rod_d, hold_rod_d, hold_rod_sep)?;

    let rod_positions = [(-hold_rod_sep / 2.0, 0.0), (hold_rod_sep / 2.0, 0.0)];
    let rod_ref = rod_channel_y(hold_rod_d, 0.0, 0.0, dims.width)?;
    let rod_channels = clone_at(&rod_ref, &rod_positions);
    let pocket_ref = bearing_pocket_y(dims.bearing, 0.0, 0.0, 0.0)?;
    let pockets = clone_at(&pocket_ref, &rod_positions);

    let slide_channel = rod_channel_x(slide_rod_d, 0.0, -dims.slide2holdrod, dims.length)?;

    let bolt_positions = [
        (-dims.bolt_x, -dims.bolt_y),
        (-dims.bolt_x, dims.bolt_y),
        (dims.bolt_x, -dims.bolt_y),
        (dims.bolt_x, dims.bolt_y),
    ];
    let bolt_ref = vertical_bolt_cuts(dims.bolt, -dims.part_height, dims.part_height)?;
    let shanks = clone_at(&bolt_ref.shank, &bolt_positions);
    let heads = clone_at(&bolt_ref.head_pocket, &bolt_positions);
    let nuts = clone_at(&bolt_ref.nut_pocket, &bolt_positions);

    let has_belt = belt.is_some();
    let belt_slot = match belt {
        Some(belt) => {
            let slot_h = belt.width + TOL;
            let slot = SolidBuilder::box_centered_xy(
                belt.thickness + TOL,
                dims.width + 2.0 * CUT_OVERSHOOT,
                slot_h,
                -slot_h / 2.0,
            )?;
            Some(translated(
                &slot,
                Vector3::new(
                    side.sign() * (dims.length / 2.0 - MIN_WALL - belt.thickness / 2.0),
                    0.0,
                    0.0,
                ),
            ))
        }
        None => None,
    };

    let mut bottom_cuts = Vec::new();
    bottom_cuts.extend(rod_channels.iter().cloned());
    bottom_cuts.extend(pockets.iter().cloned());
    bottom_cuts.push(slide_channel);
    bottom_cuts.extend(shanks.iter().cloned());
    bottom_cuts.extend(nuts);
    bottom_cuts.extend(belt_slot.iter().cloned());

    let mut top_cuts = Vec::new();
    top_cuts.extend(rod_channels);
    top_cuts.extend(pockets);
    top_cuts.extend(shanks);
    top_cuts.extend(heads);
    top_cuts.extend(belt_slot);

    let bottom_env =
        SolidBuilder::box_centered_xy(dims.length, dims.width, dims.part_height, -dims.part_height)?;
    let top_env = SolidBuilder::box_centered_xy(dims.length, dims.width, dims.part_height, 0.0)?;
    let bottom_solid = cut_list(&bottom_env, &bottom_cuts, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("cutting end slider bottom half")?;
    let top_solid = cut_list(&top_env, &top_cuts, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("cutting end slider top half")?;

    let bolt_len = stock_bolt_length(2.0 * dims.part_height);
    let mut parameters = dims.parameters();
    parameters.insert(
        "Side".to_string(),
        ParameterValue::Text(side.label().to_string()),
    );
    parameters.insert("BeltSlot".to_string(), ParameterValue::Bool(has_belt));

    let bottom = PartElement::new(
        Guid::new(),
        format!("{name}_bottom"),
        PartCategory::Slider,
        parameters.clone(),
        bottom_solid,
    )
    .with_hardware(vec![
        BomLine::new(4, format!("bolt M{}x{}", dims.bolt.metric, bolt_len)),
        BomLine::new(4, format!("nut M{}", dims.bolt.metric)),
    ]);
    let top = PartElement::new(
        Guid::new(),
        format!("{name}_top"),
        PartCategory::Slider,
        parameters,
        top_solid,
    );

    let mut composite = CompositePart::new(name);
    composite.push(bottom, Placement::identity());
    composite.push(top, Placement::identity());
    for (index, (x, _)) in rod_positions.iter().enumerate() {
        let tube = bearing_tube_y(dims.bearing)?;
        let mut parameters = ParameterSet::new();
        parameters.insert(
            "Bearing".to_string(),
            ParameterValue::Text(dims.bearing.code.to_string()),
        );
        let element = PartElement::new(
            Guid::new(),
            format!("{name}_bearing_{index}"),
            PartCategory::Hardware,
            parameters,
            tube,
        )
        .with_hardware(vec![BomLine::new(
            1,
            format!("linear bearing {}", dims.bearing.code),
        )]);
        composite.push(element, Placement::at(*x, 0.0, 0.0));
    }
    Ok(composite)
}

/// Derived dimensions of the central slider: the carriage that rides the
/// slide rod on two linear bearings and grips the drive belt on both sides.
#[derive(Clone, Copy, Debug)]
pub struct CentralSliderDims {
    pub slide_rod_d: f64,
    pub bearing: &'static LinearBearing,
    pub bolt: &'static Bolt,
    /// Envelope minimum from the twin bearing pockets.
    pub len_from_bearing: f64,
    /// Envelope minimum from the two belt-clamp cavities.
    pub len_from_belt: f64,
    pub length: f64,
    pub width: f64,
    pub part_height: f64,
    pub bearing_x: f64,
    pub bolt_x: f64,
    pub bolt_y: f64,
    pub belt_slot_y: f64,
}

impl CentralSliderDims {
    pub fn derive(slide_rod_d: f64) -> Result<Self> {
        if slide_rod_d <= 0.0 {
            bail!("rod diameter must be > 0");
        }
        let bearing = linear_bearing_for_rod(slide_rod_d)
            .with_context(|| format!("no linear bearing for rod diameter {slide_rod_d}"))?;
        let bolt = bolt(3).context("clamp bolt size missing from catalog")?;
        let belt = belt_gt2();

        let len_from_bearing = 2.0 * bearing.length + 3.0 * MIN_WALL;
        let len_from_belt = 2.0 * BELT_CLAMP_SPAN + 2.0 * MIN_WALL;
        let length = len_from_bearing.max(len_from_belt);

        // From the rod axis outward: bearing wall, clamp bolt, belt slot,
        // and a thin outer skin.
        let width = bearing.out_d
            + 2.0 * (2.0 * MIN_WALL + bolt.shank_d + belt.thickness + 2.0);
        let part_height =
            (bearing.out_d / 2.0 + MIN_WALL).max(bolt.head_h + 2.0 * MIN_WALL);

        let bearing_x = (bearing.length + MIN_WALL) / 2.0;
        let bolt_x = length / 2.0 - MIN_WALL - bolt.shank_d / 2.0;
        let bolt_y = bearing.out_d / 2.0 + MIN_WALL + bolt.shank_d / 2.0;
        let belt_slot_y = width / 2.0 - 2.0 - belt.thickness / 2.0;

        let dims = Self {
            slide_rod_d,
            bearing,
            bolt,
            len_from_bearing,
            len_from_belt,
            length,
            width,
            part_height,
            bearing_x,
            bolt_x,
            bolt_y,
            belt_slot_y,
        };
        debug!(
            length = dims.length,
            width = dims.width,
            part_height = dims.part_height,
            "derived central slider dimensions"
        );
        Ok(dims)
    }

    fn parameters(&self) -> ParameterSet {
        let mut parameters = ParameterSet::new();
        parameters.insert(
            "SlideRodD".to_string(),
            ParameterValue::Number(self.slide_rod_d),
        );
        parameters.insert("Length".to_string(), ParameterValue::Number(self.length));
        parameters.insert("Width".to_string(), ParameterValue::Number(self.width));
        parameters.insert(
            "PartHeight".to_string(),
            ParameterValue::Number(self.part_height),
        );
        parameters.insert(
            "Bearing".to_string(),
            ParameterValue::Text(self.bearing.code.to_string()),
        );
        parameters
    }
}

/// Build the central slider composite: clamping halves plus two slide-rod
/// bearings, rod axis along X at the parting plane.
pub fn central_slider(slide_rod_d: f64, name: &str) -> Result<CompositePart> {
    let dims = CentralSliderDims::derive(slide_rod_d)?;
    let belt = belt_gt2();

    let rod_channel = rod_channel_x(slide_rod_d, 0.0, 0.0, dims.length)?;
    let pocket_ref = bearing_pocket_x(dims.bearing, 0.0, 0.0, 0.0)?;
    let pockets = clone_at(&pocket_ref, &[(-dims.bearing_x, 0.0), (dims.bearing_x, 0.0)]);

    let bolt_positions = [
        (-dims.bolt_x, -dims.bolt_y),
        (-dims.bolt_x, dims.bolt_y),
        (dims.bolt_x, -dims.bolt_y),
        (dims.bolt_x, dims.bolt_y),
    ];
    let bolt_ref = vertical_bolt_cuts(dims.bolt, -dims.part_height, dims.part_height)?;
    let shanks = clone_at(&bolt_ref.shank, &bolt_positions);
    let heads = clone_at(&bolt_ref.head_pocket, &bolt_positions);
    let nuts = clone_at(&bolt_ref.nut_pocket, &bolt_positions);

    let slot_h = belt.width + TOL;
    let slot_ref = SolidBuilder::box_centered_xy(
        dims.length + 2.0 * CUT_OVERSHOOT,
        belt.thickness + TOL,
        slot_h,
        -slot_h / 2.0,
    )?;
    let belt_slots = clone_at(&slot_ref, &[(0.0, -dims.belt_slot_y), (0.0, dims.belt_slot_y)]);

    let mut bottom_cuts = Vec::new();
    bottom_cuts.push(rod_channel.clone());
    bottom_cuts.extend(pockets.iter().cloned());
    bottom_cuts.extend(shanks.iter().cloned());
    bottom_cuts.extend(nuts);
    bottom_cuts.extend(belt_slots.iter().cloned());

    let mut top_cuts = Vec::new();
    top_cuts.push(rod_channel);
    top_cuts.extend(pockets);
    top_cuts.extend(shanks);
    top_cuts.extend(heads);
    top_cuts.extend(belt_slots);

    let bottom_env =
        SolidBuilder::box_centered_xy(dims.length, dims.width, dims.part_height, -dims.part_height)?;
    let top_env = SolidBuilder::box_centered_xy(dims.length, dims.width, dims.part_height, 0.0)?;
    let bottom_solid = cut_list(&bottom_env, &bottom_cuts, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("cutting central slider bottom half")?;
    let top_solid = cut_list(&top_env, &top_cuts, DEFAULT_SHAPEOPS_TOLERANCE)
        .context("cutting central slider top half")?;

    let bolt_len = stock_bolt_length(2.0 * dims.part_height);
    let parameters = dims.parameters();
    let bottom = PartElement::new(
        Guid::new(),
        format!("{name}_bottom"),
        PartCategory::Slider,
        parameters.clone(),
        bottom_solid,
    )
    .with_hardware(vec![
        BomLine::new(4, format!("bolt M{}x{}", dims.bolt.metric, bolt_len)),
        BomLine::new(4, format!("nut M{}", dims.bolt.metric)),
    ]);
    let top = PartElement::new(
        Guid::new(),
        format!("{name}_top"),
        PartCategory::Slider,
        parameters,
        top_solid,
    );

    let mut composite = CompositePart::new(name);
    composite.push(bottom, Placement::identity());
    composite.push(top, Placement::identity());
    for (index, x) in [-dims.bearing_x, dims.bearing_x].iter().enumerate() {
        let tube = bearing_tube_x(dims.bearing)?;
        let mut parameters = ParameterSet::new();
        parameters.insert(
            "Bearing".to_string(),
            ParameterValue::Text(dims.bearing.code.to_string()),
        );
        let element = PartElement::new(
            Guid::new(),
            format!("{name}_bearing_{index}"),
            PartCategory::Hardware,
            parameters,
            tube,
        )
        .with_hardware(vec![BomLine::new(
            1,
            format!("linear bearing {}", dims.bearing.code),
        )]);
        composite.push(element, Placement::at(*x, 0.0, 0.0));
    }
    Ok(composite)
}

fn bearing_tube_y(bearing: &LinearBearing) -> Result<Solid> {
    let tube = tube_z(bearing.out_d, bearing.rod_d, bearing.length)?;
    let tube = builder::rotated(
        &tube,
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_x(),
        Rad(-std::f64::consts::FRAC_PI_2),
    );
    Ok(translated(
        &tube,
        Vector3::new(0.0, -bearing.length / 2.0, 0.0),
    ))
}

fn bearing_tube_x(bearing: &LinearBearing) -> Result<Solid> {
    let tube = tube_z(bearing.out_d, bearing.rod_d, bearing.length)?;
    let tube = builder::rotated(
        &tube,
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
        Rad(std::f64::consts::FRAC_PI_2),
    );
    Ok(translated(
        &tube,
        Vector3::new(-bearing.length / 2.0, 0.0, 0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_slider_length_covers_both_envelopes() {
        for rod_d in [6.0, 8.0, 10.0, 12.0] {
            let dims = EndSliderDims::derive(8.0, rod_d, 60.0).unwrap();
            assert!(dims.length >= dims.len_from_holdrod_sep);
            assert!(dims.length >= dims.len_from_bearing);
            assert_eq!(
                dims.length,
                dims.len_from_holdrod_sep.max(dims.len_from_bearing)
            );
            assert!((dims.holdrod2end - (dims.length - dims.hold_rod_sep) / 2.0).abs() < 1.0e-12);
        }
    }

    #[test]
    fn end_slider_bottom_half_contains_the_slide_channel() {
        let dims = EndSliderDims::derive(8.0, 8.0, 60.0).unwrap();
        assert!(dims.part_height >= dims.slide2holdrod + dims.slide_rod_d / 2.0 + MIN_WALL);
    }

    #[test]
    fn cramped_hold_rod_separation_is_rejected() {
        assert!(EndSliderDims::derive(8.0, 8.0, 20.0).is_err());
        assert!(EndSliderDims::derive(8.0, 8.0, 0.0).is_err());
        assert!(EndSliderDims::derive(8.0, 7.0, 60.0).is_err());
    }

    #[test]
    fn central_slider_length_covers_both_envelopes() {
        for rod_d in [6.0, 8.0, 10.0, 12.0] {
            let dims = CentralSliderDims::derive(rod_d).unwrap();
            assert!(dims.length >= dims.len_from_bearing);
            assert!(dims.length >= dims.len_from_belt);
            assert_eq!(dims.length, dims.len_from_bearing.max(dims.len_from_belt));
        }
    }

    #[test]
    fn central_slider_belt_slots_clear_the_clamp_bolts() {
        let dims = CentralSliderDims::derive(8.0).unwrap();
        let belt = belt_gt2();
        let slot_inner = dims.belt_slot_y - (belt.thickness + TOL) / 2.0;
        let bolt_outer = dims.bolt_y + dims.bolt.head_hole_d() / 2.0;
        assert!(slot_inner > bolt_outer);
    }

    #[test]
    fn either_envelope_can_drive_the_central_length() {
        // LM6UU is short enough that the belt-clamp span drives the length.
        let dims = CentralSliderDims::derive(6.0).unwrap();
        assert!(dims.len_from_belt > dims.len_from_bearing);
        assert_eq!(dims.length, dims.len_from_belt);
        // LM12UU is long enough that the bearings drive it.
        let dims = CentralSliderDims::derive(12.0).unwrap();
        assert!(dims.len_from_bearing > dims.len_from_belt);
        assert_eq!(dims.length, dims.len_from_bearing);
    }
}
