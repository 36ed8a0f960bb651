use crate::slider::{CentralSliderDims, EndSliderDims, Side, central_slider, end_slider};
use crate::{alu_extrusion, belt_clamp, belt_tensioner, cage_cube_block, cage_cube_mount,
    idle_pulley_holder, nema_holder, shaft_holder};
use crate::extrusion::Axis;
use anyhow::{Context, Result};
use cytostage_base::Guid;
use cytostage_catalog::belt_gt2;
use cytostage_model::{
    BomLine, Document, ParameterSet, ParameterValue, PartCategory, PartElement, Placement,
};
use cytostage_topology::{Point3, SolidBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Every dimension the layout scripts are parameterized by. Defaults build
/// the 8 mm-rod, 20 mm-profile stage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub slide_rod_d: f64,
    pub hold_rod_d: f64,
    pub hold_rod_sep: f64,
    /// Distance between the two end-slider centers along X.
    pub stage_span: f64,
    pub profile_side: f64,
    pub frame_len: f64,
    pub frame_width: f64,
    /// Hold-rod axis height above a shaft-holder base.
    pub rod_height: f64,
    pub motor_size: u32,
    pub post_height: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            slide_rod_d: 8.0,
            hold_rod_d: 8.0,
            hold_rod_sep: 60.0,
            stage_span: 300.0,
            profile_side: 20.0,
            frame_len: 420.0,
            frame_width: 320.0,
            rod_height: 25.0,
            motor_size: 17,
            post_height: 200.0,
        }
    }
}

impl StageConfig {
    fn rod_z(&self) -> f64 {
        self.profile_side + self.rod_height
    }

    fn hold_rod_xs(&self) -> [f64; 4] {
        let span = self.stage_span / 2.0;
        let sep = self.hold_rod_sep / 2.0;
        [-span - sep, -span + sep, span - sep, span + sep]
    }
}

/// Frame, shaft holders and hold rods: the static part of the stage.
pub fn base_layout(cfg: &StageConfig) -> Result<Document> {
    let mut doc = Document::new("stage_base");
    populate_base(&mut doc, cfg)?;
    info!(elements = doc.len(), "base layout built");
    Ok(doc)
}

fn populate_base(doc: &mut Document, cfg: &StageConfig) -> Result<()> {
    let side = cfg.profile_side;

    for (label, y) in [("front", -cfg.frame_width / 2.0), ("back", cfg.frame_width / 2.0)] {
        let mut rail = alu_extrusion(side, cfg.frame_len, Axis::X, &format!("rail_{label}"))?;
        rail.place(Placement::at(-cfg.frame_len / 2.0, y, side / 2.0));
        doc.add(rail)?;
    }

    let cross_len = cfg.frame_width - 2.0 * side - 1.0;
    for (label, x) in [
        ("left", -cfg.frame_len / 2.0 + 1.5 * side),
        ("right", cfg.frame_len / 2.0 - 1.5 * side),
    ] {
        let mut cross = alu_extrusion(side, cross_len, Axis::X, &format!("cross_{label}"))?;
        cross.place(Placement::rotated(
            x,
            -cross_len / 2.0,
            side / 2.0,
            std::f64::consts::FRAC_PI_2,
        ));
        doc.add(cross)?;
    }

    let rod_z = cfg.rod_z();
    for (index, x) in cfg.hold_rod_xs().into_iter().enumerate() {
        let mut rod = hold_rod(cfg.hold_rod_d, cfg.frame_width, &format!("hold_rod_{index}"))?;
        rod.place(Placement::at(x, 0.0, rod_z));
        doc.add(rod)?;

        for (label, y) in [("front", -cfg.frame_width / 2.0), ("back", cfg.frame_width / 2.0)] {
            let mut holder = shaft_holder(
                cfg.hold_rod_d,
                cfg.rod_height,
                &format!("shaft_holder_{index}_{label}"),
            )?;
            holder.place(Placement::at(x, y, side));
            doc.add(holder)?;
        }
    }
    Ok(())
}

fn hold_rod(rod_d: f64, length: f64, name: &str) -> Result<PartElement> {
    let solid = SolidBuilder::cylinder_y(
        Point3::new(0.0, -length / 2.0, 0.0),
        rod_d / 2.0,
        length,
    )
    .context("building hold rod")?;
    let mut parameters = ParameterSet::new();
    parameters.insert("RodD".to_string(), ParameterValue::Number(rod_d));
    parameters.insert("Length".to_string(), ParameterValue::Number(length));
    Ok(PartElement::new(
        Guid::new(),
        name,
        PartCategory::Rod,
        parameters,
        solid,
    )
    .with_hardware(vec![BomLine::new(
        1,
        format!("smooth rod d{rod_d:.0} L={length:.0}"),
    )]))
}

/// Optics column: extrusion post, cage-cube mount, cage cube.
pub fn epi_layout(cfg: &StageConfig) -> Result<Document> {
    let mut doc = Document::new("epi_optics");
    let side = cfg.profile_side;

    let mut post = alu_extrusion(side, cfg.post_height, Axis::Z, "optics_post")?;
    post.place(Placement::at(0.0, 0.0, 0.0));
    doc.add(post)?;

    let mount_z = cfg.post_height * 0.5;
    let mut mount = cage_cube_mount(side, "cage_mount")?;
    mount.place(Placement::at(0.0, side / 2.0 + 1.0, mount_z));
    let plate_h = mount
        .number_parameter("PlateH")
        .unwrap_or(cfg.post_height * 0.25);
    doc.add(mount)?;

    let mut cube = cage_cube_block("cage_cube")?;
    let mount_h = mount_z + plate_h;
    cube.place(Placement::at(0.0, side / 2.0 + 30.0, mount_h));
    doc.add(cube)?;

    info!(elements = doc.len(), "epi layout built");
    Ok(doc)
}

/// The full stage: base frame plus slide rod, sliders, drive and optics
/// hardware positions.
pub fn stage_layout(cfg: &StageConfig) -> Result<Document> {
    let mut doc = Document::new("stage_full");
    populate_base(&mut doc, cfg)?;

    let dims = EndSliderDims::derive(cfg.slide_rod_d, cfg.hold_rod_d, cfg.hold_rod_sep)?;
    let central_dims = CentralSliderDims::derive(cfg.slide_rod_d)?;
    let rod_z = cfg.rod_z();
    let slide_z = rod_z - dims.slide2holdrod;
    let span = cfg.stage_span / 2.0;

    let slide_len = cfg.stage_span + dims.length + 20.0;
    let slide_solid = SolidBuilder::cylinder_x(
        Point3::new(-slide_len / 2.0, 0.0, 0.0),
        cfg.slide_rod_d / 2.0,
        slide_len,
    )
    .context("building slide rod")?;
    let mut parameters = ParameterSet::new();
    parameters.insert(
        "RodD".to_string(),
        ParameterValue::Number(cfg.slide_rod_d),
    );
    parameters.insert("Length".to_string(), ParameterValue::Number(slide_len));
    let mut slide_rod = PartElement::new(
        Guid::new(),
        "slide_rod",
        PartCategory::Rod,
        parameters,
        slide_solid,
    )
    .with_hardware(vec![BomLine::new(
        1,
        format!("smooth rod d{:.0} L={slide_len:.0}", cfg.slide_rod_d),
    )]);
    slide_rod.place(Placement::at(0.0, 0.0, slide_z));
    doc.add(slide_rod)?;

    let belt = belt_gt2();
    let mut left = end_slider(
        cfg.slide_rod_d,
        cfg.hold_rod_d,
        cfg.hold_rod_sep,
        Side::Left,
        Some(belt),
        "end_slider_left",
    )?;
    left.set_base_place(Placement::at(-span, 0.0, rod_z));
    doc.add_composite(left)?;

    let mut right = end_slider(
        cfg.slide_rod_d,
        cfg.hold_rod_d,
        cfg.hold_rod_sep,
        Side::Right,
        Some(belt),
        "end_slider_right",
    )?;
    right.set_base_place(Placement::at(span, 0.0, rod_z));
    doc.add_composite(right)?;

    let mut central = central_slider(cfg.slide_rod_d, "central_slider")?;
    central.set_base_place(Placement::at(0.0, 0.0, slide_z));
    doc.add_composite(central)?;

    let mut motor = nema_holder(cfg.motor_size, cfg.profile_side, "motor_holder")?;
    motor.place(Placement::at(
        cfg.frame_len / 2.0 - 60.0,
        -cfg.frame_width / 2.0,
        cfg.profile_side,
    ));
    doc.add(motor)?;

    for (label, x) in [("left", -span - 40.0), ("right", span + 40.0)] {
        let mut idler = idle_pulley_holder(&format!("idler_{label}"))?;
        idler.set_base_place(Placement::at(
            x,
            cfg.frame_width / 2.0 - 40.0,
            cfg.profile_side,
        ));
        doc.add_composite(idler)?;
    }

    let clamp_y = central_dims.width / 2.0 + 10.0;
    for (label, x) in [("left", -40.0), ("right", 40.0)] {
        let mut clamp = belt_clamp(&format!("belt_clamp_{label}"))?;
        clamp.place(Placement::at(x, clamp_y, slide_z));
        doc.add(clamp)?;
    }

    let mut tensioner = belt_tensioner("belt_tensioner")?;
    tensioner.place(Placement::at(
        span - 60.0,
        cfg.frame_width / 2.0 - 20.0,
        cfg.profile_side,
    ));
    doc.add(tensioner)?;

    info!(elements = doc.len(), "stage layout built");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_rods_straddle_each_end_slider() {
        let cfg = StageConfig::default();
        let xs = cfg.hold_rod_xs();
        assert_eq!(xs.len(), 4);
        assert!((xs[1] - xs[0] - cfg.hold_rod_sep).abs() < 1.0e-12);
        assert!((xs[3] - xs[2] - cfg.hold_rod_sep).abs() < 1.0e-12);
        let left_center = (xs[0] + xs[1]) / 2.0;
        assert!((left_center + cfg.stage_span / 2.0).abs() < 1.0e-12);
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = StageConfig::default();
        let text = serde_json::to_string(&cfg).unwrap();
        let back: StageConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.stage_span, cfg.stage_span);
        assert_eq!(back.motor_size, cfg.motor_size);

        let sparse: StageConfig = serde_json::from_str(r#"{"stage_span": 200.0}"#).unwrap();
        assert_eq!(sparse.stage_span, 200.0);
        assert_eq!(sparse.slide_rod_d, cfg.slide_rod_d);
    }
}
