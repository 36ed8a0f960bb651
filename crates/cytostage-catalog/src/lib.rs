use cytostage_base::LengthUnit;
use serde::{Deserialize, Serialize};

/// Clearance added to cavities that receive a printed-against part.
pub const TOL: f64 = 0.4;
/// Clearance for metal parts pressed or slid into printed bores.
pub const TIGHT_TOL: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    pub metric: u32,
    pub shank_d: f64,
    pub head_d: f64,
    pub head_h: f64,
    pub nut_s: f64,
    pub nut_h: f64,
}

impl Bolt {
    /// Hex-nut circumradius from the width across flats.
    pub fn nut_circumradius(&self) -> f64 {
        self.nut_s / 3.0_f64.sqrt()
    }

    pub fn shank_hole_d(&self) -> f64 {
        self.shank_d + TOL
    }

    pub fn head_hole_d(&self) -> f64 {
        self.head_d + TOL
    }
}

const BOLTS: [Bolt; 4] = [
    Bolt { metric: 3, shank_d: 3.0, head_d: 5.5, head_h: 3.0, nut_s: 5.5, nut_h: 2.4 },
    Bolt { metric: 4, shank_d: 4.0, head_d: 7.0, head_h: 4.0, nut_s: 7.0, nut_h: 3.2 },
    Bolt { metric: 5, shank_d: 5.0, head_d: 8.5, head_h: 5.0, nut_s: 8.0, nut_h: 4.0 },
    Bolt { metric: 6, shank_d: 6.0, head_d: 10.0, head_h: 6.0, nut_s: 10.0, nut_h: 5.0 },
];

pub fn bolt(metric: u32) -> Option<&'static Bolt> {
    BOLTS.iter().find(|b| b.metric == metric)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Washer {
    pub metric: u32,
    pub in_d: f64,
    pub out_d: f64,
    pub thickness: f64,
}

const WASHERS: [Washer; 4] = [
    Washer { metric: 3, in_d: 3.2, out_d: 7.0, thickness: 0.5 },
    Washer { metric: 4, in_d: 4.3, out_d: 9.0, thickness: 0.8 },
    Washer { metric: 5, in_d: 5.3, out_d: 10.0, thickness: 1.0 },
    Washer { metric: 6, in_d: 6.4, out_d: 12.0, thickness: 1.6 },
];

pub fn washer(metric: u32) -> Option<&'static Washer> {
    WASHERS.iter().find(|w| w.metric == metric)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearBearing {
    pub code: &'static str,
    pub rod_d: f64,
    pub out_d: f64,
    pub length: f64,
}

const LINEAR_BEARINGS: [LinearBearing; 4] = [
    LinearBearing { code: "LM6UU", rod_d: 6.0, out_d: 12.0, length: 19.0 },
    LinearBearing { code: "LM8UU", rod_d: 8.0, out_d: 15.0, length: 24.0 },
    LinearBearing { code: "LM10UU", rod_d: 10.0, out_d: 19.0, length: 29.0 },
    LinearBearing { code: "LM12UU", rod_d: 12.0, out_d: 21.0, length: 30.0 },
];

pub fn linear_bearing_for_rod(rod_d: f64) -> Option<&'static LinearBearing> {
    LINEAR_BEARINGS
        .iter()
        .find(|b| (b.rod_d - rod_d).abs() < 1.0e-9)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallBearing {
    pub code: &'static str,
    pub bore_d: f64,
    pub out_d: f64,
    pub width: f64,
}

const BALL_BEARINGS: [BallBearing; 3] = [
    BallBearing { code: "624", bore_d: 4.0, out_d: 13.0, width: 5.0 },
    BallBearing { code: "625", bore_d: 5.0, out_d: 16.0, width: 5.0 },
    BallBearing { code: "608", bore_d: 8.0, out_d: 22.0, width: 7.0 },
];

pub fn ball_bearing(code: &str) -> Option<&'static BallBearing> {
    BALL_BEARINGS.iter().find(|b| b.code == code)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AluProfile {
    pub side: f64,
    pub slot_w: f64,
    pub lip_t: f64,
    pub cavity_w: f64,
    pub cavity_t: f64,
    pub bore_d: f64,
    pub bolt_metric: u32,
}

const ALU_PROFILES: [AluProfile; 4] = [
    AluProfile { side: 10.0, slot_w: 3.0, lip_t: 1.0, cavity_w: 5.5, cavity_t: 1.5, bore_d: 2.5, bolt_metric: 3 },
    AluProfile { side: 15.0, slot_w: 3.2, lip_t: 1.2, cavity_w: 8.0, cavity_t: 2.2, bore_d: 3.3, bolt_metric: 3 },
    AluProfile { side: 20.0, slot_w: 6.0, lip_t: 1.8, cavity_w: 11.0, cavity_t: 3.0, bore_d: 4.2, bolt_metric: 5 },
    AluProfile { side: 30.0, slot_w: 8.0, lip_t: 2.0, cavity_w: 16.5, cavity_t: 4.5, bore_d: 6.8, bolt_metric: 6 },
];

pub fn profile(side: f64) -> Option<&'static AluProfile> {
    ALU_PROFILES.iter().find(|p| (p.side - side).abs() < 1.0e-9)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NemaMotor {
    pub size: u32,
    pub side: f64,
    pub bolt_sep: f64,
    pub bolt_metric: u32,
    pub boss_d: f64,
    pub boss_h: f64,
    pub shaft_d: f64,
}

const NEMA_MOTORS: [NemaMotor; 2] = [
    NemaMotor { size: 17, side: 42.3, bolt_sep: 31.0, bolt_metric: 3, boss_d: 22.0, boss_h: 2.0, shaft_d: 5.0 },
    NemaMotor { size: 23, side: 56.4, bolt_sep: 47.14, bolt_metric: 5, boss_d: 38.1, boss_h: 1.6, shaft_d: 6.35 },
];

pub fn nema(size: u32) -> Option<&'static NemaMotor> {
    NEMA_MOTORS.iter().find(|m| m.size == size)
}

/// 30 mm optical cage standard: rod spacing on a square, inch-derived cube.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CageCube {
    pub side: f64,
    pub rod_sep: f64,
    pub rod_d: f64,
    pub bore_d: f64,
}

pub fn cage_cube_30() -> CageCube {
    let inch = LengthUnit::Inch;
    CageCube {
        side: inch.to_millimeters(1.5),
        rod_sep: 30.0,
        rod_d: 6.0,
        bore_d: inch.to_millimeters(1.0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Belt {
    pub width: f64,
    pub thickness: f64,
    pub pitch: f64,
}

pub const fn belt_gt2() -> Belt {
    Belt {
        width: 6.0,
        thickness: 1.5,
        pitch: 2.0,
    }
}

/// Stock smooth-rod diameters the sliders are dimensioned for.
pub const ROD_DIAMETERS: [f64; 4] = [6.0, 8.0, 10.0, 12.0];

/// Shortest stock socket-head length (5 mm steps) covering `grip`.
pub fn stock_bolt_length(grip: f64) -> u32 {
    let mut len = 5;
    while (len as f64) < grip {
        len += 5;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_bolts_resolve() {
        for metric in [3, 4, 5, 6] {
            let bolt = bolt(metric).unwrap();
            assert_eq!(bolt.metric, metric);
            assert!(bolt.head_d > bolt.shank_d);
            assert!(bolt.nut_circumradius() > bolt.nut_s / 2.0);
        }
        assert!(bolt(8).is_none());
    }

    #[test]
    fn bearing_lookup_matches_rod() {
        for rod_d in ROD_DIAMETERS {
            let bearing = linear_bearing_for_rod(rod_d).unwrap();
            assert_eq!(bearing.rod_d, rod_d);
            assert!(bearing.out_d > rod_d);
        }
        assert!(linear_bearing_for_rod(7.0).is_none());
    }

    #[test]
    fn profile_slot_fits_its_bolt() {
        for p in &ALU_PROFILES {
            let bolt = bolt(p.bolt_metric).unwrap();
            assert!(p.slot_w < p.cavity_w);
            assert!(bolt.shank_d <= p.cavity_w);
            assert!(p.side > p.cavity_w);
        }
    }

    #[test]
    fn cage_cube_rods_clear_the_central_bore() {
        let cube = cage_cube_30();
        // rods sit at the corners of the rod_sep square
        let rod_axis_r = cube.rod_sep / 2.0 * 2.0_f64.sqrt();
        assert!(cube.bore_d / 2.0 + cube.rod_d / 2.0 < rod_axis_r);
        assert!(rod_axis_r + cube.rod_d / 2.0 < cube.side * 2.0_f64.sqrt() / 2.0);
    }
}
