use crate::bom::BomLine;
use cytostage_base::Guid;
use cytostage_topology::{Point3, Solid, Vector3, rotated_z, translated};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartCategory {
    Slider,
    Housing,
    Bracket,
    MotorMount,
    Clamp,
    Pulley,
    CageCube,
    Extrusion,
    Rod,
    Hardware,
    Generic,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Integer(i64),
    Number(f64),
    Bool(bool),
    Text(String),
}

pub type ParameterSet = BTreeMap<String, ParameterValue>;

/// Position plus rotation about Z. Mirrored instances are placed with a
/// half-turn, never a reflection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rot_z: f64,
}

impl Placement {
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rot_z: 0.0,
        }
    }

    pub const fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            rot_z: 0.0,
        }
    }

    pub const fn rotated(x: f64, y: f64, z: f64, rot_z: f64) -> Self {
        Self { x, y, z, rot_z }
    }

    pub fn offset(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Rotate about the local origin, then translate.
    pub fn apply(&self, solid: &Solid) -> Solid {
        let solid = if self.rot_z != 0.0 {
            rotated_z(solid, Point3::new(0.0, 0.0, 0.0), self.rot_z)
        } else {
            solid.clone()
        };
        translated(&solid, self.offset())
    }

    pub fn translated_by(&self, delta: Vector3) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            z: self.z + delta.z,
            rot_z: self.rot_z,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Clone, Debug)]
pub struct PartElement {
    pub guid: Guid,
    pub name: String,
    pub category: PartCategory,
    pub parameters: ParameterSet,
    pub placement: Placement,
    pub geometry: Solid,
    pub hardware: Vec<BomLine>,
}

impl PartElement {
    pub fn new(
        guid: Guid,
        name: impl Into<String>,
        category: PartCategory,
        parameters: ParameterSet,
        geometry: Solid,
    ) -> Self {
        Self {
            guid,
            name: name.into(),
            category,
            parameters,
            placement: Placement::identity(),
            geometry,
            hardware: Vec::new(),
        }
    }

    pub fn insert_parameter(&mut self, key: impl Into<String>, value: ParameterValue) {
        self.parameters.insert(key.into(), value);
    }

    pub fn number_parameter(&self, key: &str) -> Option<f64> {
        match self.parameters.get(key) {
            Some(ParameterValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn with_hardware(mut self, lines: Vec<BomLine>) -> Self {
        self.hardware = lines;
        self
    }

    pub fn geometry(&self) -> &Solid {
        &self.geometry
    }

    /// Move the element to an absolute placement, transforming its geometry.
    /// The geometry is built at the local origin, so this is applied once.
    pub fn place(&mut self, placement: Placement) {
        self.geometry = placement.apply(&self.geometry);
        self.placement = placement;
    }

    /// Shift the element, keeping its rotation.
    pub fn shift(&mut self, delta: Vector3) {
        self.geometry = translated(&self.geometry, delta);
        self.placement = self.placement.translated_by(delta);
    }
}
