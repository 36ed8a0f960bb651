mod bear_house;
mod belt;
mod cage_cube;
mod extrusion;
mod holes;
mod motor_holder;
mod pulley;
mod shaft_holder;
mod slider;
mod stage;

pub use bear_house::{BearingHouseDims, bearing_house};
pub use belt::{belt_clamp, belt_tensioner};
pub use cage_cube::{cage_cube_block, cage_cube_mount};
pub use extrusion::{Axis, alu_extrusion};
pub use holes::clone_at;
pub use motor_holder::nema_holder;
pub use pulley::idle_pulley_holder;
pub use shaft_holder::shaft_holder;
pub use slider::{CentralSliderDims, EndSliderDims, Side, central_slider, end_slider};
pub use stage::{StageConfig, base_layout, epi_layout, stage_layout};

/// Minimum printed wall left around any hole or pocket.
pub const MIN_WALL: f64 = 3.0;
/// Wall kept beyond a linear-bearing pocket.
pub const BEARING_WALL: f64 = 6.0;
/// Straight length of a belt-clamp cavity.
pub const BELT_CLAMP_SPAN: f64 = 25.0;
