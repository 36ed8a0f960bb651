use cytostage_io::{DEFAULT_TESSELLATION_TOLERANCE, triangulate_solid};
use cytostage_parts::{BearingHouseDims, bearing_house, idle_pulley_holder};
use cytostage_topology::Solid;

fn bbox(solid: &Solid) -> ([f64; 3], [f64; 3]) {
    let mesh = triangulate_solid(solid, DEFAULT_TESSELLATION_TOLERANCE);
    let mut min = [f64::MAX; 3];
    let mut max = [f64::MIN; 3];
    for p in mesh.positions() {
        let coords = [p.x, p.y, p.z];
        for axis in 0..3 {
            min[axis] = min[axis].min(coords[axis]);
            max[axis] = max[axis].max(coords[axis]);
        }
    }
    (min, max)
}

#[test]
fn housing_halves_stay_inside_their_envelope() {
    let dims = BearingHouseDims::derive(8.0).unwrap();
    let house = bearing_house(8.0, "house").unwrap();
    let eps = 1.0e-3;
    for child in house.children() {
        let (min, max) = bbox(child.geometry());
        assert!(max[0] - min[0] <= dims.length + eps);
        assert!(max[1] - min[1] <= dims.width + eps);
        assert!(min[0] >= -dims.length / 2.0 - eps && max[0] <= dims.length / 2.0 + eps);
        assert!(min[2] >= -dims.part_height - eps && max[2] <= dims.part_height + eps);
    }
}

#[test]
fn cloned_washers_are_volumetrically_congruent() {
    let idler = idle_pulley_holder("idler").unwrap();
    let washers: Vec<_> = idler
        .children()
        .iter()
        .filter(|c| c.name.contains("washer"))
        .collect();
    assert_eq!(washers.len(), 2);

    let (amin, amax) = bbox(washers[0].geometry());
    let (bmin, bmax) = bbox(washers[1].geometry());
    let eps = 1.0e-6;
    for axis in 0..3 {
        let a_extent = amax[axis] - amin[axis];
        let b_extent = bmax[axis] - bmin[axis];
        assert!((a_extent - b_extent).abs() < eps);
    }
    assert_eq!(
        washers[0].geometry().face_iter().count(),
        washers[1].geometry().face_iter().count()
    );
}
