pub use truck_geometry::base::{Point2, Point3, Vector2, Vector3};

pub mod curves {
    pub use truck_geometry::nurbs::{BSplineCurve, KnotVec};
    pub use truck_geometry::specifieds::Line;
}

pub mod surfaces {
    pub use truck_geometry::nurbs::BSplineSurface;
    pub use truck_geometry::specifieds::{Plane, Sphere};
}

pub mod profiles {
    use truck_geometry::base::Point2;

    #[derive(Clone, Copy, Debug)]
    pub struct RectangleProfile {
        pub width: f64,
        pub height: f64,
    }

    impl RectangleProfile {
        pub fn corners(&self) -> [Point2; 4] {
            [
                Point2::new(0.0, 0.0),
                Point2::new(self.width, 0.0),
                Point2::new(self.width, self.height),
                Point2::new(0.0, self.height),
            ]
        }
    }

    /// Regular polygon inscribed in a circle, used for hex nut pockets.
    #[derive(Clone, Copy, Debug)]
    pub struct PolygonProfile {
        pub sides: usize,
        pub circumradius: f64,
    }

    impl PolygonProfile {
        pub fn hex_from_across_flats(across_flats: f64) -> Self {
            Self {
                sides: 6,
                circumradius: across_flats / 3.0_f64.sqrt(),
            }
        }

        pub fn corners(&self) -> Vec<Point2> {
            (0..self.sides)
                .map(|i| {
                    let angle = std::f64::consts::TAU * i as f64 / self.sides as f64;
                    Point2::new(
                        self.circumradius * angle.cos(),
                        self.circumradius * angle.sin(),
                    )
                })
                .collect()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn hex_circumradius_exceeds_across_flats_radius() {
            let hex = PolygonProfile::hex_from_across_flats(7.0);
            assert_eq!(hex.sides, 6);
            assert!(hex.circumradius > 3.5);
            assert!(hex.circumradius < 7.0);
        }

        #[test]
        fn polygon_corners_lie_on_the_circumcircle() {
            let hex = PolygonProfile::hex_from_across_flats(8.0);
            for corner in hex.corners() {
                let r = (corner.x * corner.x + corner.y * corner.y).sqrt();
                assert!((r - hex.circumradius).abs() < 1.0e-9);
            }
        }
    }
}
