use cytostage_geometry::profiles::{PolygonProfile, RectangleProfile};
use thiserror::Error;
use truck_modeling::{Rad, builder};

pub use truck_modeling::{Curve, Edge, Face, Point3, Shell, Solid, Surface, Vector3, Vertex, Wire};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Modeling(#[from] truck_modeling::errors::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub struct SolidBuilder;

impl SolidBuilder {
    pub fn box_solid(width: f64, depth: f64, height: f64) -> Result<Solid> {
        ensure_positive("width", width)?;
        ensure_positive("depth", depth)?;
        ensure_positive("height", height)?;

        let v = builder::vertex(Point3::new(0.0, 0.0, 0.0));
        let e = builder::tsweep(&v, Vector3::unit_x() * width);
        let f = builder::tsweep(&e, Vector3::unit_y() * depth);
        Ok(builder::tsweep(&f, Vector3::unit_z() * height))
    }

    /// Box centered on the origin in X and Y, spanning `[z_min, z_min + height]`.
    pub fn box_centered_xy(width: f64, depth: f64, height: f64, z_min: f64) -> Result<Solid> {
        let solid = Self::box_solid(width, depth, height)?;
        Ok(builder::translated(
            &solid,
            Vector3::new(-width / 2.0, -depth / 2.0, z_min),
        ))
    }

    pub fn plate(width: f64, depth: f64, thickness: f64) -> Result<Solid> {
        ensure_positive("width", width)?;
        ensure_positive("depth", depth)?;
        ensure_positive("thickness", thickness)?;

        let face = rectangle_face(width, depth, 0.0)?;
        Ok(builder::tsweep(&face, Vector3::unit_z() * thickness))
    }

    pub fn cylinder_z(center: Point3, radius: f64, height: f64) -> Result<Solid> {
        ensure_positive("radius", radius)?;
        ensure_positive("height", height)?;

        let face = circle_face(center, radius)?;
        Ok(builder::tsweep(&face, Vector3::unit_z() * height))
    }

    /// Cylinder with its axis along +X, base circle at `center`.
    pub fn cylinder_x(center: Point3, radius: f64, length: f64) -> Result<Solid> {
        let solid = Self::cylinder_z(Point3::new(0.0, 0.0, 0.0), radius, length)?;
        let solid = builder::rotated(
            &solid,
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
            Rad(std::f64::consts::FRAC_PI_2),
        );
        Ok(builder::translated(
            &solid,
            Vector3::new(center.x, center.y, center.z),
        ))
    }

    /// Cylinder with its axis along +Y, base circle at `center`.
    pub fn cylinder_y(center: Point3, radius: f64, length: f64) -> Result<Solid> {
        let solid = Self::cylinder_z(Point3::new(0.0, 0.0, 0.0), radius, length)?;
        let solid = builder::rotated(
            &solid,
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_x(),
            Rad(-std::f64::consts::FRAC_PI_2),
        );
        Ok(builder::translated(
            &solid,
            Vector3::new(center.x, center.y, center.z),
        ))
    }

    /// Regular prism swept along +Z from `z_min`, polygon centered on the
    /// origin with one vertex on +X.
    pub fn regular_prism(sides: usize, circumradius: f64, height: f64, z_min: f64) -> Result<Solid> {
        if sides < 3 {
            return Err(Error::InvalidParameter(
                "prism needs at least 3 sides".to_string(),
            ));
        }
        ensure_positive("circumradius", circumradius)?;
        ensure_positive("height", height)?;

        let profile = PolygonProfile {
            sides,
            circumradius,
        };
        let vertices: Vec<Vertex> = profile
            .corners()
            .into_iter()
            .map(|p| builder::vertex(Point3::new(p.x, p.y, z_min)))
            .collect();
        let mut edges = Vec::with_capacity(sides);
        for i in 0..sides {
            edges.push(builder::line(&vertices[i], &vertices[(i + 1) % sides]));
        }
        let wire: Wire = edges.into();
        let face = builder::try_attach_plane(&[wire])?;
        Ok(builder::tsweep(&face, Vector3::unit_z() * height))
    }

    /// Right-angled wedge: triangle in the XZ plane (legs `width` and `height`),
    /// extruded along +Y by `depth`. Used for gussets and chamfer cuts.
    pub fn wedge(width: f64, depth: f64, height: f64) -> Result<Solid> {
        ensure_positive("width", width)?;
        ensure_positive("depth", depth)?;
        ensure_positive("height", height)?;

        // wound so the face normal points along +Y, the sweep direction
        let v0 = builder::vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = builder::vertex(Point3::new(0.0, 0.0, height));
        let v2 = builder::vertex(Point3::new(width, 0.0, 0.0));
        let wire: Wire = vec![
            builder::line(&v0, &v1),
            builder::line(&v1, &v2),
            builder::line(&v2, &v0),
        ]
        .into();
        let face = builder::try_attach_plane(&[wire])?;
        Ok(builder::tsweep(&face, Vector3::unit_y() * depth))
    }
}

pub fn translated(solid: &Solid, offset: Vector3) -> Solid {
    builder::translated(solid, offset)
}

pub fn rotated_z(solid: &Solid, origin: Point3, angle: f64) -> Solid {
    builder::rotated(solid, origin, Vector3::unit_z(), Rad(angle))
}

fn rectangle_face(width: f64, depth: f64, z: f64) -> Result<Face> {
    let profile = RectangleProfile {
        width,
        height: depth,
    };
    let vertices: Vec<Vertex> = profile
        .corners()
        .into_iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, z)))
        .collect();
    let wire: Wire = vec![
        builder::line(&vertices[0], &vertices[1]),
        builder::line(&vertices[1], &vertices[2]),
        builder::line(&vertices[2], &vertices[3]),
        builder::line(&vertices[3], &vertices[0]),
    ]
    .into();

    Ok(builder::try_attach_plane(&[wire])?)
}

fn circle_face(center: Point3, radius: f64) -> Result<Face> {
    let v = builder::vertex(Point3::new(center.x + radius, center.y, center.z));
    let wire = builder::rsweep(&v, center, Vector3::unit_z(), Rad(std::f64::consts::PI * 2.0));
    Ok(builder::try_attach_plane(&[wire])?)
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(Error::InvalidParameter(format!("{name} must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_solid_exists() -> Result<()> {
        let solid = SolidBuilder::box_solid(100.0, 200.0, 300.0)?;
        assert!(solid.face_iter().count() > 0);
        Ok(())
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert!(SolidBuilder::box_solid(0.0, 10.0, 10.0).is_err());
        assert!(SolidBuilder::cylinder_z(Point3::new(0.0, 0.0, 0.0), -1.0, 5.0).is_err());
        assert!(SolidBuilder::regular_prism(2, 4.0, 3.0, 0.0).is_err());
    }
}
