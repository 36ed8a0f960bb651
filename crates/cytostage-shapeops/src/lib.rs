use cytostage_topology::{Point3, Solid, SolidBuilder};
use thiserror::Error;

pub const DEFAULT_SHAPEOPS_TOLERANCE: f64 = 0.05;

/// How far a cutting solid reaches past the faces it pierces, so boolean
/// operands never share a face.
pub const CUT_OVERSHOOT: f64 = 1.0;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("boolean operation failed")]
    BooleanFailed,
    #[error("empty cut list")]
    EmptyCutList,
    #[error(transparent)]
    Topology(#[from] cytostage_topology::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn difference(base: &Solid, tool: &Solid, tol: f64) -> Result<Solid> {
    ensure_tolerance(tol)?;

    let mut inverted_tool = tool.clone();
    inverted_tool.not();

    let result = truck_shapeops::and(base, &inverted_tool, tol).ok_or(Error::BooleanFailed)?;
    Ok(result)
}

pub fn union(base: &Solid, tool: &Solid, tol: f64) -> Result<Solid> {
    ensure_tolerance(tol)?;

    truck_shapeops::or(base, tool, tol).ok_or(Error::BooleanFailed)
}

pub fn common(base: &Solid, tool: &Solid, tol: f64) -> Result<Solid> {
    ensure_tolerance(tol)?;

    truck_shapeops::and(base, tool, tol).ok_or(Error::BooleanFailed)
}

/// Fuse an ordered list of solids into one compound.
pub fn fuse_all(solids: &[Solid], tol: f64) -> Result<Solid> {
    ensure_tolerance(tol)?;

    let mut iter = solids.iter();
    let Some(first) = iter.next() else {
        return Err(Error::EmptyCutList);
    };
    let mut fused = first.clone();
    for solid in iter {
        fused = union(&fused, solid, tol)?;
    }
    Ok(fused)
}

/// Subtract every cavity in the list from `base`. The cavities of one part
/// half are pairwise disjoint, so the result equals subtracting their fused
/// compound while each boolean keeps two genuinely intersecting operands.
/// An empty list leaves the base untouched.
pub fn cut_list(base: &Solid, cuts: &[Solid], tol: f64) -> Result<Solid> {
    let mut result = base.clone();
    for cut in cuts {
        result = difference(&result, cut, tol)?;
    }
    Ok(result)
}

/// Slotted hole: a box with semicircular ends, long axis along X, centered on
/// the origin in X and Y, swept from `z_min` by `height`. `length` is the
/// center-to-center distance of the end circles. The end circles run a hair
/// proud of the bar so the fused surfaces cross instead of touching
/// tangentially.
pub fn stadium_slot(width: f64, length: f64, height: f64, z_min: f64, tol: f64) -> Result<Solid> {
    if width <= 0.0 || length <= 0.0 || height <= 0.0 {
        return Err(Error::InvalidParameter(
            "slot dimensions must be > 0".to_string(),
        ));
    }

    let radius = width / 2.0 + 0.1;
    let bar = SolidBuilder::box_centered_xy(length, width, height, z_min)?;
    let left = SolidBuilder::cylinder_z(Point3::new(-length / 2.0, 0.0, z_min), radius, height)?;
    let right = SolidBuilder::cylinder_z(Point3::new(length / 2.0, 0.0, z_min), radius, height)?;
    let fused = union(&bar, &left, tol)?;
    union(&fused, &right, tol)
}

fn ensure_tolerance(tol: f64) -> Result<()> {
    if tol <= 0.0 {
        return Err(Error::InvalidParameter("tolerance must be > 0".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tolerance_is_rejected() {
        let a = SolidBuilder::box_solid(10.0, 10.0, 10.0).unwrap();
        let b = SolidBuilder::box_solid(5.0, 5.0, 5.0).unwrap();
        assert!(union(&a, &b, 0.0).is_err());
        assert!(difference(&a, &b, -1.0).is_err());
    }

    #[test]
    fn empty_cut_list_returns_the_base() {
        let base = SolidBuilder::box_solid(20.0, 20.0, 20.0).unwrap();
        let result = cut_list(&base, &[], DEFAULT_SHAPEOPS_TOLERANCE).unwrap();
        assert_eq!(result.face_iter().count(), base.face_iter().count());
    }

    #[test]
    fn fusing_nothing_is_an_error() {
        assert!(matches!(
            fuse_all(&[], DEFAULT_SHAPEOPS_TOLERANCE),
            Err(Error::EmptyCutList)
        ));
    }

    #[test]
    fn common_keeps_the_overlap() {
        let a = SolidBuilder::box_solid(20.0, 20.0, 20.0).unwrap();
        let b = cytostage_topology::translated(
            &SolidBuilder::box_solid(20.0, 20.0, 20.0).unwrap(),
            cytostage_topology::Vector3::new(10.0, 10.0, 10.0),
        );
        let overlap = common(&a, &b, DEFAULT_SHAPEOPS_TOLERANCE).unwrap();
        assert!(overlap.face_iter().count() > 0);
    }
}
