use anyhow::{Context, Result, bail};
use cytostage_topology::Solid;
use std::fs::File;
use std::path::Path;
use truck_meshalgo::prelude::*;
use truck_polymesh::{PolygonMesh, obj};

pub const DEFAULT_TESSELLATION_TOLERANCE: f64 = 0.5;

pub fn triangulate_solid(solid: &Solid, tol: f64) -> PolygonMesh {
    let mut mesh = solid.triangulation(tol).to_polygon();
    mesh.add_naive_normals(true);
    mesh.put_together_same_attrs(truck_base::tolerance::TOLERANCE);
    mesh.remove_unused_attrs();
    mesh
}

pub fn export_obj(solid: &Solid, path: impl AsRef<Path>, tol: f64) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mesh = triangulate_solid(solid, tol);
    if mesh.positions().is_empty() {
        bail!("triangulation produced empty mesh");
    }

    let file = File::create(path).with_context(|| format!("create OBJ file {}", path.display()))?;
    obj::write(&mesh, file).with_context(|| format!("write OBJ file {}", path.display()))?;
    Ok(())
}

/// Binary STL of the triangulated solid. The mesh is expanded to one normal
/// per triangle, which is all the format can carry.
pub fn export_stl(solid: &Solid, path: impl AsRef<Path>, tol: f64) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mesh = triangulate_solid(solid, tol);
    let triangles = stl_triangles(&mesh);
    if triangles.is_empty() {
        bail!("triangulation produced empty mesh");
    }

    let mut file =
        File::create(path).with_context(|| format!("create STL file {}", path.display()))?;
    stl_io::write_stl(&mut file, triangles.iter())
        .with_context(|| format!("write STL file {}", path.display()))?;
    Ok(())
}

fn stl_triangles(mesh: &PolygonMesh) -> Vec<stl_io::Triangle> {
    let positions = mesh.positions();
    let mut triangles = Vec::new();
    for face in mesh.faces().triangle_iter() {
        let [v0, v1, v2] = [
            positions[face[0].pos],
            positions[face[1].pos],
            positions[face[2].pos],
        ];
        let e1 = [v1.x - v0.x, v1.y - v0.y, v1.z - v0.z];
        let e2 = [v2.x - v0.x, v2.y - v0.y, v2.z - v0.z];
        let cross = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        let len = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
        let normal = if len > 0.0 {
            [
                (cross[0] / len) as f32,
                (cross[1] / len) as f32,
                (cross[2] / len) as f32,
            ]
        } else {
            [0.0, 0.0, 1.0]
        };
        triangles.push(stl_io::Triangle {
            normal: stl_io::Normal::new(normal),
            vertices: [
                stl_io::Vertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                stl_io::Vertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                stl_io::Vertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
            ],
        });
    }
    triangles
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    Ok(())
}
