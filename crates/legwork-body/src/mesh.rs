//! Flat leg meshes: a square swept along a 2D path, then lifted onto a
//! plane as a two-sided ribbon.

use legwork_core::math::normalize_or_zero;
use legwork_core::plane::Plane;
use nalgebra::{Vector2, Vector3};

/// Triangle mesh in a plane's 2D coordinates. Triangles are wound
/// counter-clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh2d {
    pub vertices: Vec<Vector2<f32>>,
    pub triangles: Vec<u32>,
}

/// Renderable leg mesh in world space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegMesh {
    pub vertices: Vec<Vector3<f32>>,
    pub triangles: Vec<u32>,
}

impl Mesh2d {
    /// Append `polygon` (convex, counter-clockwise) as a triangle fan.
    #[allow(clippy::cast_possible_truncation)]
    fn push_convex(&mut self, polygon: &[Vector2<f32>]) {
        let base = self.vertices.len() as u32;
        for i in 1..polygon.len().saturating_sub(1) {
            let i = i as u32;
            self.triangles.extend_from_slice(&[base, base + i, base + i + 1]);
        }
        self.vertices.extend_from_slice(polygon);
    }
}

fn cross(a: &Vector2<f32>, b: &Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

fn square(center: &Vector2<f32>, size: f32) -> [Vector2<f32>; 4] {
    let h = 0.5 * size;
    [
        center + Vector2::new(-h, -h),
        center + Vector2::new(h, -h),
        center + Vector2::new(h, h),
        center + Vector2::new(-h, h),
    ]
}

/// Convex hull of `points`, counter-clockwise, collinear points dropped.
pub fn convex_hull(points: &[Vector2<f32>]) -> Vec<Vector2<f32>> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<Vector2<f32>> = Vec::with_capacity(sorted.len() * 2);
    // Lower chain, then upper chain.
    for pass in [sorted.clone(), sorted.into_iter().rev().collect()] {
        let start = hull.len();
        for p in pass {
            while hull.len() >= start + 2 {
                let n = hull.len();
                if cross(&(hull[n - 1] - hull[n - 2]), &(p - hull[n - 2])) > 0.0 {
                    break;
                }
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
    }
    hull
}

/// Mesh of the region covered by a square of side `size` moving along
/// `path`.
///
/// Each consecutive pair of points contributes the convex hull of the two
/// squares centered on them. A single point yields one square and an empty
/// path an empty mesh.
pub fn square_path_mesh(path: &[Vector2<f32>], size: f32) -> Mesh2d {
    let mut mesh = Mesh2d::default();
    match path {
        [] => {}
        [point] => mesh.push_convex(&square(point, size)),
        _ => {
            for pair in path.windows(2) {
                let mut corners = square(&pair[0], size).to_vec();
                corners.extend_from_slice(&square(&pair[1], size));
                mesh.push_convex(&convex_hull(&corners));
            }
        }
    }
    mesh
}

/// Lift `mesh` onto `plane` twice, offset by `front` and `back` along the
/// plane's unit normal. The back copy is wound the other way so both faces
/// point outward.
#[allow(clippy::cast_possible_truncation)]
pub fn extrude(mesh: &Mesh2d, plane: &Plane, front: f32, back: f32) -> LegMesh {
    let normal = normalize_or_zero(&plane.normal());
    let count = mesh.vertices.len() as u32;

    let layer = |offset: f32| mesh.vertices.iter().map(move |v| plane.map(v) + normal * offset);
    let vertices = layer(front).chain(layer(back)).collect();

    let mut triangles = mesh.triangles.clone();
    triangles.extend(
        mesh.triangles
            .chunks_exact(3)
            .flat_map(|t| [t[0] + count, t[2] + count, t[1] + count]),
    );

    LegMesh { vertices, triangles }
}
