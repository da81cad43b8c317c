//! Helpers for 2D polylines on the ground plane.

use nalgebra::{Matrix2, Vector2};

use crate::math::EPSILON;

/// Intersection of the infinite lines through `a` and `b`.
///
/// `None` if the lines are parallel or either is degenerate.
pub fn line_intersection(
    a: (Vector2<f32>, Vector2<f32>),
    b: (Vector2<f32>, Vector2<f32>),
) -> Option<Vector2<f32>> {
    let da = a.1 - a.0;
    let db = b.1 - b.0;
    let inverse = Matrix2::from_columns(&[da, db]).try_inverse()?;
    // a.0 + s * da = b.0 + u * db  =>  [da db] (s, -u) = b.0 - a.0
    let s = (inverse * (b.0 - a.0)).x;
    Some(a.0 + da * s)
}

/// Closest point to `v` on the segment `a -> b`.
pub fn project_on_segment(v: &Vector2<f32>, (a, b): (Vector2<f32>, Vector2<f32>)) -> Vector2<f32> {
    let delta = b - a;
    let length_squared = delta.norm_squared();
    if length_squared < EPSILON * EPSILON {
        return a;
    }
    a + delta * ((v - a).dot(&delta) / length_squared).clamp(0.0, 1.0)
}

/// Closest point to `v` on the polyline `path`, and its distance.
///
/// A single point is treated as a zero-length path. `None` if `path` is
/// empty.
pub fn project_on_path(v: &Vector2<f32>, path: &[Vector2<f32>]) -> Option<(Vector2<f32>, f32)> {
    if let [point] = path {
        return Some((*point, (v - point).norm()));
    }
    path.windows(2)
        .map(|pair| {
            let projection = project_on_segment(v, (pair[0], pair[1]));
            (projection, (v - projection).norm())
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
