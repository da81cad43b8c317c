//! Vector helpers shared by the planner, solver and body composers.
//!
//! Angles are in degrees and signed angles follow the right-hand rule:
//! a positive angle about `up` turns counter-clockwise when viewed from
//! above. Every function is total; degenerate inputs (zero vectors,
//! parallel axes) produce a documented fallback rather than NaN.

use nalgebra::{Unit, UnitQuaternion, Vector2, Vector3};

/// Vectors shorter than this are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Normalize `v`, or return the zero vector if it is too short to normalize.
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(EPSILON).unwrap_or_else(Vector3::zeros)
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// Returns 0 when either vector is (near) zero.
pub fn angle(from: &Vector3<f32>, to: &Vector3<f32>) -> f32 {
    let denominator = (from.norm_squared() * to.norm_squared()).sqrt();
    if denominator < EPSILON * EPSILON {
        return 0.0;
    }
    (from.dot(to) / denominator).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Signed angle in degrees from `from` to `to`, positive when the turn is
/// counter-clockwise about `axis`.
pub fn signed_angle(from: &Vector3<f32>, to: &Vector3<f32>, axis: &Vector3<f32>) -> f32 {
    let unsigned = angle(from, to);
    if axis.dot(&from.cross(to)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Rotate `v` counter-clockwise about `axis` by `degrees`.
///
/// A zero axis leaves `v` unchanged.
pub fn rotate_about(v: &Vector3<f32>, axis: &Vector3<f32>, degrees: f32) -> Vector3<f32> {
    Unit::try_new(*axis, EPSILON).map_or(*v, |axis| {
        UnitQuaternion::from_axis_angle(&axis, degrees.to_radians()) * v
    })
}

/// Vector projection of `v` onto `onto`. Zero if `onto` is zero.
pub fn project(v: &Vector3<f32>, onto: &Vector3<f32>) -> Vector3<f32> {
    let length_squared = onto.norm_squared();
    if length_squared < EPSILON * EPSILON {
        return Vector3::zeros();
    }
    onto * (v.dot(onto) / length_squared)
}

/// Spherical interpolation between two vectors.
///
/// The direction travels along the great arc while the magnitude is
/// interpolated linearly. `t` is clamped to `[0, 1]`. Falls back to a
/// linear interpolation when either end is zero, and to a normalized lerp
/// when the two directions are nearly parallel. Antiparallel directions
/// rotate about an arbitrary perpendicular axis.
pub fn slerp(from: &Vector3<f32>, to: &Vector3<f32>, t: f32) -> Vector3<f32> {
    let t = t.clamp(0.0, 1.0);
    let (Some(a), Some(b)) = (Unit::try_new(*from, EPSILON), Unit::try_new(*to, EPSILON)) else {
        return from.lerp(to, t);
    };

    let magnitude = from.norm() + (to.norm() - from.norm()) * t;
    let direction = match a.try_slerp(&b, t, EPSILON) {
        Some(direction) => direction.into_inner(),
        None if from.dot(to) > 0.0 => normalize_or_zero(&a.into_inner().lerp(&b.into_inner(), t)),
        None => {
            let a = a.into_inner();
            rotate_about(&a, &any_perpendicular(&a), 180.0 * t)
        }
    };
    direction * magnitude
}

/// Gram-Schmidt orthonormalization of a pair of vectors.
///
/// The first output is `a` normalized, the second is the component of `b`
/// orthogonal to `a`, normalized. A component that cannot be normalized is
/// returned as the zero vector, so a basis built from the result is
/// reported as singular by any inverse taken downstream.
pub fn orthonormalize(a: &Vector3<f32>, b: &Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let first = normalize_or_zero(a);
    let second = normalize_or_zero(&(b - first * b.dot(&first)));
    (first, second)
}

/// Orthonormal pair spanning the ground plane perpendicular to `up`.
///
/// For `up = +Y` this is `(+X, +Z)`.
pub fn ground_basis(up: &Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let up = normalize_or_zero(up);
    let reference = if up.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::z()
    };
    let tangent = normalize_or_zero(&(reference - project(&reference, &up)));
    (tangent, tangent.cross(&up))
}

/// Coordinates of `v` in the ground plane perpendicular to `up`.
pub fn ground_coordinates(v: &Vector3<f32>, up: &Vector3<f32>) -> Vector2<f32> {
    let (u, w) = ground_basis(up);
    Vector2::new(v.dot(&u), v.dot(&w))
}

/// Some unit vector perpendicular to `v`. Zero if `v` is zero.
pub fn any_perpendicular(v: &Vector3<f32>) -> Vector3<f32> {
    let reference = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    normalize_or_zero(&v.cross(&reference))
}
