//! Planes in 3D and projection of points into their 2D coordinates.

use nalgebra::{Matrix2x3, Matrix3, Vector2, Vector3};

/// A plane spanned by two basis vectors through `origin`.
///
/// The basis need not be orthonormal, only linearly independent. A
/// dependent (or zero) basis makes every projection return `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub basis: (Vector3<f32>, Vector3<f32>),
    pub origin: Vector3<f32>,
}

impl Plane {
    pub const fn new(basis: (Vector3<f32>, Vector3<f32>), origin: Vector3<f32>) -> Self {
        Self { basis, origin }
    }

    /// `basis.0 x basis.1`. Zero for a singular basis.
    pub fn normal(&self) -> Vector3<f32> {
        self.basis.0.cross(&self.basis.1)
    }

    /// Coordinates of `v` in the plane basis, or `None` if the basis is
    /// singular.
    pub fn projection(&self, v: &Vector3<f32>) -> Option<Vector2<f32>> {
        self.projector().map(|p| p.project(v))
    }

    /// Invert the basis once so many points can be projected cheaply.
    pub fn projector(&self) -> Option<Projector> {
        let (b1, b2) = self.basis;
        let inverse = Matrix3::from_columns(&[b1, b2, b1.cross(&b2)]).try_inverse()?;
        Some(Projector {
            matrix: inverse.fixed_rows::<2>(0).into_owned(),
            origin: self.origin,
        })
    }

    /// The 3D point with plane coordinates `v`.
    pub fn map(&self, v: &Vector2<f32>) -> Vector3<f32> {
        self.origin + self.basis.0 * v.x + self.basis.1 * v.y
    }
}

/// Precomputed projection into a [`Plane`]'s coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    matrix: Matrix2x3<f32>,
    origin: Vector3<f32>,
}

impl Projector {
    pub fn project(&self, v: &Vector3<f32>) -> Vector2<f32> {
        self.matrix * (v - self.origin)
    }
}
