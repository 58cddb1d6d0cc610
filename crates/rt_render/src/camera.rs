//! Fixed pinhole camera for ray generation.

use crate::{Point3, Ray, Real, Vec3};

/// Width over height of the viewport.
pub const ASPECT_RATIO: Real = 16.0 / 9.0;
/// Height of the viewport in world units.
pub const VIEWPORT_HEIGHT: Real = 2.0;
/// Distance from the eye to the viewport plane.
pub const FOCAL_LENGTH: Real = 1.0;

/// Pinhole camera at the origin looking down -Z.
///
/// The basis is derived once from the constants above; there is no lens
/// model, so every ray starts exactly at the origin.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        let viewport_width = ASPECT_RATIO * VIEWPORT_HEIGHT;

        let origin = Point3::ZERO;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, VIEWPORT_HEIGHT, 0.0);
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, FOCAL_LENGTH);

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Ray through normalized viewport coordinates `(u, v)`, both in `[0, 1]`,
    /// with `v = 0` at the bottom edge.
    pub fn get_ray(&self, u: Real, v: Real) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn lower_left_corner(&self) -> Point3 {
        self.lower_left_corner
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
