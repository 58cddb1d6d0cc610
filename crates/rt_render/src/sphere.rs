//! Sphere primitive for ray tracing.

use crate::{
    hittable::{Hit, Primitive},
    Color, Point3, Ray, Real,
};
use rt_math::Interval;

/// A sphere primitive.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Point3,
    radius: Real,
    albedo: Color,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero, and a
    /// zero-radius sphere is never hit.
    pub fn new(center: Point3, radius: Real, albedo: Color) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            albedo,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> Real {
        self.radius
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<Hit> {
        // A degenerate sphere has no surface to scatter from
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Smaller root first, the larger one only if the smaller is out of range
        let mut root = (h - sqrtd) / a;
        if !range.contains(root) {
            root = (h + sqrtd) / a;
            if !range.contains(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(Hit {
            t: root,
            point,
            normal: (point - self.center) / self.radius,
            albedo: self.albedo,
        })
    }
}
