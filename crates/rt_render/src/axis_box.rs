//! Axis-aligned box primitive.

use crate::{
    hittable::{Hit, Primitive},
    Color, Point3, Ray, Real, Vec3,
};
use rt_math::Interval;

/// A solid axis-aligned box between two corners.
#[derive(Debug, Clone, Copy)]
pub struct AxisBox {
    min: Point3,
    max: Point3,
    albedo: Color,
}

impl AxisBox {
    /// Create a box from two opposite corners (in any order).
    pub fn new(a: Point3, b: Point3, albedo: Color) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            albedo,
        }
    }

    pub fn min(&self) -> Point3 {
        self.min
    }

    pub fn max(&self) -> Point3 {
        self.max
    }
}

/// Unit vector along axis `n` (0=X, 1=Y, 2=Z).
fn axis(n: usize) -> Vec3 {
    match n {
        0 => Vec3::X,
        1 => Vec3::Y,
        _ => Vec3::Z,
    }
}

impl Primitive for AxisBox {
    /// Slab test tracking which axis produced the entry and exit parameters.
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<Hit> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_enter = Real::NEG_INFINITY;
        let mut t_exit = Real::INFINITY;
        let mut enter_axis = 0;
        let mut exit_axis = 0;

        for n in 0..3 {
            let inv = 1.0 / direction[n];
            let mut t0 = (self.min[n] - origin[n]) * inv;
            let mut t1 = (self.max[n] - origin[n]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // NaN (origin on a slab plane with zero direction) leaves the bounds untouched
            if t0 > t_enter {
                t_enter = t0;
                enter_axis = n;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_axis = n;
            }
        }

        if t_exit < t_enter {
            return None;
        }

        let (t, normal) = if range.contains(t_enter) {
            (t_enter, -axis(enter_axis) * direction[enter_axis].signum())
        } else if range.contains(t_exit) {
            (t_exit, axis(exit_axis) * direction[exit_axis].signum())
        } else {
            return None;
        };

        Some(Hit {
            t,
            point: ray.at(t),
            normal,
            albedo: self.albedo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> AxisBox {
        AxisBox::new(Vec3::splat(1.0), Vec3::splat(-1.0), Color::new(0.2, 0.4, 0.6))
    }

    #[test]
    fn test_corners_are_ordered() {
        let cube = unit_cube();
        assert_eq!(cube.min(), Vec3::splat(-1.0));
        assert_eq!(cube.max(), Vec3::splat(1.0));
    }

    #[test]
    fn test_hit_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = unit_cube()
            .intersect(&ray, Interval::new(0.001, Real::INFINITY))
            .unwrap();

        assert!((hit.t - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(hit.albedo, Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_hit_side_face_with_oblique_ray() {
        let ray = Ray::new(Vec3::new(-4.0, 0.5, 0.0), Vec3::new(1.0, 0.1, 0.0));
        let hit = unit_cube()
            .intersect(&ray, Interval::new(0.001, Real::INFINITY))
            .unwrap();

        assert!((hit.t - 3.0).abs() < 1e-5);
        assert_eq!(hit.normal, -Vec3::X);
    }

    #[test]
    fn test_from_inside_uses_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        let hit = unit_cube()
            .intersect(&ray, Interval::new(0.001, Real::INFINITY))
            .unwrap();

        assert!((hit.t - 0.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_miss() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(unit_cube()
            .intersect(&ray, Interval::new(0.001, Real::INFINITY))
            .is_none());

        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(unit_cube()
            .intersect(&away, Interval::new(0.001, Real::INFINITY))
            .is_none());
    }
}
