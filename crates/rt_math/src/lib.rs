//! Numeric foundation for the rt path tracer.
//!
//! All renderer arithmetic goes through [`Real`] and [`Vec3`]. Both are
//! `f32`-based by default; enabling the `f64` feature switches the whole
//! render to double precision.

#[cfg(not(feature = "f64"))]
mod precision {
    /// Scalar type used by every renderer computation.
    pub type Real = f32;
    pub use glam::Vec3;
}

#[cfg(feature = "f64")]
mod precision {
    /// Scalar type used by every renderer computation.
    pub type Real = f64;
    pub use glam::DVec3 as Vec3;
}

pub use precision::{Real, Vec3};

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Point in world space.
pub type Point3 = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_real_matches_vec3_component() {
        let v = Vec3::splat(0.25);
        let r: Real = v.y;
        assert_eq!(r, 0.25);
    }
}
