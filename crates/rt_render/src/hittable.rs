//! Primitive trait, Hit record and the flat Scene aggregate.

use crate::{Color, Point3, Ray, Real, Vec3};
use rt_math::Interval;

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: Real,
    /// Point of intersection
    pub point: Point3,
    /// Outward unit normal at the intersection
    pub normal: Vec3,
    /// Albedo of the struck primitive
    pub albedo: Color,
}

/// Trait for objects that can be hit by rays.
pub trait Primitive: Send + Sync {
    /// Nearest intersection with `t` inside `range`, if any.
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<Hit>;
}

/// An insertion-ordered list of primitives, scanned linearly.
///
/// Built before rendering and only read while a render is running.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Primitive>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, object: impl Primitive + 'static) {
        self.objects.push(Box::new(object));
    }

    /// Builder-style [`Scene::add`].
    pub fn with(mut self, object: impl Primitive + 'static) -> Self {
        self.add(object);
        self
    }

    /// Remove all primitives.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Primitive for Scene {
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        let mut closest_so_far = range.max;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray, range.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(hit);
            }
        }

        closest
    }
}
