//! rt renderer - CPU path tracing into an 8-bit image buffer.
//!
//! A Monte Carlo path tracer over a flat list of primitives:
//! - Closest-hit intersection across a linearly scanned [`Scene`]
//! - Depth-bounded diffuse bouncing with a fixed 0.5 attenuation
//! - Gamma-2 correction and `[0, 0.999] * 256` quantization per pixel
//! - One work unit per pixel, run by a [`Serial`] or bounded [`Parallel`] scheduler

mod axis_box;
mod camera;
mod error;
mod hittable;
mod image_buffer;
mod integrator;
mod renderer;
mod sampling;
mod scheduler;
mod sphere;

pub use axis_box::AxisBox;
pub use camera::{Camera, ASPECT_RATIO, FOCAL_LENGTH, VIEWPORT_HEIGHT};
pub use error::{RenderError, RenderResult};
pub use hittable::{Hit, Primitive, Scene};
pub use image_buffer::{encode_pixel, gamma_correct, to_unorm, CompressFormat, Image, PixelFormat};
pub use integrator::{background, ray_color, DIFFUSE_ATTENUATION, SHADOW_ACNE_EPSILON};
pub use renderer::{render, render_pixel, two_sphere_scene, RenderConfig};
pub use sampling::{jitter, pixel_rng, random_unit_vector};
pub use scheduler::{Parallel, RenderStats, Scheduler, Serial, ShadeFn};
pub use sphere::Sphere;

/// Re-export the numeric types from rt_math
pub use rt_math::{Interval, Point3, Ray, Real, Vec3};

/// Color type alias (linear RGB, nominally 0-1)
pub type Color = Vec3;
