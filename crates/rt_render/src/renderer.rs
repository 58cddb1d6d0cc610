//! Render entry point.
//!
//! Ties the pieces together: one work unit per pixel, each taking
//! `samples_per_pixel` jittered camera rays through the integrator, then
//! averaging, gamma-correcting and quantizing into the image.

use crate::camera::{Camera, ASPECT_RATIO};
use crate::image_buffer::{encode_pixel, Image, PixelFormat};
use crate::integrator::ray_color;
use crate::sampling::{jitter, pixel_rng};
use crate::scheduler::{RenderStats, Scheduler};
use crate::{Color, Real, RenderError, RenderResult, Scene, Sphere, Vec3};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for every per-pixel generator
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let width = 800;
        Self {
            width,
            height: (width as Real / ASPECT_RATIO) as u32,
            samples_per_pixel: 64,
            max_depth: 16,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// The reference settings: 800x450, 64 spp, depth 16.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Render pixel `(x, y)` with multi-sampling and return its encoded channels.
///
/// Row 0 is the top of the picture. Viewport coordinates are
/// `u = (x + jitter) / (width - 1)` and `v = (height - 1 - y + jitter) / (height - 1)`.
/// The pixel's generator is seeded from `config.seed` and `(x, y)` alone.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> [u8; 3] {
    let mut rng = pixel_rng(config.seed, x, y);
    let u_span = config.width.saturating_sub(1).max(1) as Real;
    let v_span = config.height.saturating_sub(1).max(1) as Real;
    let row_from_bottom = config.height.saturating_sub(1).saturating_sub(y) as Real;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (x as Real + jitter(&mut rng)) / u_span;
        let v = (row_from_bottom + jitter(&mut rng)) / v_span;

        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, scene, config.max_depth, &mut rng);
    }

    encode_pixel(pixel_color, config.samples_per_pixel)
}

/// Render the scene into a freshly allocated RGB8 image.
///
/// The scene is only read; every pixel is written exactly once by the
/// scheduler before the image is returned.
pub fn render(
    scene: &Scene,
    config: &RenderConfig,
    scheduler: &dyn Scheduler,
) -> RenderResult<(Image, RenderStats)> {
    config.validate()?;

    let mut image = Image::new(config.width, config.height, PixelFormat::Rgb8)?;
    let camera = Camera::new();

    log::info!(
        "Rendering {}x{} @ {} spp, depth {} ({} primitives, {} scheduler)",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        scene.len(),
        scheduler.name()
    );

    let shade = |x: u32, y: u32| render_pixel(&camera, scene, x, y, config);
    let stats = scheduler.run(&mut image, &shade)?;

    log::info!(
        "Rendered {} pixels in {:?} (peak {} in flight)",
        stats.units_submitted,
        stats.elapsed,
        stats.peak_in_flight
    );

    Ok((image, stats))
}

/// Red sphere in front of the camera resting on a large green ground sphere.
pub fn two_sphere_scene() -> Scene {
    Scene::new()
        .with(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Color::new(1.0, 0.0, 0.0),
        ))
        .with(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Color::new(0.0, 0.5, 0.0),
        ))
}
