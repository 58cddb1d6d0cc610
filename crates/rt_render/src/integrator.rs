//! Depth-bounded diffuse path integrator.
//!
//! Every surface scatters with a true Lambertian distribution and attenuates
//! by a constant [`DIFFUSE_ATTENUATION`]; the albedo stored in [`Hit`] is not
//! consulted. Paths that run out of bounces contribute black.
//!
//! [`Hit`]: crate::Hit

use crate::sampling::random_unit_vector;
use crate::{Color, Primitive, Ray, Real, Scene};
use rand::RngCore;
use rt_math::Interval;

/// Lower bound of every scene query, keeps bounced rays off their own surface.
pub const SHADOW_ACNE_EPSILON: Real = 0.001;

/// Energy kept per diffuse bounce.
pub const DIFFUSE_ATTENUATION: Real = 0.5;

const SKY_WHITE: Color = Color::new(1.0, 1.0, 1.0);
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Radiance arriving along `ray` after at most `depth` scene queries.
///
/// Equivalent to the recursion
/// `color(r, 0) = 0`, `color(r, d) = 0.5 * color(bounce(r), d - 1)` on a hit
/// and `background(r)` on a miss, unrolled into a loop that carries the
/// accumulated attenuation.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    let range = Interval::new(SHADOW_ACNE_EPSILON, Real::INFINITY);
    let mut ray = *ray;
    let mut attenuation: Real = 1.0;

    for _ in 0..depth {
        match scene.intersect(&ray, range) {
            Some(hit) => {
                let target = hit.point + hit.normal + random_unit_vector(rng);
                ray = Ray::new(hit.point, target - hit.point);
                attenuation *= DIFFUSE_ATTENUATION;
            }
            None => return attenuation * background(&ray),
        }
    }

    Color::ZERO
}

/// Vertical white-to-blue gradient seen by rays that escape the scene.
///
/// Uses the raw direction's y component; nothing is normalized or clamped.
pub fn background(ray: &Ray) -> Color {
    let t = 0.5 * (ray.direction().y + 1.0);
    (1.0 - t) * SKY_WHITE + t * SKY_BLUE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_spheres() -> Scene {
        Scene::new()
            .with(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Color::new(1.0, 0.0, 0.0)))
            .with(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, Color::new(0.0, 0.5, 0.0)))
    }

    #[test]
    fn test_depth_zero_is_black() {
        let scene = two_spheres();
        let mut rng = StdRng::seed_from_u64(42);

        let rays = [
            Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)),
            Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)),
            Ray::new(Vec3::new(3.0, 1.0, 2.0), Vec3::new(-1.0, -2.0, 0.5)),
        ];
        for ray in &rays {
            assert_eq!(ray_color(ray, &scene, 0, &mut rng), Color::ZERO);
        }
        assert_eq!(ray_color(&rays[0], &Scene::new(), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = two_spheres();
        let mut rng = StdRng::seed_from_u64(42);

        let up = Ray::new(Vec3::ZERO, Vec3::new(0.2, 1.0, -0.3));
        let color = ray_color(&up, &scene, 16, &mut rng);

        let t = 0.5 * (up.direction().y + 1.0);
        let expected = (1.0 - t) * Color::ONE + t * Color::new(0.5, 0.7, 1.0);
        assert_eq!(color, expected);
        assert_eq!(color, background(&up));
    }

    #[test]
    fn test_background_endpoints() {
        let up = background(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = background(&Ray::new(Vec3::ZERO, -Vec3::Y));
        let level = background(&Ray::new(Vec3::ZERO, Vec3::X));

        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_background_uses_raw_direction() {
        // y = 3 is outside [-1, 1]; the blend extrapolates past sky blue
        let steep = background(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        assert!(steep.x.abs() < 1e-6);
        assert!((steep.y - 0.4).abs() < 1e-6);
        assert!((steep.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_bounce_budget_is_black_on_hit() {
        // Depth 1 spends the only query on the hit; nothing is left for the bounce
        let scene = two_spheres();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_hit_is_attenuated_at_least_once() {
        let scene = two_spheres();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        for _ in 0..64 {
            let color = ray_color(&ray, &scene, 16, &mut rng);
            // Brightest possible background is white; one bounce halves it
            assert!(color.max_element() <= 0.5 + 1e-6, "color = {:?}", color);
            assert!(color.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_albedo_is_not_applied() {
        // A black sphere still returns a gray-blue, not black
        let scene = Scene::new().with(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Color::ZERO,
        ));
        let mut rng = StdRng::seed_from_u64(9);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let color = ray_color(&ray, &scene, 16, &mut rng);
        assert!(color.length() > 0.0);
        // Single sphere, convex: one bounce then escape
        assert!((color.z - 0.5).abs() < 1e-5);
    }
}
