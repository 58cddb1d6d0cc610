use crate::Real;

/// A parameter range `[min, max]` along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Real,
    pub max: Real,
}

impl Interval {
    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: Real::NEG_INFINITY,
        max: Real::INFINITY,
    };

    /// Create a new interval given min and max values.
    pub fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: Real) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: Real) -> Real {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, new upper bound. Used to narrow a closest-hit search.
    pub fn with_max(&self, max: Real) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 0.999);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.5), 0.5);
        assert_eq!(interval.clamp(1.5), 0.999);
    }

    #[test]
    fn test_interval_with_max() {
        let narrowed = Interval::new(0.001, Real::INFINITY).with_max(4.0);
        assert_eq!(narrowed, Interval::new(0.001, 4.0));
    }

    #[test]
    fn test_interval_universe() {
        assert!(Interval::UNIVERSE.contains(1e10));
        assert!(Interval::UNIVERSE.contains(-1e10));
    }
}
