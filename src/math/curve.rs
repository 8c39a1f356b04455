use super::Vec2;

/// Quadratic Bézier curve through a single control point, used for the
/// swaying balloon tethers
#[derive(Debug, Clone, Copy)]
pub struct QuadraticBezier {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl QuadraticBezier {
    pub fn new(start: Vec2, control: Vec2, end: Vec2) -> Self {
        Self { start, control, end }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0)
    pub fn evaluate(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start.scale(u * u) + self.control.scale(2.0 * u * t) + self.end.scale(t * t)
    }

    /// Sample the curve at N evenly spaced parameters, endpoints included
    pub fn sample(&self, n: usize) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1).max(1) as f32;
                self.evaluate(t)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let curve = QuadraticBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        assert_eq!(curve.evaluate(0.0), Vec2::new(0.0, 0.0));
        assert_eq!(curve.evaluate(1.0), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_midpoint_pulls_toward_control() {
        let curve = QuadraticBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        let mid = curve.evaluate(0.5);
        assert!((mid.x - 5.0).abs() < 0.0001);
        // Halfway between the chord (y=0) and the control point (y=10)
        assert!((mid.y - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_parameter_clamped() {
        let curve = QuadraticBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 0.0),
        );
        assert_eq!(curve.evaluate(-1.0), curve.evaluate(0.0));
        assert_eq!(curve.evaluate(2.0), curve.evaluate(1.0));
    }

    #[test]
    fn test_sample_count_and_ends() {
        let curve = QuadraticBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 6.0),
            Vec2::new(6.0, 0.0),
        );
        let points = curve.sample(9);
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], curve.start);
        assert_eq!(points[8], curve.end);
    }
}
