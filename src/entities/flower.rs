//! Ground flowers that bloom open once the celebration starts.

use crate::math::{shapes, Rgb, Vec2};
use crate::render::RenderSink;

const STEM_HEIGHT: f32 = 18.0;
const STEM_WIDTH: f32 = 2.0;
const STEM_COLOR: Rgb = Rgb::new(0.1, 0.55, 0.2);
const CENTER_COLOR: Rgb = Rgb::new(1.0, 0.85, 0.2);
/// Fully bloomed center radius; petals sit at twice this distance
const CENTER_RADIUS: f32 = 10.0;
const PETAL_COUNT: usize = 8;
const PETAL_SEGMENTS: usize = 12;

/// A flower anchored to the ground strip.
///
/// `bloom` runs 0..=1 and only ever grows; the latch cannot be un-set.
#[derive(Debug, Clone)]
pub struct Flower {
    pub position: Vec2,
    pub petal_color: Rgb,
    pub bloom: f32,
    blooming: bool,
}

impl Flower {
    pub fn new(position: Vec2, petal_color: Rgb) -> Self {
        Self {
            position,
            petal_color,
            bloom: 0.0,
            blooming: false,
        }
    }

    /// Flip the one-way latch. Safe to call any number of times.
    pub fn start_blooming(&mut self) {
        self.blooming = true;
    }

    pub fn is_blooming(&self) -> bool {
        self.blooming
    }

    /// Grow by `bloom_step` if the latch is set, clamped to fully open.
    pub fn advance(&mut self, bloom_step: f32) {
        if self.blooming {
            self.bloom = (self.bloom + bloom_step).min(1.0);
        }
        debug_assert!((0.0..=1.0).contains(&self.bloom));
    }

    /// Stem and leaves always; center scaled by `bloom`; the 8-petal ring only
    /// once blooming has begun.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        let base = Vec2::new(self.position.x - STEM_WIDTH / 2.0, self.position.y - STEM_HEIGHT);
        sink.fill_polygon(
            &shapes::rect_points(base, STEM_WIDTH, STEM_HEIGHT),
            STEM_COLOR,
            1.0,
        );

        let leaf_y = self.position.y - STEM_HEIGHT * 0.55;
        let left_leaf = [
            Vec2::new(self.position.x, leaf_y),
            Vec2::new(self.position.x - 6.0, leaf_y - 4.0),
            Vec2::new(self.position.x, leaf_y + 4.0),
        ];
        let right_leaf = [
            Vec2::new(self.position.x, leaf_y - 2.0),
            Vec2::new(self.position.x + 6.0, leaf_y - 6.0),
            Vec2::new(self.position.x, leaf_y + 2.0),
        ];
        sink.fill_polygon(&left_leaf, STEM_COLOR, 1.0);
        sink.fill_polygon(&right_leaf, STEM_COLOR, 1.0);

        if self.blooming {
            for i in 0..PETAL_COUNT {
                let angle = (i as f32 / PETAL_COUNT as f32) * std::f32::consts::PI * 2.0;
                let petal_center = Vec2::new(
                    self.position.x + angle.cos() * self.bloom * CENTER_RADIUS * 2.0,
                    self.position.y + angle.sin() * self.bloom * CENTER_RADIUS * 2.0,
                );
                let radius = self.bloom * CENTER_RADIUS;
                sink.fill_polygon(
                    &shapes::circle_points(petal_center, radius, PETAL_SEGMENTS),
                    self.petal_color,
                    1.0,
                );
            }
        }

        sink.fill_polygon(
            &shapes::circle_points(self.position, self.bloom * CENTER_RADIUS, PETAL_SEGMENTS),
            CENTER_COLOR,
            1.0,
        );
    }
}
