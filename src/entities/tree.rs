//! Static trees flanking the building: a trunk and a randomized leaf cloud.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::math::{shapes, Rgb, Vec2};
use crate::render::RenderSink;

const TRUNK_WIDTH: f32 = 20.0;
const TRUNK_HEIGHT: f32 = 200.0;
const TRUNK_COLOR: Rgb = Rgb::new(0.5, 0.35, 0.05);
/// Leaves scatter this far to either side of the trunk axis
const CANOPY_SPREAD: f32 = 50.0;
const LEAVES_MIN: usize = 100;
const LEAVES_EXTRA: usize = 10;
const LEAF_SIZE_MIN: f32 = 5.0;
const LEAF_SIZE_MAX: f32 = 15.0;

/// One rectangular leaf, centered on its position.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

/// A tree rooted at `base`. Entirely static after generation.
#[derive(Debug, Clone)]
pub struct Tree {
    pub base: Vec2,
    leaves: Vec<Leaf>,
}

impl Tree {
    /// Generate a tree with a randomized canopy over the trunk.
    pub fn grow(base: Vec2, rng: &mut ChaCha8Rng) -> Self {
        let count = LEAVES_MIN + rng.gen_range(0..LEAVES_EXTRA);
        let mut leaves = Vec::with_capacity(count);
        for _ in 0..count {
            leaves.push(Leaf {
                position: Vec2::new(
                    base.x + rng.gen_range(-CANOPY_SPREAD..CANOPY_SPREAD),
                    base.y + rng.gen_range(0.0..TRUNK_HEIGHT),
                ),
                width: rng.gen_range(LEAF_SIZE_MIN..LEAF_SIZE_MAX),
                height: rng.gen_range(LEAF_SIZE_MIN..LEAF_SIZE_MAX),
                // green channel only, every shade from black-green to bright
                color: Rgb::new(0.0, rng.gen::<f32>(), 0.0),
            });
        }
        Self { base, leaves }
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        let trunk_corner = Vec2::new(self.base.x - TRUNK_WIDTH / 2.0, self.base.y);
        sink.fill_polygon(
            &shapes::rect_points(trunk_corner, TRUNK_WIDTH, TRUNK_HEIGHT),
            TRUNK_COLOR,
            1.0,
        );

        for leaf in &self.leaves {
            let corner = Vec2::new(
                leaf.position.x - leaf.width / 2.0,
                leaf.position.y - leaf.height / 2.0,
            );
            sink.fill_polygon(
                &shapes::rect_points(corner, leaf.width, leaf.height),
                leaf.color,
                1.0,
            );
        }
    }
}
