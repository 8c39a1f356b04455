//! Sky backdrop: day color that falls to night, twinkling stars, drifting
//! clouds.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::SceneConfig;
use crate::math::{shapes, Rgb, Vec2};
use crate::render::RenderSink;

/// Daylight sky before any darkening
const DAY_COLOR: Rgb = Rgb::new(0.5, 0.8, 1.0);
const STAR_SPRITE_SIZE: f32 = 2.0;
/// Stars only populate the sky above this fraction of the canvas height
const STAR_BAND_FLOOR: f32 = 0.55;
const CLOUD_BAND_FLOOR: f32 = 0.7;
const CLOUD_BAND_CEIL: f32 = 0.95;
const CLOUD_RADIUS_X: f32 = 45.0;
const CLOUD_RADIUS_Y: f32 = 16.0;
const CLOUD_COLOR: Rgb = Rgb::new(0.97, 0.97, 1.0);
const CLOUD_ALPHA: f32 = 0.85;
const CLOUD_SEGMENTS: usize = 20;

/// Sky tuning lifted out of [`SceneConfig`].
#[derive(Debug, Clone)]
pub struct SkyParams {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub star_count: usize,
    pub cloud_count: usize,
    /// Per-call blue-channel decrement for [`Sky::darken`]
    pub darken_step: f32,
    /// Night floor for the blue channel, kept above zero
    pub blue_floor: f32,
    /// Star brightness random-walk step
    pub twinkle_step: f32,
    /// Cloud drift, units/tick leftward
    pub cloud_drift: f32,
}

impl SkyParams {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            star_count: config.stars,
            cloud_count: config.clouds,
            darken_step: config.darken_step,
            blue_floor: config.sky_blue_floor,
            twinkle_step: config.twinkle_step,
            cloud_drift: config.cloud_drift,
        }
    }
}

impl Default for SkyParams {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    pub position: Vec2,
    /// 0..=1; drawn scaled by the sky's darkness
    pub brightness: f32,
}

#[derive(Debug, Clone)]
pub struct Cloud {
    pub position: Vec2,
    pub scale: f32,
}

/// The whole backdrop. Owns its tuning so advancement calls stay small.
#[derive(Debug, Clone)]
pub struct Sky {
    params: SkyParams,
    pub color: Rgb,
    stars: Vec<Star>,
    clouds: Vec<Cloud>,
}

impl Sky {
    pub fn generate(params: SkyParams, rng: &mut ChaCha8Rng) -> Self {
        let stars = (0..params.star_count)
            .map(|_| Star {
                position: Vec2::new(
                    rng.gen_range(0.0..params.canvas_width),
                    rng.gen_range(params.canvas_height * STAR_BAND_FLOOR..params.canvas_height),
                ),
                brightness: rng.gen_range(0.2..1.0),
            })
            .collect();
        let clouds = (0..params.cloud_count)
            .map(|_| Cloud {
                position: Vec2::new(
                    rng.gen_range(0.0..params.canvas_width),
                    rng.gen_range(
                        params.canvas_height * CLOUD_BAND_FLOOR
                            ..params.canvas_height * CLOUD_BAND_CEIL,
                    ),
                ),
                scale: rng.gen_range(0.6..1.4),
            })
            .collect();

        Self {
            params,
            color: DAY_COLOR,
            stars,
            clouds,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    /// Each star's brightness takes one bounded random-walk step.
    pub fn advance_stars(&mut self, rng: &mut ChaCha8Rng) {
        for star in &mut self.stars {
            let delta = match rng.gen_range(0..3) {
                0 => -self.params.twinkle_step,
                1 => 0.0,
                _ => self.params.twinkle_step,
            };
            star.brightness = (star.brightness + delta).clamp(0.0, 1.0);
        }
    }

    /// Drift clouds leftward; a cloud fully off the left edge re-enters from
    /// the right with a new height and size.
    pub fn advance_clouds(&mut self, rng: &mut ChaCha8Rng) {
        for cloud in &mut self.clouds {
            cloud.position.x -= self.params.cloud_drift;
            let extent = CLOUD_RADIUS_X * cloud.scale * 1.6;
            if cloud.position.x < -extent {
                cloud.position.x = self.params.canvas_width + extent;
                cloud.position.y = rng.gen_range(
                    self.params.canvas_height * CLOUD_BAND_FLOOR
                        ..self.params.canvas_height * CLOUD_BAND_CEIL,
                );
                cloud.scale = rng.gen_range(0.6..1.4);
            }
        }
    }

    /// One step of nightfall: the blue channel sinks toward its floor. The
    /// floor stays above zero so the night never reaches pure black.
    pub fn darken(&mut self) {
        self.color.b = (self.color.b - self.params.darken_step).max(self.params.blue_floor);
        debug_assert!(self.color.b >= self.params.blue_floor);
    }

    /// How far nightfall has come, 0 (day) to 1 (blue at its floor).
    pub fn darkness(&self) -> f32 {
        let span = DAY_COLOR.b - self.params.blue_floor;
        ((DAY_COLOR.b - self.color.b) / span).clamp(0.0, 1.0)
    }

    /// Backdrop fill, then stars (alpha = brightness x darkness), then clouds.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.clear(self.color);

        let darkness = self.darkness();
        if darkness > 0.0 {
            for star in &self.stars {
                sink.draw_points(
                    &[star.position],
                    STAR_SPRITE_SIZE,
                    Rgb::WHITE,
                    star.brightness * darkness,
                );
            }
        }

        for cloud in &self.clouds {
            let offsets = [
                (0.0, 0.0, 1.0),
                (-CLOUD_RADIUS_X * 0.7, -CLOUD_RADIUS_Y * 0.3, 0.7),
                (CLOUD_RADIUS_X * 0.7, -CLOUD_RADIUS_Y * 0.2, 0.75),
            ];
            for (dx, dy, blob_scale) in offsets {
                let center = Vec2::new(
                    cloud.position.x + dx * cloud.scale,
                    cloud.position.y + dy * cloud.scale,
                );
                sink.fill_polygon(
                    &shapes::ellipse_points(
                        center,
                        CLOUD_RADIUS_X * cloud.scale * blob_scale,
                        CLOUD_RADIUS_Y * cloud.scale * blob_scale,
                        CLOUD_SEGMENTS,
                    ),
                    CLOUD_COLOR,
                    CLOUD_ALPHA,
                );
            }
        }
    }
}
