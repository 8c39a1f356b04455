//! Firework bursts for the finale: radial particle shells that fade out and
//! relaunch themselves at a fresh origin.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::SceneConfig;
use crate::math::{Rgb, Vec2};
use crate::render::RenderSink;

/// On-screen size of one burst particle, scene units
const PARTICLE_SPRITE_SIZE: f32 = 3.0;

/// Tuning for burst generation, lifted out of [`SceneConfig`].
#[derive(Debug, Clone)]
pub struct FireworkParams {
    /// Horizontal span where bursts may ignite
    pub canvas_width: f32,
    /// Vertical band where bursts may ignite
    pub band_min_y: f32,
    pub band_max_y: f32,
    /// Particles per burst, inclusive range
    pub particles_min: usize,
    pub particles_max: usize,
    /// Radial particle speed, units/tick, inclusive range
    pub speed_min: f32,
    pub speed_max: f32,
    /// Starting life of every particle
    pub life: f32,
    /// Per-tick decrement for particle life and burst alpha
    pub fade_step: f32,
}

impl FireworkParams {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            canvas_width: config.canvas_width,
            band_min_y: config.firework_min_y,
            band_max_y: config.canvas_height,
            particles_min: config.particles_min,
            particles_max: config.particles_max,
            speed_min: config.particle_speed_min,
            speed_max: config.particle_speed_max,
            life: config.particle_life,
            fade_step: config.fade_step,
        }
    }
}

impl Default for FireworkParams {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

/// One shell fragment flying out of a burst.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub color: Rgb,
}

/// A single recycling firework burst.
///
/// The burst fades as a whole through `alpha` and, once fully faded,
/// immediately reinitializes itself at a new random origin so the pool never
/// needs external respawning.
#[derive(Debug, Clone)]
pub struct Firework {
    pub origin: Vec2,
    pub alpha: f32,
    particles: Vec<Particle>,
}

impl Firework {
    /// Launch a fresh burst at a random origin inside the configured band.
    pub fn ignite(params: &FireworkParams, rng: &mut ChaCha8Rng) -> Self {
        let mut firework = Self {
            origin: Vec2::ZERO,
            alpha: 1.0,
            particles: Vec::new(),
        };
        firework.reinitialize(params, rng);
        firework
    }

    /// Re-seed the burst: new origin, full alpha, fresh shell.
    pub fn reinitialize(&mut self, params: &FireworkParams, rng: &mut ChaCha8Rng) {
        self.origin = Vec2::new(
            rng.gen_range(0.0..params.canvas_width),
            rng.gen_range(params.band_min_y..params.band_max_y),
        );
        self.alpha = 1.0;

        let count = rng.gen_range(params.particles_min..=params.particles_max);
        self.particles.clear();
        for _ in 0..count {
            let angle = rng.gen_range(0.0..std::f32::consts::PI * 2.0);
            let speed = rng.gen_range(params.speed_min..=params.speed_max);
            self.particles.push(Particle {
                position: self.origin,
                velocity: Vec2::from_angle(angle).scale(speed),
                life: params.life,
                color: Rgb::random(rng),
            });
        }
        debug_assert!(
            self.particles.len() >= params.particles_min
                && self.particles.len() <= params.particles_max
        );
    }

    /// Advance one tick: drift particles, fade, relaunch when fully faded.
    pub fn advance(&mut self, params: &FireworkParams, rng: &mut ChaCha8Rng) {
        for particle in &mut self.particles {
            particle.position = particle.position + particle.velocity;
            particle.life = (particle.life - params.fade_step).max(0.0);
        }
        self.alpha -= params.fade_step;
        if self.is_faded_out() {
            self.reinitialize(params, rng);
        }
        debug_assert!(self.alpha <= 1.0);
    }

    /// Whether the burst has fully faded. `advance` relaunches on this, so a
    /// burst is only ever observed faded between the decrement and the reinit.
    pub fn is_faded_out(&self) -> bool {
        self.alpha <= 0.0
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Draw the still-living shell fragments as point sprites. Each fragment's
    /// opacity compounds the burst fade with its own remaining life.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        for particle in self.particles.iter().filter(|p| p.life > 0.0) {
            sink.draw_points(
                &[particle.position],
                PARTICLE_SPRITE_SIZE,
                particle.color,
                (self.alpha * particle.life).clamp(0.0, 1.0),
            );
        }
    }
}
