//! Scene configuration: every tick-rate-relative constant, entity count, and
//! canvas bound the engine uses, with the defaults of the 600x800 card.
//!
//! All fields are serde-deserializable so a host can override any subset via
//! YAML; missing fields fall back to the defaults below.

use serde::Deserialize;
use thiserror::Error;

/// Fallback master seed used when a host never supplies one
pub const DEFAULT_SEED: u64 = 0x5eed_ca4d_2024_0601;

/// Errors raised while loading or validating a [`SceneConfig`].
///
/// All of these are fatal to scene setup; nothing after construction fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scene config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("canvas bounds must be positive, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },

    #[error("particle count range is inverted: {min} > {max}")]
    InvertedCountRange { min: usize, max: usize },

    #[error("sky blue floor must lie in [0, 1), got {0}")]
    BlueFloorOutOfRange(f32),

    #[error("balloon spawn height {spawn_y} lies above the canvas top {height}")]
    SpawnAboveCanvas { spawn_y: f32, height: f32 },

    #[error(
        "reveal threshold {threshold} minus banner offset {offset} lies above the \
         canvas top; the carrier would freeze before the banner is revealed"
    )]
    UnreachableReveal { threshold: f32, offset: f32 },
}

/// Tunable surface of the whole scene.
///
/// Speeds and steps are per-tick quantities; the driver is expected to tick
/// at a fixed nominal rate (60/s), so these are tick-relative, not
/// wall-clock-relative.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas width in scene units
    pub canvas_width: f32,
    /// Canvas height in scene units; y grows upward from the ground
    pub canvas_height: f32,
    /// Text revealed on the banner the carrier balloons lift
    pub banner_text: String,

    /// Decorative (recycling) balloons; two banner carriers always exist on top
    pub decorative_balloons: usize,
    /// Fireworks in the perpetually recycled pool
    pub fireworks: usize,
    /// Flowers scattered on the ground strip
    pub flowers: usize,
    /// Trees flanking the building
    pub trees: usize,
    /// Twinkling stars in the sky
    pub stars: usize,
    /// Drifting clouds in the sky
    pub clouds: usize,

    /// Height (building top) the banner must reach to trigger the reveal
    pub reveal_threshold: f32,
    /// Banner position relative to the carrier balloon (negative = below)
    pub banner_offset: f32,
    /// Below-canvas height where balloons spawn and decoratives respawn
    pub balloon_spawn_y: f32,
    /// Fixed rise speed of the two banner carriers, units/tick
    pub carrier_speed: f32,
    /// Decorative balloon speed range, units/tick
    pub decorative_speed_min: f32,
    pub decorative_speed_max: f32,
    /// Wind phase advance per tick, radians
    pub wind_step: f32,
    /// Lateral sway of the decorative tether control point, units
    pub sway_amplitude: f32,

    /// Particles per burst, sampled uniformly from this range
    pub particles_min: usize,
    pub particles_max: usize,
    /// Particle speed range, units/tick
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    /// Initial particle life
    pub particle_life: f32,
    /// Per-tick decrement applied to both particle life and burst alpha
    pub fade_step: f32,
    /// Lower edge of the vertical band where bursts ignite (top edge is the
    /// canvas top)
    pub firework_min_y: f32,

    /// Per-tick bloom increment once a flower's latch flips
    pub bloom_step: f32,

    /// Per-tick decrement of the sky's blue channel while the finale runs
    pub darken_step: f32,
    /// Floor for the sky's blue channel; kept above zero for a dim blue-black
    pub sky_blue_floor: f32,
    /// Star brightness random-walk step
    pub twinkle_step: f32,
    /// Cloud drift speed, units/tick leftward
    pub cloud_drift: f32,

    /// Ticks between window blink toggles
    pub blink_interval: u32,

    /// Master seed; every random stream is derived from it
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 800.0,
            banner_text: "Congratulations, Graduates!".to_string(),
            decorative_balloons: 3,
            fireworks: 5,
            flowers: 50,
            trees: 2,
            stars: 80,
            clouds: 4,
            reveal_threshold: 500.0,
            banner_offset: -100.0,
            balloon_spawn_y: -100.0,
            carrier_speed: 2.0,
            decorative_speed_min: 1.0,
            decorative_speed_max: 3.0,
            wind_step: 0.05,
            sway_amplitude: 8.0,
            particles_min: 100,
            particles_max: 200,
            particle_speed_min: 1.0,
            particle_speed_max: 2.0,
            particle_life: 2.0,
            fade_step: 0.01,
            firework_min_y: 500.0,
            bloom_step: 0.005,
            darken_step: 0.01,
            sky_blue_floor: 0.12,
            twinkle_step: 0.04,
            cloud_drift: 0.3,
            blink_interval: 30,
            seed: DEFAULT_SEED,
        }
    }
}

impl SceneConfig {
    /// Parse from a YAML string and validate.
    ///
    /// Absent fields take their defaults, so a host can override just the
    /// knobs it cares about.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every bound the per-tick arithmetic relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }

        for (name, count) in [
            ("decorative balloon count", self.decorative_balloons),
            ("firework count", self.fireworks),
            ("flower count", self.flowers),
            ("tree count", self.trees),
            ("star count", self.stars),
            ("cloud count", self.clouds),
            ("particle minimum", self.particles_min),
        ] {
            if count == 0 {
                return Err(ConfigError::ZeroCount { name });
            }
        }
        if self.blink_interval == 0 {
            return Err(ConfigError::ZeroCount { name: "blink interval" });
        }

        if self.particles_min > self.particles_max {
            return Err(ConfigError::InvertedCountRange {
                min: self.particles_min,
                max: self.particles_max,
            });
        }

        for (name, value) in [
            ("carrier speed", self.carrier_speed),
            ("decorative speed minimum", self.decorative_speed_min),
            ("particle speed minimum", self.particle_speed_min),
            ("particle life", self.particle_life),
            ("fade step", self.fade_step),
            ("bloom step", self.bloom_step),
            ("darken step", self.darken_step),
            ("twinkle step", self.twinkle_step),
            ("cloud drift", self.cloud_drift),
            ("wind step", self.wind_step),
            ("reveal threshold", self.reveal_threshold),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.decorative_speed_min > self.decorative_speed_max {
            return Err(ConfigError::InvertedRange {
                name: "decorative speed",
                min: self.decorative_speed_min,
                max: self.decorative_speed_max,
            });
        }
        if self.particle_speed_min > self.particle_speed_max {
            return Err(ConfigError::InvertedRange {
                name: "particle speed",
                min: self.particle_speed_min,
                max: self.particle_speed_max,
            });
        }
        if self.firework_min_y >= self.canvas_height {
            return Err(ConfigError::InvertedRange {
                name: "firework band",
                min: self.firework_min_y,
                max: self.canvas_height,
            });
        }

        if !(0.0..1.0).contains(&self.sky_blue_floor) {
            return Err(ConfigError::BlueFloorOutOfRange(self.sky_blue_floor));
        }

        // A spawn above the canvas top would trip the recycle rule before the
        // balloon is ever visible.
        if self.balloon_spawn_y > self.canvas_height {
            return Err(ConfigError::SpawnAboveCanvas {
                spawn_y: self.balloon_spawn_y,
                height: self.canvas_height,
            });
        }

        // The carrier freezes once it exits the canvas top; the banner must
        // cross the threshold before that happens or the scene stalls in the
        // ascending phase forever.
        if self.reveal_threshold - self.banner_offset > self.canvas_height {
            return Err(ConfigError::UnreachableReveal {
                threshold: self.reveal_threshold,
                offset: self.banner_offset,
            });
        }

        Ok(())
    }
}
