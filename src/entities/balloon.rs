//! Balloons: decorative drifters plus the two banner carriers.

use crate::math::{shapes, QuadraticBezier, Rgb, Vec2};
use crate::render::RenderSink;

const BODY_RADIUS_X: f32 = 20.0;
const BODY_RADIUS_Y: f32 = 30.0;
const BODY_SEGMENTS: usize = 24;
/// Tether runs from just under the body down to its loose end
const TETHER_TOP_DROP: f32 = 10.0;
const TETHER_BOTTOM_DROP: f32 = 70.0;
const TETHER_WIDTH: f32 = 1.5;
const TETHER_COLOR: Rgb = Rgb::new(0.15, 0.15, 0.15);

/// One balloon rising through the scene.
///
/// Carriers hold the banner between them and never recycle; decoratives wrap
/// back below the canvas when they leave the top. Both rules live in the
/// director, which owns the canvas bounds.
#[derive(Debug, Clone)]
pub struct Balloon {
    pub position: Vec2,
    pub color: Rgb,
    /// Rise speed, units/tick; 0 once a carrier is frozen at the top
    pub speed: f32,
    pub is_carrier: bool,
    /// Phase of the tether sway oscillator
    pub wind_phase: f32,
}

impl Balloon {
    pub fn new(position: Vec2, color: Rgb, speed: f32, is_carrier: bool, wind_phase: f32) -> Self {
        Self {
            position,
            color,
            speed,
            is_carrier,
            wind_phase,
        }
    }

    /// One tick of motion: rise by `speed`, advance the sway oscillator.
    pub fn advance(&mut self, wind_step: f32) {
        self.position.y += self.speed;
        self.wind_phase += wind_step;
        if self.wind_phase > std::f32::consts::PI * 2.0 {
            self.wind_phase -= std::f32::consts::PI * 2.0;
        }
    }

    /// Lateral displacement of the tether control point right now.
    pub fn sway_offset(&self, amplitude: f32) -> f32 {
        amplitude * self.wind_phase.sin()
    }

    /// Pin a carrier in place once it tops out.
    pub fn freeze(&mut self) {
        self.speed = 0.0;
    }

    /// Send a decorative back below the canvas with a fresh color.
    pub fn recycle(&mut self, spawn_y: f32, color: Rgb) {
        self.position.y = spawn_y;
        self.color = color;
    }

    /// Draw body and tether. Decorative tethers bow with the wind through a
    /// quadratic curve; carrier tethers hang straight so the banner reads as
    /// taut.
    pub fn render(&self, sink: &mut dyn RenderSink, sway_amplitude: f32) {
        let top = Vec2::new(self.position.x, self.position.y - TETHER_TOP_DROP);
        let bottom = Vec2::new(self.position.x, self.position.y - TETHER_BOTTOM_DROP);

        if self.is_carrier {
            sink.line_strip(&[top, bottom], TETHER_COLOR, 1.0, TETHER_WIDTH);
        } else {
            let control = Vec2::new(
                self.position.x + self.sway_offset(sway_amplitude),
                (top.y + bottom.y) / 2.0,
            );
            let curve = QuadraticBezier::new(top, control, bottom);
            sink.line_strip(&curve.sample(10), TETHER_COLOR, 1.0, TETHER_WIDTH);
        }

        let body =
            shapes::ellipse_points(self.position, BODY_RADIUS_X, BODY_RADIUS_Y, BODY_SEGMENTS);
        sink.fill_polygon(&body, self.color, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decorative_at(y: f32, speed: f32) -> Balloon {
        Balloon::new(Vec2::new(100.0, y), Rgb::new(0.2, 0.6, 0.9), speed, false, 0.0)
    }

    #[test]
    fn test_advance_rises_by_speed() {
        let mut balloon = decorative_at(50.0, 2.5);
        balloon.advance(0.05);
        assert!((balloon.position.y - 52.5).abs() < 0.0001);
        balloon.advance(0.05);
        assert!((balloon.position.y - 55.0).abs() < 0.0001);
    }

    #[test]
    fn test_wind_phase_wraps() {
        let mut balloon = decorative_at(0.0, 0.0);
        for _ in 0..200 {
            balloon.advance(0.1);
        }
        assert!(balloon.wind_phase <= std::f32::consts::PI * 2.0);
        assert!(balloon.wind_phase >= 0.0);
    }

    #[test]
    fn test_sway_stays_within_amplitude() {
        let mut balloon = decorative_at(0.0, 0.0);
        for _ in 0..500 {
            balloon.advance(0.05);
            assert!(balloon.sway_offset(8.0).abs() <= 8.0001);
        }
    }

    #[test]
    fn test_frozen_balloon_stops_moving() {
        let mut balloon = decorative_at(810.0, 2.0);
        balloon.freeze();
        assert_eq!(balloon.speed, 0.0);
        balloon.advance(0.05);
        assert!((balloon.position.y - 810.0).abs() < 0.0001);
    }

    #[test]
    fn test_recycle_resets_height_and_recolors() {
        let mut balloon = decorative_at(820.0, 1.0);
        balloon.recycle(-100.0, Rgb::new(0.9, 0.1, 0.4));
        assert!((balloon.position.y - -100.0).abs() < 0.0001);
        assert_eq!(balloon.color, Rgb::new(0.9, 0.1, 0.4));
        // x is untouched; the balloon keeps its lane
        assert!((balloon.position.x - 100.0).abs() < 0.0001);
    }

    #[test]
    fn test_carrier_tether_is_straight() {
        use crate::render::{DrawCmd, FrameRecorder};

        let carrier = Balloon::new(Vec2::new(250.0, 300.0), Rgb::new(1.0, 0.0, 0.0), 2.0, true, 0.0);
        let mut recorder = FrameRecorder::new();
        carrier.render(&mut recorder, 8.0);

        let strip = recorder
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCmd::LineStrip { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(strip.len(), 2);
        assert!((strip[0].x - strip[1].x).abs() < 0.0001);
    }
}
