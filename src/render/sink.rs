//! Drawing seam between the pure scene state and whatever surface shows it.
//!
//! The scene only ever emits four primitives (filled polygons, line strips,
//! point sprites, text), so a sink is small enough to fake in tests.

use crate::math::{Rgb, Vec2};

/// Receiver for one frame's draw calls, issued back-to-front.
///
/// Coordinates are scene units: origin at the bottom-left, y growing upward.
/// Alpha is 0..=1; sinks apply it as-is.
pub trait RenderSink {
    /// Wipe the whole surface to a solid color.
    fn clear(&mut self, color: Rgb);

    /// Fill a convex polygon given in winding order.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb, alpha: f32);

    /// Stroke an open polyline.
    fn line_strip(&mut self, points: &[Vec2], color: Rgb, alpha: f32, width: f32);

    /// Draw square point sprites of `size` scene units, one per position.
    fn draw_points(&mut self, points: &[Vec2], size: f32, color: Rgb, alpha: f32);

    /// Draw text with its baseline starting at `position`.
    fn text(&mut self, content: &str, position: Vec2, size: f32, color: Rgb, alpha: f32);

    /// Draw text horizontally centered on `center_x`, baseline at `baseline_y`.
    fn text_centered(
        &mut self,
        content: &str,
        center_x: f32,
        baseline_y: f32,
        size: f32,
        color: Rgb,
        alpha: f32,
    );
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: Rgb,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Rgb,
        alpha: f32,
    },
    LineStrip {
        points: Vec<Vec2>,
        color: Rgb,
        alpha: f32,
        width: f32,
    },
    Points {
        points: Vec<Vec2>,
        size: f32,
        color: Rgb,
        alpha: f32,
    },
    Text {
        content: String,
        position: Vec2,
        size: f32,
        color: Rgb,
        alpha: f32,
        centered: bool,
    },
}

/// Sink that records the frame as a display list instead of rasterizing it.
///
/// Tests assert against the recorded commands; a host could also replay them
/// onto its own surface.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    commands: Vec<DrawCmd>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded since the last [`reset`](Self::reset).
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Drop the recorded display list, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Contents of every recorded text command, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

impl RenderSink for FrameRecorder {
    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCmd::Clear { color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb, alpha: f32) {
        self.commands.push(DrawCmd::Polygon {
            points: points.to_vec(),
            color,
            alpha,
        });
    }

    fn line_strip(&mut self, points: &[Vec2], color: Rgb, alpha: f32, width: f32) {
        self.commands.push(DrawCmd::LineStrip {
            points: points.to_vec(),
            color,
            alpha,
            width,
        });
    }

    fn draw_points(&mut self, points: &[Vec2], size: f32, color: Rgb, alpha: f32) {
        self.commands.push(DrawCmd::Points {
            points: points.to_vec(),
            size,
            color,
            alpha,
        });
    }

    fn text(&mut self, content: &str, position: Vec2, size: f32, color: Rgb, alpha: f32) {
        self.commands.push(DrawCmd::Text {
            content: content.to_string(),
            position,
            size,
            color,
            alpha,
            centered: false,
        });
    }

    fn text_centered(
        &mut self,
        content: &str,
        center_x: f32,
        baseline_y: f32,
        size: f32,
        color: Rgb,
        alpha: f32,
    ) {
        self.commands.push(DrawCmd::Text {
            content: content.to_string(),
            position: Vec2::new(center_x, baseline_y),
            size,
            color,
            alpha,
            centered: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_draw_order() {
        let mut recorder = FrameRecorder::new();
        recorder.clear(Rgb::BLACK);
        recorder.fill_polygon(
            &[Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            Rgb::WHITE,
            1.0,
        );
        recorder.text("hello", Vec2::new(5.0, 5.0), 12.0, Rgb::WHITE, 1.0);

        assert_eq!(recorder.commands().len(), 3);
        assert!(matches!(recorder.commands()[0], DrawCmd::Clear { .. }));
        assert!(matches!(recorder.commands()[2], DrawCmd::Text { .. }));
    }

    #[test]
    fn test_reset_empties_the_list() {
        let mut recorder = FrameRecorder::new();
        recorder.clear(Rgb::BLACK);
        recorder.reset();
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_texts_yields_centered_and_positioned() {
        let mut recorder = FrameRecorder::new();
        recorder.text("left", Vec2::ZERO, 10.0, Rgb::WHITE, 1.0);
        recorder.text_centered("middle", 300.0, 40.0, 10.0, Rgb::WHITE, 1.0);

        let texts: Vec<&str> = recorder.texts().collect();
        assert_eq!(texts, vec!["left", "middle"]);
    }
}
