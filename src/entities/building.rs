//! The venue building: gray facade, a 5x6 window grid, and the red doorstep
//! carpet with its invitation prompt.
//!
//! One window column lights up once the scene is activated and blinks on a
//! fixed cadence; lit windows carry a small exclamation glyph that stays put
//! even while the fill blinks off.

use crate::math::{shapes, Rgb, Vec2};
use crate::render::RenderSink;

const FACADE_COLOR: Rgb = Rgb::new(0.6, 0.6, 0.6);
const WINDOW_DARK: Rgb = Rgb::new(0.3, 0.3, 0.3);
const WINDOW_LIT: Rgb = Rgb::new(1.0, 1.0, 0.0);
const CARPET_COLOR: Rgb = Rgb::new(0.8, 0.2, 0.2);
const PROMPT_COLOR: Rgb = Rgb::new(1.0, 1.0, 1.0);
const GLYPH_COLOR: Rgb = Rgb::BLACK;

const FACADE_LEFT: f32 = 150.0;
const FACADE_RIGHT: f32 = 450.0;
const FACADE_BOTTOM: f32 = 100.0;
const FACADE_TOP: f32 = 500.0;

/// Window columns start here and repeat every `WINDOW_STRIDE`
const GRID_ORIGIN_X: i32 = 160;
const GRID_ORIGIN_Y: i32 = 120;
const GRID_END_X: i32 = 440;
const GRID_END_Y: i32 = 480;
const WINDOW_STRIDE: usize = 60;
const WINDOW_SIZE: f32 = 40.0;

/// The single column that lights up, and the one row in it that never does
const LIT_COLUMN_X: i32 = 280;
const UNLIT_ROW_Y: i32 = 180;

const CARPET_LEFT: f32 = 200.0;
const CARPET_WIDTH: f32 = 200.0;
const CARPET_HEIGHT: f32 = 100.0;
const PROMPT_SIZE: f32 = 18.0;

/// Building state: just the two window flags. Geometry is fixed.
#[derive(Debug, Clone)]
pub struct Building {
    windows_activated: bool,
    windows_visible: bool,
}

impl Default for Building {
    fn default() -> Self {
        Self::new()
    }
}

impl Building {
    pub fn new() -> Self {
        Self {
            windows_activated: false,
            windows_visible: true,
        }
    }

    /// Turn the lit column on. One-way, idempotent.
    pub fn activate_windows(&mut self) {
        self.windows_activated = true;
    }

    /// Blink cadence callback: flip the lit fill on/off.
    pub fn toggle_blink(&mut self) {
        self.windows_visible = !self.windows_visible;
    }

    pub fn windows_activated(&self) -> bool {
        self.windows_activated
    }

    pub fn windows_visible(&self) -> bool {
        self.windows_visible
    }

    /// Whether the window at grid position (`column_x`, `row_y`) currently
    /// shows the lit fill.
    pub fn is_window_lit(&self, column_x: i32, row_y: i32) -> bool {
        self.windows_activated
            && self.windows_visible
            && column_x == LIT_COLUMN_X
            && row_y != UNLIT_ROW_Y
    }

    /// Whether the window carries the exclamation glyph (independent of the
    /// blink fill).
    fn has_glyph(&self, column_x: i32, row_y: i32) -> bool {
        self.windows_activated && column_x == LIT_COLUMN_X && row_y != UNLIT_ROW_Y
    }

    /// Facade and window grid.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.fill_polygon(
            &shapes::rect_points(
                Vec2::new(FACADE_LEFT, FACADE_BOTTOM),
                FACADE_RIGHT - FACADE_LEFT,
                FACADE_TOP - FACADE_BOTTOM,
            ),
            FACADE_COLOR,
            1.0,
        );

        for i in (GRID_ORIGIN_X..GRID_END_X).step_by(WINDOW_STRIDE) {
            for j in (GRID_ORIGIN_Y..GRID_END_Y).step_by(WINDOW_STRIDE) {
                let fill = if self.is_window_lit(i, j) {
                    WINDOW_LIT
                } else {
                    WINDOW_DARK
                };
                sink.fill_polygon(
                    &shapes::rect_points(Vec2::new(i as f32, j as f32), WINDOW_SIZE, WINDOW_SIZE),
                    fill,
                    1.0,
                );

                if self.has_glyph(i, j) {
                    let center_x = i as f32 + WINDOW_SIZE / 2.0;
                    sink.line_strip(
                        &[
                            Vec2::new(center_x, j as f32 + 10.0),
                            Vec2::new(center_x, j as f32 + 25.0),
                        ],
                        GLYPH_COLOR,
                        1.0,
                        2.0,
                    );
                    sink.draw_points(
                        &[Vec2::new(center_x, j as f32 + 5.0)],
                        2.0,
                        GLYPH_COLOR,
                        1.0,
                    );
                }
            }
        }
    }

    /// Red carpet across the doorstep plus the invitation prompt.
    pub fn render_doorstep(&self, sink: &mut dyn RenderSink) {
        sink.fill_polygon(
            &shapes::rect_points(Vec2::new(CARPET_LEFT, 0.0), CARPET_WIDTH, CARPET_HEIGHT),
            CARPET_COLOR,
            1.0,
        );
        sink.text(
            "You Have an",
            Vec2::new(250.0, 70.0),
            PROMPT_SIZE,
            PROMPT_COLOR,
            1.0,
        );
        sink.text(
            "Invitation!",
            Vec2::new(260.0, 50.0),
            PROMPT_SIZE,
            PROMPT_COLOR,
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCmd, FrameRecorder};

    fn yellow_window_count(building: &Building) -> usize {
        let mut recorder = FrameRecorder::new();
        building.render(&mut recorder);
        recorder
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Polygon { color, .. } if *color == WINDOW_LIT))
            .count()
    }

    #[test]
    fn test_grid_is_five_by_six() {
        let building = Building::new();
        let mut recorder = FrameRecorder::new();
        building.render(&mut recorder);
        let polygons = recorder
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Polygon { .. }))
            .count();
        // facade + 30 windows
        assert_eq!(polygons, 31);
    }

    #[test]
    fn test_no_window_lit_before_activation() {
        let building = Building::new();
        assert!(!building.is_window_lit(LIT_COLUMN_X, 240));
        assert_eq!(yellow_window_count(&building), 0);
    }

    #[test]
    fn test_lit_column_skips_its_dark_row() {
        let mut building = Building::new();
        building.activate_windows();

        assert!(building.is_window_lit(LIT_COLUMN_X, 120));
        assert!(building.is_window_lit(LIT_COLUMN_X, 240));
        assert!(!building.is_window_lit(LIT_COLUMN_X, UNLIT_ROW_Y));
        assert!(!building.is_window_lit(160, 240));
        // 6 rows in the column, one stays dark
        assert_eq!(yellow_window_count(&building), 5);
    }

    #[test]
    fn test_blink_toggles_fill_but_not_glyphs() {
        let mut building = Building::new();
        building.activate_windows();
        building.toggle_blink();
        assert!(!building.windows_visible());
        assert_eq!(yellow_window_count(&building), 0);

        // Exclamation glyphs survive the off half of the blink
        let mut recorder = FrameRecorder::new();
        building.render(&mut recorder);
        let glyph_bars = recorder
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::LineStrip { .. }))
            .count();
        assert_eq!(glyph_bars, 5);

        building.toggle_blink();
        assert_eq!(yellow_window_count(&building), 5);
    }

    #[test]
    fn test_doorstep_prompt_reads_as_invitation() {
        let building = Building::new();
        let mut recorder = FrameRecorder::new();
        building.render_doorstep(&mut recorder);
        let texts: Vec<&str> = recorder.texts().collect();
        assert_eq!(texts, vec!["You Have an", "Invitation!"]);
    }
}
