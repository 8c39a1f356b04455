//! Point-in-time export of the observable scene state.

use crate::scene::director::SceneDirector;

/// Flat summary of where the scene is right now.
///
/// All flowers share one latch tick and one growth step, so a single `bloom`
/// value describes the whole bed.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    pub phase: &'static str,
    pub frame: u64,
    pub carrier_y: f32,
    pub darkness: f32,
    pub bloom: f32,
    pub banner_text: String,
}

impl SceneSnapshot {
    pub fn capture(director: &SceneDirector) -> Self {
        Self {
            phase: director.phase().name(),
            frame: director.frame_count(),
            carrier_y: director.balloons()[0].position.y,
            darkness: director.sky().darkness(),
            bloom: director.flowers()[0].bloom,
            banner_text: director.config().banner_text.clone(),
        }
    }

    /// Hand-rolled JSON; the payload is tiny and flat.
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"phase":"{}","frame":{},"carrier_y":{:.2},"darkness":{:.3},"bloom":{:.3},"banner_text":"{}"}}"#,
            self.phase,
            self.frame,
            self.carrier_y,
            self.darkness,
            self.bloom,
            escape_json(&self.banner_text)
        )
    }
}

/// Escape special characters for JSON
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
