pub mod canvas;
pub mod sink;

pub use canvas::CanvasRenderer;
pub use sink::{DrawCmd, FrameRecorder, RenderSink};
