pub mod vec2;
pub mod color;
pub mod curve;
pub mod shapes;

pub use vec2::Vec2;
pub use color::Rgb;
pub use curve::QuadraticBezier;
