//! Polygon builders for the handful of shapes the scene is made of.

use super::Vec2;

/// Counter-clockwise rectangle from its bottom-left corner.
pub fn rect_points(bottom_left: Vec2, width: f32, height: f32) -> [Vec2; 4] {
    [
        bottom_left,
        Vec2::new(bottom_left.x + width, bottom_left.y),
        Vec2::new(bottom_left.x + width, bottom_left.y + height),
        Vec2::new(bottom_left.x, bottom_left.y + height),
    ]
}

/// Regular polygon approximating an ellipse, counter-clockwise.
pub fn ellipse_points(center: Vec2, radius_x: f32, radius_y: f32, segments: usize) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(segments);
    for i in 0..segments {
        let angle = (i as f32 / segments as f32) * std::f32::consts::PI * 2.0;
        points.push(Vec2::new(
            center.x + angle.cos() * radius_x,
            center.y + angle.sin() * radius_y,
        ));
    }
    points
}

/// Regular polygon approximating a circle.
pub fn circle_points(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    ellipse_points(center, radius, radius, segments)
}
