//! Integer canvas geometry shared by the engine, the rasterizer and the egui renderer.

/// A pixel position in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min: Point,
    pub max: Point,
}

impl PixelRect {
    /// Builds the rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x)
    }

    pub fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Restricts the rectangle to `0..width` x `0..height`.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            min: Point::new(self.min.x.clamp(0, w), self.min.y.clamp(0, h)),
            max: Point::new(self.max.x.clamp(0, w), self.max.y.clamp(0, h)),
        }
    }
}

/// Vertices of the isosceles triangle dragged from `anchor` to `current`.
///
/// Base corners sit on the current row, the apex on the anchor row halfway
/// between the two columns (rounded toward negative infinity).
pub fn triangle_points(anchor: Point, current: Point) -> [Point; 3] {
    let mid_x = (anchor.x + current.x).div_euclid(2);
    [
        Point::new(anchor.x, current.y),
        Point::new(current.x, current.y),
        Point::new(mid_x, anchor.y),
    ]
}

/// Arrowhead dimensions for a line of the given width, as `(length, half_width)`.
pub fn arrowhead_size(width: f32) -> (f32, f32) {
    (10.0 + width, 3.0 + width / 2.0)
}

/// The three corners of the arrowhead at the `to` end of a line, tip first.
///
/// The head is never longer than the line, so its base stays between the
/// endpoints. Returns `None` for a zero-length line, which has no direction.
pub fn arrowhead(from: egui::Pos2, to: egui::Pos2, width: f32) -> Option<[egui::Pos2; 3]> {
    let delta = to - from;
    let len = delta.length();
    if len <= f32::EPSILON {
        return None;
    }
    let dir = delta / len;
    let normal = egui::vec2(-dir.y, dir.x);
    let (head_len, half_width) = arrowhead_size(width);
    let head_len = head_len.min(len);
    let base = to - dir * head_len;
    Some([to, base + normal * half_width, base - normal * half_width])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_points_match_drag() {
        let [left, right, apex] = triangle_points(Point::new(10, 50), Point::new(30, 10));
        assert_eq!(left, Point::new(10, 10));
        assert_eq!(right, Point::new(30, 10));
        assert_eq!(apex, Point::new(20, 50));
    }

    #[test]
    fn test_triangle_midpoint_floors() {
        let [_, _, apex] = triangle_points(Point::new(0, 0), Point::new(5, 9));
        assert_eq!(apex.x, 2);
        let [_, _, apex] = triangle_points(Point::new(-4, 0), Point::new(1, 9));
        assert_eq!(apex.x, -2);
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let rect = PixelRect::from_corners(Point::new(40, 5), Point::new(10, 25));
        assert_eq!(rect.min, Point::new(10, 5));
        assert_eq!(rect.max, Point::new(40, 25));
        assert_eq!(rect.width(), 30);
        assert_eq!(rect.height(), 20);
    }

    #[test]
    fn test_rect_clamp_and_empty() {
        let rect = PixelRect::from_corners(Point::new(-10, -10), Point::new(500, 50));
        let clamped = rect.clamp_to(100, 100);
        assert_eq!(clamped.min, Point::ORIGIN);
        assert_eq!(clamped.max, Point::new(100, 50));

        let outside = PixelRect::from_corners(Point::new(200, 10), Point::new(300, 40));
        assert!(outside.clamp_to(100, 100).is_empty());
    }

    #[test]
    fn test_arrowhead_points_at_end() {
        let head = arrowhead(egui::pos2(0.0, 0.0), egui::pos2(100.0, 0.0), 2.0).unwrap();
        assert_eq!(head[0], egui::pos2(100.0, 0.0));
        assert!((head[1].x - 88.0).abs() < 1e-4);
        assert!((head[1].y - 4.0).abs() < 1e-4);
        assert!((head[2].y + 4.0).abs() < 1e-4);
        assert!(arrowhead(egui::pos2(3.0, 3.0), egui::pos2(3.0, 3.0), 2.0).is_none());
    }

    #[test]
    fn test_short_arrowhead_stays_within_line() {
        // 6px line, unclamped head would be 12px long
        let head = arrowhead(egui::pos2(20.0, 20.0), egui::pos2(26.0, 20.0), 2.0).unwrap();
        assert_eq!(head[0], egui::pos2(26.0, 20.0));
        for corner in &head[1..] {
            assert!((corner.x - 20.0).abs() < 1e-4);
        }

        let head = arrowhead(egui::pos2(0.0, 30.0), egui::pos2(0.0, 25.0), 4.0).unwrap();
        assert!(head.iter().all(|p| p.y >= 25.0 - 1e-4 && p.y <= 30.0 + 1e-4));
    }
}
