use std::ops::{Add, Sub};

/// A position in pixel space.
///
/// `y` grows downward, matching the screen convention used by hexagon centers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    parse_display::Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Both components rounded to the nearest integer.
    ///
    /// Handy for comparing computed geometry against integer fixtures.
    pub fn round(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }

    /// Straight-line distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let delta = self - other;
        delta.x.hypot(delta.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round() {
        assert_eq!(Point::new(69.28, 54.5).round(), (69, 55));
        assert_eq!(Point::new(-0.6, 0.4).round(), (-1, 0));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
