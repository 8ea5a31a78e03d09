use std::ops::{Add, AddAssign, Sub};

use super::{direction::Direction, orientation::Orientation};

/// Axial hex coordinates.
///
/// See [reference](https://www.redblobgames.com/grids/hexagons/#coordinates).
///
/// Only `x` and `z` are stored; `y` is always derived so that
/// `x + y + z == 0` holds by construction.
///
/// The canonical key of a coordinate is `"<x>,<z>"`, which is both its
/// `Display` form and the only format accepted by `FromStr`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display("{x},{z}")]
#[from_str(regex = r"(?P<x>-?\d+),(?P<z>-?\d+)")]
pub struct AxialCoordinate {
    pub x: i32,
    pub z: i32,
}

/// A coordinate key was not of the form `<int>,<int>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed coordinate key: {0:?}")]
pub struct MalformedKeyError(pub String);

impl AxialCoordinate {
    pub const fn new(x: i32, z: i32) -> Self {
        AxialCoordinate { x, z }
    }

    /// Parse a coordinate from its canonical key.
    pub fn from_key(key: &str) -> Result<Self, MalformedKeyError> {
        key.parse()
            .map_err(|_| MalformedKeyError(key.to_owned()))
    }

    /// Canonical key; the inverse of [`AxialCoordinate::from_key`].
    pub fn to_key(&self) -> String {
        self.to_string()
    }

    /// The derived third cube coordinate.
    ///
    /// Widened to `i64`, since `-(x + z)` does not always fit an `i32`.
    #[inline]
    pub const fn y(&self) -> i64 {
        -(self.x as i64 + self.z as i64)
    }

    /// The adjacent coordinate in `direction`, or `None` past the edge of the `i32` range.
    pub fn neighbor(self, direction: Direction) -> Option<AxialCoordinate> {
        let (dx, dz) = direction.offset();
        self.checked_add(AxialCoordinate::new(dx, dz))
    }

    /// Iterate over the adjacent coordinates, in [`Direction::iter`] order.
    ///
    /// Neighbors which fall outside the `i32` range are skipped.
    pub fn neighbors(self) -> impl 'static + Iterator<Item = AxialCoordinate> {
        Direction::iter().filter_map(move |direction| self.neighbor(direction))
    }

    /// Number of steps between two coordinates.
    ///
    /// Saturates at `u32::MAX` for coordinates at opposite corners of the `i32` range.
    pub fn distance(self, other: AxialCoordinate) -> u32 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dz = i64::from(self.z) - i64::from(other.z);
        let dy = other.y() - self.y();
        let steps = dx.unsigned_abs().max(dy.unsigned_abs()).max(dz.unsigned_abs());
        u32::try_from(steps).unwrap_or(u32::MAX)
    }

    pub fn checked_add(self, rhs: AxialCoordinate) -> Option<AxialCoordinate> {
        Some(AxialCoordinate::new(
            self.x.checked_add(rhs.x)?,
            self.z.checked_add(rhs.z)?,
        ))
    }

    pub fn checked_sub(self, rhs: AxialCoordinate) -> Option<AxialCoordinate> {
        Some(AxialCoordinate::new(
            self.x.checked_sub(rhs.x)?,
            self.z.checked_sub(rhs.z)?,
        ))
    }

    /// Convert offset (column, row) coordinates into axial coordinates.
    ///
    /// Pointy-top grids shift every odd row half a cell to the right;
    /// flat-top grids shift every odd column half a cell down.
    /// Wraps at the `i32` bounds, so the conversion stays invertible.
    pub fn from_offset(col: i32, row: i32, orientation: Orientation) -> Self {
        match orientation {
            Orientation::PointyTop => {
                AxialCoordinate::new(col.wrapping_sub(row.div_euclid(2)), row)
            }
            Orientation::FlatTop => {
                AxialCoordinate::new(col, row.wrapping_sub(col.div_euclid(2)))
            }
        }
    }

    /// Convert into offset `(column, row)` coordinates.
    ///
    /// Inverse of [`AxialCoordinate::from_offset`].
    pub fn to_offset(self, orientation: Orientation) -> (i32, i32) {
        match orientation {
            Orientation::PointyTop => (self.x.wrapping_add(self.z.div_euclid(2)), self.z),
            Orientation::FlatTop => (self.x, self.z.wrapping_add(self.x.div_euclid(2))),
        }
    }
}

impl From<(i32, i32)> for AxialCoordinate {
    fn from((x, z): (i32, i32)) -> Self {
        AxialCoordinate::new(x, z)
    }
}

impl From<Direction> for AxialCoordinate {
    fn from(direction: Direction) -> Self {
        direction.offset().into()
    }
}

// Operators wrap at the `i32` bounds; use the `checked_` methods to detect it.

impl AddAssign<Direction> for AxialCoordinate {
    fn add_assign(&mut self, rhs: Direction) {
        *self = *self + AxialCoordinate::from(rhs);
    }
}

impl Add<Direction> for AxialCoordinate {
    type Output = AxialCoordinate;

    fn add(mut self, rhs: Direction) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add for AxialCoordinate {
    type Output = AxialCoordinate;

    fn add(self, rhs: AxialCoordinate) -> Self::Output {
        AxialCoordinate::new(self.x.wrapping_add(rhs.x), self.z.wrapping_add(rhs.z))
    }
}

impl Sub for AxialCoordinate {
    type Output = AxialCoordinate;

    fn sub(self, rhs: AxialCoordinate) -> Self::Output {
        AxialCoordinate::new(self.x.wrapping_sub(rhs.x), self.z.wrapping_sub(rhs.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let coordinate = AxialCoordinate::new(4, 5);
        assert_eq!(coordinate.x, 4);
        assert_eq!(coordinate.z, 5);
        assert_eq!(coordinate.y(), -9);
    }

    #[test]
    fn test_to_key() {
        assert_eq!(AxialCoordinate::new(4, 5).to_key(), "4,5");
        assert_eq!(AxialCoordinate::new(-4, 0).to_key(), "-4,0");
    }

    #[test]
    fn test_from_key() {
        assert_eq!(
            AxialCoordinate::from_key("4,5").unwrap(),
            AxialCoordinate::new(4, 5)
        );
        assert_eq!(
            AxialCoordinate::from_key("-12,-3").unwrap(),
            AxialCoordinate::new(-12, -3)
        );
    }

    #[test]
    fn test_malformed_keys() {
        for key in ["", "garbage", "1", "1,", ",1", "1,2,3", " 1,2", "1;2", "1.5,2"] {
            assert_eq!(
                AxialCoordinate::from_key(key),
                Err(MalformedKeyError(key.to_owned())),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_key_out_of_range() {
        assert!(AxialCoordinate::from_key("99999999999,0").is_err());
    }

    #[test]
    fn test_neighbors_order() {
        let neighbors: Vec<_> = AxialCoordinate::new(0, 0).neighbors().collect();
        let expect: Vec<AxialCoordinate> = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)]
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(neighbors, expect);
    }

    #[test]
    fn test_distance() {
        let origin = AxialCoordinate::new(0, 0);
        assert_eq!(origin.distance(origin), 0);
        assert_eq!(origin.distance(AxialCoordinate::new(3, -1)), 3);
        assert_eq!(AxialCoordinate::new(2, 3).distance(AxialCoordinate::new(-1, 1)), 5);
    }

    #[test]
    fn test_i32_bounds() {
        let max = AxialCoordinate::from_key("2147483647,1").unwrap();
        assert_eq!(max.y(), -2_147_483_648);
        assert_eq!(
            AxialCoordinate::new(i32::MIN, i32::MIN).y(),
            2 * 2_147_483_648
        );

        let east = AxialCoordinate::new(i32::MAX, 0);
        let west = AxialCoordinate::new(i32::MIN, 0);
        assert_eq!(east.distance(west), u32::MAX);
        assert_eq!(west.distance(east), u32::MAX);
        // the y span alone is wider than u32
        let corner = AxialCoordinate::new(i32::MAX, i32::MAX);
        let opposite = AxialCoordinate::new(i32::MIN, i32::MIN);
        assert_eq!(corner.distance(opposite), u32::MAX);

        assert_eq!(east.neighbor(Direction::East), None);
        assert_eq!(
            east.neighbor(Direction::West),
            Some(AxialCoordinate::new(i32::MAX - 1, 0))
        );
        assert_eq!(east.neighbors().count(), 4);
        assert_eq!(east.checked_sub(AxialCoordinate::new(-1, 0)), None);
        assert_eq!(east + Direction::East, west);
        assert_eq!(west - AxialCoordinate::new(1, 0), east);
    }

    #[test]
    fn test_offset_conversion_at_bounds() {
        for orientation in [Orientation::PointyTop, Orientation::FlatTop] {
            for (col, row) in [(i32::MAX, i32::MAX), (i32::MIN, i32::MAX), (i32::MAX, i32::MIN)] {
                let axial = AxialCoordinate::from_offset(col, row, orientation);
                assert_eq!(axial.to_offset(orientation), (col, row));
            }
        }
    }

    #[test]
    fn test_offset_conversion() {
        for orientation in [Orientation::PointyTop, Orientation::FlatTop] {
            for row in -3..4 {
                for col in -3..4 {
                    let axial = AxialCoordinate::from_offset(col, row, orientation);
                    assert_eq!(axial.to_offset(orientation), (col, row));
                }
            }
        }
        assert_eq!(
            AxialCoordinate::from_offset(2, 3, Orientation::PointyTop),
            AxialCoordinate::new(1, 3)
        );
        assert_eq!(
            AxialCoordinate::from_offset(3, 2, Orientation::FlatTop),
            AxialCoordinate::new(3, 1)
        );
    }
}
