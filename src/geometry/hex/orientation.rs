use serde::{Deserialize, Serialize};

use super::coordinate::AxialCoordinate;
use crate::geometry::Point;

/// Which pair of hexagon sides lies horizontally.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
    Serialize,
    Deserialize,
)]
#[display(style = "SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    /// A vertex points up; rows are horizontal.
    PointyTop,
    /// An edge lies on top; columns are vertical.
    FlatTop,
}

impl Orientation {
    /// Rotation, in sixths of a turn, of the first vertex away from the positive x axis.
    pub fn coordinate_offset(self) -> f64 {
        match self {
            Orientation::PointyTop => 0.5,
            Orientation::FlatTop => 0.0,
        }
    }
}

/// A hexagon radius was zero, negative or not finite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("radius must be finite and positive; got {0}")]
pub struct InvalidRadiusError(pub f64);

/// Configuration shared by every hexagon of a grid.
///
/// Width and height are the center-to-center spacing along each axis,
/// derived once from the radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharedHexagonData {
    orientation: Orientation,
    radius: f64,
    width: f64,
    height: f64,
}

impl SharedHexagonData {
    /// Derive the shared data.
    ///
    /// Fails unless `radius` is finite and strictly positive.
    pub fn new(orientation: Orientation, radius: f64) -> Result<Self, InvalidRadiusError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(InvalidRadiusError(radius));
        }

        let long = 3.0_f64.sqrt() * radius;
        let short = radius * 3.0 / 2.0;
        let (width, height) = match orientation {
            Orientation::PointyTop => (long, short),
            Orientation::FlatTop => (short, long),
        };

        Ok(SharedHexagonData {
            orientation,
            radius,
            width,
            height,
        })
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pixel center of the hexagon at `coordinate`.
    pub fn center_of(&self, coordinate: AxialCoordinate) -> Point {
        let x = coordinate.x as f64;
        let z = coordinate.z as f64;
        match self.orientation {
            Orientation::FlatTop => Point::new(
                x * self.width + self.radius,
                z * self.height + x * self.height / 2.0 + self.height / 2.0,
            ),
            Orientation::PointyTop => Point::new(
                x * self.width + z * self.width / 2.0 + self.width / 2.0,
                z * self.height + self.radius,
            ),
        }
    }

    /// Coordinate of the hexagon containing `point`.
    ///
    /// Inverts [`SharedHexagonData::center_of`] into fractional cube coordinates,
    /// then rounds them back onto the lattice. `None` when the point is not
    /// finite or lies beyond the `i32` coordinate range.
    pub fn coordinate_at(&self, point: Point) -> Option<AxialCoordinate> {
        let (x, z) = match self.orientation {
            Orientation::FlatTop => {
                let x = (point.x - self.radius) / self.width;
                let z = (point.y - self.height / 2.0) / self.height - x / 2.0;
                (x, z)
            }
            Orientation::PointyTop => {
                let z = (point.y - self.radius) / self.height;
                let x = (point.x - self.width / 2.0) / self.width - z / 2.0;
                (x, z)
            }
        };
        cube_round(x, z)
    }
}

/// Round fractional cube coordinates to the nearest lattice coordinate.
///
/// The component with the largest rounding error is discarded and rederived
/// from the other two, so `x + y + z == 0` survives the rounding.
pub(crate) fn cube_round(x: f64, z: f64) -> Option<AxialCoordinate> {
    let y = -x - z;
    let (mut rx, ry, mut rz) = (x.round(), y.round(), z.round());
    let (dx, dy, dz) = ((rx - x).abs(), (ry - y).abs(), (rz - z).abs());

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dz >= dy {
        rz = -rx - ry;
    }
    // otherwise y absorbs the error, and it is never stored

    Some(AxialCoordinate::new(lattice(rx)?, lattice(rz)?))
}

fn lattice(component: f64) -> Option<i32> {
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&component);
    in_range.then_some(component as i32)
}
