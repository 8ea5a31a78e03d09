use indexmap::IndexMap;

use super::{grid::HexagonalGrid, storage::Storage};
use crate::geometry::{hex::orientation::cube_round, AxialCoordinate, Direction, Hexagon, Point};

/// Direction of a sixth-of-a-turn rotation, as seen on screen.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, parse_display::Display, parse_display::FromStr,
)]
#[display(style = "SNAKE_CASE")]
pub enum Rotation {
    /// Counterclockwise.
    Left,
    /// Clockwise.
    Right,
}

/// Algorithms over a single grid.
///
/// The calculator holds no state of its own; it borrows the grid it was made for
/// and every result is restricted to hexagons of that grid.
pub struct HexagonalGridCalculator<'g, T, S = IndexMap<AxialCoordinate, Hexagon<T>>> {
    grid: &'g HexagonalGrid<T, S>,
}

impl<T, S> Clone for HexagonalGridCalculator<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for HexagonalGridCalculator<'_, T, S> {}

impl<'g, T, S: Storage<T>> HexagonalGridCalculator<'g, T, S> {
    pub fn new(grid: &'g HexagonalGrid<T, S>) -> Self {
        HexagonalGridCalculator { grid }
    }

    pub fn grid(&self) -> &'g HexagonalGrid<T, S> {
        self.grid
    }

    /// Number of steps between two coordinates.
    ///
    /// Independent of grid membership: either coordinate may lie outside the grid.
    pub fn distance(&self, a: AxialCoordinate, b: AxialCoordinate) -> u32 {
        a.distance(b)
    }

    /// Adjacent hexagons present in the grid, in [`Direction::iter`] order.
    pub fn neighbors(
        &self,
        coordinate: AxialCoordinate,
    ) -> impl 'g + Iterator<Item = &'g Hexagon<T>> {
        let grid = self.grid;
        coordinate
            .neighbors()
            .filter_map(move |neighbor| grid.get(&neighbor))
    }

    /// The adjacent hexagon in one direction, if the grid has it.
    pub fn neighbor(
        &self,
        coordinate: AxialCoordinate,
        direction: Direction,
    ) -> Option<&'g Hexagon<T>> {
        self.grid.get(&coordinate.neighbor(direction)?)
    }

    /// The hexagon containing the pixel `(x, y)`.
    ///
    /// `None` outside the grid, and for pixels which are not finite.
    pub fn hexagon_at_pixel(&self, x: f64, y: f64) -> Option<&'g Hexagon<T>> {
        let Some(coordinate) = self.grid.shared_data().coordinate_at(Point::new(x, y)) else {
            tracing::trace!(x, y, "pixel is off the lattice");
            return None;
        };
        tracing::trace!(x, y, %coordinate, "resolved pixel");
        self.grid.get(&coordinate)
    }

    /// Every hexagon at most `distance` steps from `coordinate`, including its own.
    ///
    /// Small ranges come out in lattice order. A range covering more cells than
    /// the grid holds is answered by scanning the grid instead, in the grid's order.
    pub fn movement_range(
        &self,
        coordinate: AxialCoordinate,
        distance: u32,
    ) -> Vec<&'g Hexagon<T>> {
        if disk_size(distance) > self.grid.len() as u64 {
            return self
                .grid
                .hexagons()
                .filter(|hexagon| hexagon.coordinate().distance(coordinate) <= distance)
                .collect();
        }

        let n = i64::from(distance);
        let (x, z) = (i64::from(coordinate.x), i64::from(coordinate.z));
        (-n..=n)
            .flat_map(|dx| ((-n).max(-dx - n)..=n.min(-dx + n)).map(move |dz| (x + dx, z + dz)))
            .filter_map(|(x, z)| lattice(x, z))
            .filter_map(|coordinate| self.grid.get(&coordinate))
            .collect()
    }

    /// Hexagons exactly `radius` steps from `center`, walking counterclockwise
    /// from the southwest corner.
    pub fn ring(&self, center: AxialCoordinate, radius: u32) -> Vec<&'g Hexagon<T>> {
        if radius == 0 {
            return self.grid.get(&center).into_iter().collect();
        }

        if 6 * u64::from(radius) > self.grid.len() as u64 {
            let mut ring: Vec<_> = self
                .grid
                .hexagons()
                .filter(|hexagon| hexagon.coordinate().distance(center) == radius)
                .collect();
            ring.sort_by_key(|hexagon| ring_position(center, radius, hexagon.coordinate()));
            return ring;
        }

        ring_walk(center, radius)
            .filter_map(|(x, z)| lattice(x, z))
            .filter_map(|coordinate| self.grid.get(&coordinate))
            .collect()
    }

    /// Coordinates on the straight line between two coordinates, both ends included.
    ///
    /// Points are sampled evenly along the line and rounded onto the lattice;
    /// the endpoints are nudged slightly so ties on hexagon edges resolve consistently.
    pub fn line_coordinates(
        &self,
        from: AxialCoordinate,
        to: AxialCoordinate,
    ) -> Vec<AxialCoordinate> {
        const NUDGE_X: f64 = 1e-6;
        const NUDGE_Z: f64 = -3e-6;

        let steps = from.distance(to);
        if steps == 0 {
            return vec![from];
        }

        let (ax, az) = (from.x as f64 + NUDGE_X, from.z as f64 + NUDGE_Z);
        let (bx, bz) = (to.x as f64 + NUDGE_X, to.z as f64 + NUDGE_Z);
        (0..=steps)
            .filter_map(|step| {
                let t = step as f64 / steps as f64;
                cube_round(ax + (bx - ax) * t, az + (bz - az) * t)
            })
            .collect()
    }

    /// Hexagons of the grid on the line between two coordinates.
    ///
    /// Coordinates of the line which fall outside the grid are skipped.
    pub fn line(&self, from: AxialCoordinate, to: AxialCoordinate) -> Vec<&'g Hexagon<T>> {
        self.line_coordinates(from, to)
            .into_iter()
            .filter_map(|coordinate| self.grid.get(&coordinate))
            .collect()
    }

    /// `true` when `to` can be seen from `from`.
    ///
    /// Every hexagon on the line must be part of the grid, and none between
    /// the endpoints may be opaque.
    pub fn is_visible(
        &self,
        from: AxialCoordinate,
        to: AxialCoordinate,
        is_opaque: impl Fn(&Hexagon<T>) -> bool,
    ) -> bool {
        let line = self.line_coordinates(from, to);
        let last = line.len().saturating_sub(1);
        line.iter().enumerate().all(|(idx, coordinate)| {
            match self.grid.get(coordinate) {
                None => false,
                Some(hexagon) => idx == 0 || idx == last || !is_opaque(hexagon),
            }
        })
    }

    /// Rotate `target` around `origin` by a sixth of a turn.
    ///
    /// Returns `None` when the rotated position is not part of the grid.
    pub fn rotate(
        &self,
        origin: AxialCoordinate,
        target: AxialCoordinate,
        rotation: Rotation,
    ) -> Option<&'g Hexagon<T>> {
        self.grid.get(&rotate(origin, target, rotation)?)
    }
}

/// Rotate `target` around `origin` by a sixth of a turn.
///
/// `None` when the result would leave the `i32` coordinate range.
pub fn rotate(
    origin: AxialCoordinate,
    target: AxialCoordinate,
    rotation: Rotation,
) -> Option<AxialCoordinate> {
    let dx = i64::from(target.x) - i64::from(origin.x);
    let dz = i64::from(target.z) - i64::from(origin.z);
    let dy = -(dx + dz);
    let (rx, rz) = match rotation {
        Rotation::Right => (-dz, -dy),
        Rotation::Left => (-dy, -dx),
    };
    lattice(i64::from(origin.x) + rx, i64::from(origin.z) + rz)
}

/// Narrow a widened coordinate back into the `i32` lattice.
fn lattice(x: i64, z: i64) -> Option<AxialCoordinate> {
    Some(AxialCoordinate::new(
        i32::try_from(x).ok()?,
        i32::try_from(z).ok()?,
    ))
}

/// Number of lattice cells within `radius` steps of a cell.
fn disk_size(radius: u32) -> u64 {
    let radius = u64::from(radius);
    radius
        .saturating_mul(radius + 1)
        .saturating_mul(3)
        .saturating_add(1)
}

/// Cells of a ring, starting at the southwest corner and walking the
/// directions in order, `radius` steps each.
fn ring_walk(center: AxialCoordinate, radius: u32) -> impl Iterator<Item = (i64, i64)> {
    let r = i64::from(radius);
    let mut corner = (i64::from(center.x) - r, i64::from(center.z) + r);
    Direction::iter().flat_map(move |direction| {
        let (dx, dz) = direction.offset();
        let (dx, dz) = (i64::from(dx), i64::from(dz));
        let (x, z) = corner;
        corner = (x + r * dx, z + r * dz);
        (0..r).map(move |step| (x + step * dx, z + step * dz))
    })
}

/// Index of `coordinate` within [`ring_walk`], without walking it.
fn ring_position(center: AxialCoordinate, radius: u32, coordinate: AxialCoordinate) -> u64 {
    let r = i64::from(radius);
    let (x, z) = (i64::from(coordinate.x), i64::from(coordinate.z));
    let (mut cx, mut cz) = (i64::from(center.x) - r, i64::from(center.z) + r);
    for (side, direction) in (0u64..).zip(Direction::iter()) {
        let (dx, dz) = direction.offset();
        let (dx, dz) = (i64::from(dx), i64::from(dz));
        // every step component is -1, 0 or 1, so multiplying divides
        let step = if dx != 0 { (x - cx) * dx } else { (z - cz) * dz };
        if (0..r).contains(&step) && cx + step * dx == x && cz + step * dz == z {
            return side * u64::from(radius) + step as u64;
        }
        cx += r * dx;
        cz += r * dz;
    }
    u64::MAX
}
