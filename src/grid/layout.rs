use itertools::Itertools;
use std::ops::Range;

use crate::geometry::{AxialCoordinate, Orientation};

/// Which edge of a trapezoid grid is the wide one.
///
/// On flat-top grids rows become columns, so `Top` is the leftmost column
/// and `Bottom` the rightmost.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "SNAKE_CASE")]
pub enum WideEdge {
    #[default]
    Top,
    Bottom,
}

/// The shape of a grid.
///
/// Each layout knows which `(width, height)` pairs it accepts and how to
/// enumerate the coordinates of a grid of that size.
///
/// Coordinates are produced row by row for pointy-top grids and column by
/// column for flat-top grids, so the order is deterministic.
///
/// Layouts are written as `RECTANGULAR`, `HEXAGONAL`, `TRIANGULAR`,
/// `TRAPEZOID(TOP)` or `TRAPEZOID(BOTTOM)`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, parse_display::Display, parse_display::FromStr,
)]
pub enum GridLayout {
    /// `height` rows of `width` cells, zig-zagging so the grid stays rectangular.
    #[display("RECTANGULAR")]
    Rectangular,
    /// A hexagon; width and height must be equal and odd.
    #[display("HEXAGONAL")]
    Hexagonal,
    /// A triangle with a right angle at the origin; width and height must be equal.
    #[display("TRIANGULAR")]
    Triangular,
    /// A trapezoid `width` cells wide at its wide edge, narrowing by one
    /// cell per row; `height` may not exceed `width`.
    #[display("TRAPEZOID({wide_edge})")]
    Trapezoid { wide_edge: WideEdge },
}

impl GridLayout {
    /// `true` when a grid of this shape can be built with the given size.
    pub fn is_valid_size(self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        match self {
            GridLayout::Rectangular => true,
            GridLayout::Hexagonal => width == height && width % 2 == 1,
            GridLayout::Triangular => width == height,
            GridLayout::Trapezoid { .. } => height <= width,
        }
    }

    /// Enumerate every coordinate of a grid of this shape.
    ///
    /// The caller is expected to have checked [`GridLayout::is_valid_size`];
    /// an invalid size yields whatever subset the shape's formula produces.
    pub fn coordinates(
        self,
        width: u32,
        height: u32,
        orientation: Orientation,
    ) -> Vec<AxialCoordinate> {
        // sizes beyond i32 could never be enumerated anyway
        let width = width.min(i32::MAX as u32) as i32;
        let height = height.min(i32::MAX as u32) as i32;

        match self {
            GridLayout::Rectangular => (0..height)
                .cartesian_product(0..width)
                .map(|(row, col)| AxialCoordinate::from_offset(col, row, orientation))
                .collect(),
            GridLayout::Hexagonal => hexagon(width, orientation),
            GridLayout::Triangular => lanes(orientation, 0..width, |lane| 0..width - lane),
            GridLayout::Trapezoid {
                wide_edge: WideEdge::Top,
            } => lanes(orientation, 0..height, |lane| 0..width - lane),
            GridLayout::Trapezoid {
                wide_edge: WideEdge::Bottom,
            } => {
                let narrow = width - height + 1;
                lanes(orientation, 0..height, |lane| -lane..narrow)
            }
        }
    }
}

/// Walk the grid lane by lane: rows (`z`) on pointy-top grids, columns (`x`) on flat-top grids.
fn lanes(
    orientation: Orientation,
    range: Range<i32>,
    cells: impl Fn(i32) -> Range<i32>,
) -> Vec<AxialCoordinate> {
    range
        .flat_map(|lane| cells(lane).map(move |cell| (lane, cell)))
        .map(|(lane, cell)| match orientation {
            Orientation::PointyTop => AxialCoordinate::new(cell, lane),
            Orientation::FlatTop => AxialCoordinate::new(lane, cell),
        })
        .collect()
}

/// Hexagon-shaped region of the given diameter, positioned near the origin.
fn hexagon(size: i32, orientation: Orientation) -> Vec<AxialCoordinate> {
    let radius = (size - 1) / 2;
    let (lane_center, cell_center) = match orientation {
        Orientation::PointyTop => (radius, (radius + 1) / 2),
        Orientation::FlatTop => (radius, radius),
    };
    lanes(orientation, 0..2 * radius + 1, |lane| {
        let offset = lane - lane_center;
        let low = (-radius).max(-radius - offset);
        let high = radius.min(radius - offset);
        cell_center + low..cell_center + high + 1
    })
}
