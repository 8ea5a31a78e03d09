//! Hexagonal grid coordinates and geometry.
//!
//! Maps axial hex coordinates onto pixel geometry for pointy-top and flat-top
//! hexagons, enumerates the coordinates of common grid shapes, and answers
//! distance, neighbor, pixel hit-testing and pathing queries over a grid.

pub mod config;
pub mod geometry;
pub mod grid;

pub use config::{GridConfig, GridCreationError, GridSpec};
pub use geometry::{AxialCoordinate, Direction, Hexagon, Orientation, Point, SharedHexagonData};
pub use grid::{GridLayout, HexagonalGrid, HexagonalGridCalculator};
