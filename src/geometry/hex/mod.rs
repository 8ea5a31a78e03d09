//! Hexagonal geometry support.
//!
//! Uses techniques from [this reference](https://www.redblobgames.com/grids/hexagons/)

pub mod coordinate;
pub mod direction;
pub mod hexagon;
pub mod orientation;

pub use coordinate::{AxialCoordinate, MalformedKeyError};
pub use direction::Direction;
pub use hexagon::{Hexagon, SatelliteData};
pub use orientation::{InvalidRadiusError, Orientation, SharedHexagonData};
