pub mod hex;
pub mod point;

pub use hex::{AxialCoordinate, Direction, Hexagon, Orientation, SharedHexagonData};
pub use point::Point;
