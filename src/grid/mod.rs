//! Grids of hexagons: layouts, storage, and the algorithms that run over them.

mod calculator;
// This interior module is private; we reexport its contents.
#[allow(clippy::module_inception)]
mod grid;
mod layout;
mod pathing;
mod storage;

pub use calculator::{rotate, HexagonalGridCalculator, Rotation};
pub use grid::HexagonalGrid;
pub use layout::{GridLayout, WideEdge};
pub use pathing::{PathingAgent, Traversable};
pub use storage::Storage;
