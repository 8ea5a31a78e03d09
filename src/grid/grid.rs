use indexmap::{IndexMap, IndexSet};
use itertools::{Either, Itertools};
use std::{marker::PhantomData, ops::RangeInclusive, sync::Arc};

use super::{calculator::HexagonalGridCalculator, layout::GridLayout, storage::Storage};
use crate::geometry::{AxialCoordinate, Hexagon, SharedHexagonData};

/// A hexagonal grid keeps track of the hexagons of one shape.
///
/// Every hexagon shares the grid's [`SharedHexagonData`]. The set of hexagons
/// is fixed when the grid is built; only each hexagon's satellite data can
/// change afterwards.
///
/// ## Entry Points
///
/// Grids are built from a validated [`GridSpec`][crate::config::GridSpec],
/// usually obtained via [`GridConfig::validate`][crate::config::GridConfig::validate].
pub struct HexagonalGrid<T, S = IndexMap<AxialCoordinate, Hexagon<T>>> {
    shared: Arc<SharedHexagonData>,
    layout: GridLayout,
    width: u32,
    height: u32,
    store: S,
    payload: PhantomData<T>,
}

impl<T, S: Storage<T>> HexagonalGrid<T, S> {
    /// Populate `store` with one hexagon per coordinate.
    pub(crate) fn new(
        shared: SharedHexagonData,
        layout: GridLayout,
        width: u32,
        height: u32,
        coordinates: IndexSet<AxialCoordinate>,
        mut store: S,
    ) -> Self {
        let shared = Arc::new(shared);
        for coordinate in coordinates {
            store.insert(Hexagon::new(shared.clone(), coordinate));
        }
        tracing::debug!(
            %layout,
            width,
            height,
            orientation = %shared.orientation(),
            hexagons = store.len(),
            "built hexagonal grid"
        );
        HexagonalGrid {
            shared,
            layout,
            width,
            height,
            store,
            payload: PhantomData,
        }
    }

    #[inline]
    pub fn shared_data(&self) -> &SharedHexagonData {
        &self.shared
    }

    #[inline]
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Width the grid's layout was built with.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height the grid's layout was built with.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The underlying store.
    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn get(&self, coordinate: &AxialCoordinate) -> Option<&Hexagon<T>> {
        self.store.get(coordinate)
    }

    /// `true` when the coordinate belongs to this grid.
    pub fn contains(&self, coordinate: &AxialCoordinate) -> bool {
        self.store.contains(coordinate)
    }

    /// Number of hexagons in this grid.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterate over every hexagon, in the store's order.
    ///
    /// Each call starts a fresh iteration.
    pub fn hexagons(&self) -> S::Iter<'_> {
        self.store.iter()
    }

    /// Hexagons whose axial coordinates lie within the box spanned by `from` and `to`, inclusive.
    ///
    /// Ordered by `z`, then `x`.
    pub fn hexagons_by_axial_range(
        &self,
        from: AxialCoordinate,
        to: AxialCoordinate,
    ) -> impl '_ + Iterator<Item = &Hexagon<T>> {
        let xs = from.x.min(to.x)..=from.x.max(to.x);
        let zs = from.z.min(to.z)..=from.z.max(to.z);

        if box_size(&xs, &zs) <= self.len() as u64 {
            return Either::Left(
                zs.cartesian_product(xs)
                    .filter_map(move |(z, x)| self.get(&AxialCoordinate::new(x, z))),
            );
        }

        let mut found: Vec<_> = self
            .hexagons()
            .filter(|hexagon| xs.contains(&hexagon.x()) && zs.contains(&hexagon.z()))
            .collect();
        found.sort_by_key(|hexagon| (hexagon.z(), hexagon.x()));
        Either::Right(found.into_iter())
    }

    /// Hexagons within the given offset column and row ranges, row by row.
    pub fn hexagons_by_offset_range(
        &self,
        cols: RangeInclusive<i32>,
        rows: RangeInclusive<i32>,
    ) -> impl '_ + Iterator<Item = &Hexagon<T>> {
        let orientation = self.shared.orientation();

        if box_size(&cols, &rows) <= self.len() as u64 {
            return Either::Left(rows.cartesian_product(cols).filter_map(move |(row, col)| {
                self.get(&AxialCoordinate::from_offset(col, row, orientation))
            }));
        }

        let mut found: Vec<_> = self
            .hexagons()
            .map(|hexagon| (hexagon.coordinate().to_offset(orientation), hexagon))
            .filter(|((col, row), _)| cols.contains(col) && rows.contains(row))
            .collect();
        found.sort_by_key(|&((col, row), _)| (row, col));
        Either::Right(found.into_iter().map(|(_, hexagon)| hexagon))
    }

    /// Make a calculator bound to this grid.
    pub fn calculator(&self) -> HexagonalGridCalculator<'_, T, S> {
        HexagonalGridCalculator::new(self)
    }
}

/// Number of lattice cells in the box spanned by two ranges.
fn box_size(a: &RangeInclusive<i32>, b: &RangeInclusive<i32>) -> u64 {
    let span = |range: &RangeInclusive<i32>| {
        (i64::from(*range.end()) - i64::from(*range.start()) + 1).max(0) as u64
    };
    span(a).saturating_mul(span(b))
}

impl<'a, T, S> IntoIterator for &'a HexagonalGrid<T, S>
where
    S: Storage<T>,
    T: 'a,
    S: 'a,
{
    type Item = &'a Hexagon<T>;
    type IntoIter = S::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.hexagons()
    }
}

impl<T, S: Storage<T>> std::fmt::Debug for HexagonalGrid<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HexagonalGrid")
            .field("shared", &self.shared)
            .field("layout", &self.layout)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("hexagons", &self.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;

    fn grid(orientation: Orientation) -> HexagonalGrid<u8> {
        let shared = SharedHexagonData::new(orientation, 10.0).unwrap();
        let coordinates = GridLayout::Rectangular
            .coordinates(4, 3, orientation)
            .into_iter()
            .collect();
        HexagonalGrid::new(
            shared,
            GridLayout::Rectangular,
            4,
            3,
            coordinates,
            IndexMap::new(),
        )
    }

    #[test]
    fn test_lookup() {
        let grid = grid(Orientation::PointyTop);
        assert_eq!(grid.len(), 12);
        assert!(!grid.is_empty());
        let hexagon = grid.get(&AxialCoordinate::new(1, 2)).unwrap();
        assert_eq!(hexagon.coordinate(), AxialCoordinate::new(1, 2));
        assert!(grid.get(&AxialCoordinate::new(5, 0)).is_none());
        assert!(grid.contains(&AxialCoordinate::new(-1, 2)));
    }

    #[test]
    fn test_hexagons_share_data() {
        let grid = grid(Orientation::FlatTop);
        assert!(grid
            .hexagons()
            .all(|hexagon| std::ptr::eq(hexagon.shared_data(), grid.shared_data())));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let grid = grid(Orientation::PointyTop);
        let first: Vec<_> = grid.hexagons().map(Hexagon::coordinate).collect();
        let second: Vec<_> = (&grid).into_iter().map(Hexagon::coordinate).collect();
        assert_eq!(first.len(), 12);
        assert_eq!(first, second);
        assert_eq!(
            first,
            GridLayout::Rectangular.coordinates(4, 3, Orientation::PointyTop)
        );
    }

    #[test]
    fn test_axial_range() {
        let grid = grid(Orientation::PointyTop);
        let found: Vec<_> = grid
            .hexagons_by_axial_range(AxialCoordinate::new(2, 1), AxialCoordinate::new(0, 0))
            .map(Hexagon::coordinate)
            .collect();
        assert_eq!(
            found,
            vec![
                AxialCoordinate::new(0, 0),
                AxialCoordinate::new(1, 0),
                AxialCoordinate::new(2, 0),
                AxialCoordinate::new(0, 1),
                AxialCoordinate::new(1, 1),
                AxialCoordinate::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_offset_range() {
        let grid = grid(Orientation::PointyTop);
        let found: Vec<_> = grid
            .hexagons_by_offset_range(1..=2, 1..=2)
            .map(|hexagon| hexagon.coordinate().to_offset(Orientation::PointyTop))
            .collect();
        assert_eq!(found, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(grid.hexagons_by_offset_range(3..=9, 0..=9).count(), 3);
    }

    #[test]
    fn test_ranges_wider_than_grid() {
        let grid = grid(Orientation::PointyTop);
        let everything: Vec<_> = grid
            .hexagons_by_axial_range(
                AxialCoordinate::new(i32::MIN, i32::MIN),
                AxialCoordinate::new(i32::MAX, i32::MAX),
            )
            .map(Hexagon::coordinate)
            .collect();
        assert_eq!(everything.len(), 12);
        assert_eq!(everything.first(), Some(&AxialCoordinate::new(0, 0)));
        assert_eq!(everything.last(), Some(&AxialCoordinate::new(2, 2)));

        let offsets: Vec<_> = grid
            .hexagons_by_offset_range(i32::MIN..=i32::MAX, 1..=i32::MAX)
            .map(|hexagon| hexagon.coordinate().to_offset(Orientation::PointyTop))
            .collect();
        assert_eq!(
            offsets,
            vec![(0, 1), (1, 1), (2, 1), (3, 1), (0, 2), (1, 2), (2, 2), (3, 2)]
        );
        assert_eq!(grid.hexagons_by_offset_range(5..=1, 0..=2).count(), 0);
    }
}
