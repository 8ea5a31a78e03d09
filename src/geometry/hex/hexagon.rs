use std::{
    f64::consts::PI,
    fmt, hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{coordinate::AxialCoordinate, orientation::SharedHexagonData};
use crate::geometry::Point;

/// Caller-attached payload of a single hexagon.
///
/// Every operation takes the lock exactly once, so `set`, `get` and `clear`
/// are each indivisible with respect to one another, from any thread.
#[derive(Debug)]
pub struct SatelliteData<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for SatelliteData<T> {
    fn default() -> Self {
        SatelliteData {
            slot: Mutex::new(None),
        }
    }
}

impl<T> SatelliteData<T> {
    // The slot only ever holds a complete `Option`, so a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a value, returning whatever was there before.
    pub fn set(&self, value: impl Into<Arc<T>>) -> Option<Arc<T>> {
        self.lock().replace(value.into())
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.lock().clone()
    }

    /// Remove the value, returning it.
    pub fn clear(&self) -> Option<Arc<T>> {
        self.lock().take()
    }

    pub fn is_present(&self) -> bool {
        self.lock().is_some()
    }
}

/// A single cell of a hexagonal grid.
///
/// The center is computed once from the coordinate and the grid's shared data;
/// vertices are recomputed on every call.
///
/// Identity is the coordinate: equality, hashing and `Display` ignore geometry
/// and satellite data.
#[derive(Debug)]
pub struct Hexagon<T> {
    coordinate: AxialCoordinate,
    shared: Arc<SharedHexagonData>,
    center: Point,
    satellite: SatelliteData<T>,
}

impl<T> Hexagon<T> {
    pub fn new(shared: Arc<SharedHexagonData>, coordinate: AxialCoordinate) -> Self {
        let center = shared.center_of(coordinate);
        Hexagon {
            coordinate,
            shared,
            center,
            satellite: SatelliteData::default(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> AxialCoordinate {
        self.coordinate
    }

    /// Canonical key of this hexagon's coordinate.
    pub fn id(&self) -> String {
        self.coordinate.to_key()
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.coordinate.x
    }

    #[inline]
    pub fn y(&self) -> i64 {
        self.coordinate.y()
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.coordinate.z
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn shared_data(&self) -> &SharedHexagonData {
        &self.shared
    }

    /// The six corners of this hexagon, rotating clockwise on screen.
    ///
    /// Flat-top hexagons start at the rightmost vertex; pointy-top hexagons
    /// start half a step later, at the lower right.
    pub fn vertices(&self) -> [Point; 6] {
        let radius = self.shared.radius();
        let offset = self.shared.orientation().coordinate_offset();
        std::array::from_fn(|i| {
            let angle = 2.0 * PI / 6.0 * (i as f64 + offset);
            Point::new(
                self.center.x + radius * angle.cos(),
                self.center.y + radius * angle.sin(),
            )
        })
    }

    pub fn satellite_data(&self) -> Option<Arc<T>> {
        self.satellite.get()
    }

    /// Attach a payload, returning the one it replaces.
    pub fn set_satellite_data(&self, value: impl Into<Arc<T>>) -> Option<Arc<T>> {
        self.satellite.set(value)
    }

    pub fn clear_satellite_data(&self) -> Option<Arc<T>> {
        self.satellite.clear()
    }

    pub fn has_satellite_data(&self) -> bool {
        self.satellite.is_present()
    }
}

impl<T> PartialEq for Hexagon<T> {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}

impl<T> Eq for Hexagon<T> {}

impl<T> hash::Hash for Hexagon<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}

impl<T> fmt::Display for Hexagon<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hexagon#{{x={}, z={}}}", self.coordinate.x, self.coordinate.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;
    use std::thread;

    const RADIUS: f64 = 10.0;
    const COORDINATE: AxialCoordinate = AxialCoordinate::new(2, 3);

    #[derive(Debug, PartialEq, Eq, derive_more::Display)]
    #[display(fmt = "payload {}", _0)]
    struct Payload(u32);

    fn hexagon(orientation: Orientation) -> Hexagon<Payload> {
        let shared = SharedHexagonData::new(orientation, RADIUS).unwrap();
        Hexagon::new(Arc::new(shared), COORDINATE)
    }

    #[test]
    fn test_display() {
        assert_eq!(hexagon(Orientation::PointyTop).to_string(), "Hexagon#{x=2, z=3}");
    }

    #[test]
    fn test_grid_coordinates() {
        let hexagon = hexagon(Orientation::PointyTop);
        assert_eq!(hexagon.x(), 2);
        assert_eq!(hexagon.y(), -5);
        assert_eq!(hexagon.z(), 3);
        assert_eq!(hexagon.id(), "2,3");
    }

    #[test]
    fn test_pointy_center() {
        assert_eq!(hexagon(Orientation::PointyTop).center().round(), (69, 55));
    }

    #[test]
    fn test_flat_center() {
        assert_eq!(hexagon(Orientation::FlatTop).center().round(), (40, 78));
    }

    #[test]
    fn test_pointy_vertices() {
        let vertices: Vec<_> = hexagon(Orientation::PointyTop)
            .vertices()
            .iter()
            .map(|point| point.round())
            .collect();
        assert_eq!(
            vertices,
            vec![(78, 60), (69, 65), (61, 60), (61, 50), (69, 45), (78, 50)]
        );
    }

    #[test]
    fn test_flat_vertices() {
        let vertices: Vec<_> = hexagon(Orientation::FlatTop)
            .vertices()
            .iter()
            .map(|point| point.round())
            .collect();
        assert_eq!(
            vertices,
            vec![(50, 78), (45, 87), (35, 87), (30, 78), (35, 69), (45, 69)]
        );
    }

    #[test]
    fn test_vertices_are_one_radius_out() {
        for orientation in [Orientation::PointyTop, Orientation::FlatTop] {
            let hexagon = hexagon(orientation);
            for vertex in hexagon.vertices() {
                assert!((vertex.distance(hexagon.center()) - RADIUS).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_equality_is_by_coordinate() {
        let pointy = hexagon(Orientation::PointyTop);
        let flat = hexagon(Orientation::FlatTop);
        assert_eq!(pointy, pointy);
        assert_eq!(pointy, flat);
        flat.set_satellite_data(Payload(1));
        assert_eq!(pointy, flat);
    }

    #[test]
    fn test_set_then_get() {
        let hexagon = hexagon(Orientation::PointyTop);
        assert!(hexagon.satellite_data().is_none());
        assert!(hexagon.set_satellite_data(Payload(7)).is_none());
        assert_eq!(hexagon.satellite_data().as_deref(), Some(&Payload(7)));
        assert_eq!(hexagon.satellite_data().unwrap().to_string(), "payload 7");
    }

    #[test]
    fn test_set_then_clear() {
        let hexagon = hexagon(Orientation::PointyTop);
        hexagon.set_satellite_data(Payload(7));
        assert!(hexagon.has_satellite_data());
        assert_eq!(hexagon.clear_satellite_data().as_deref(), Some(&Payload(7)));
        assert!(hexagon.satellite_data().is_none());
        assert!(!hexagon.has_satellite_data());
    }

    #[test]
    fn test_set_replaces() {
        let hexagon = hexagon(Orientation::FlatTop);
        hexagon.set_satellite_data(Payload(1));
        let previous = hexagon.set_satellite_data(Payload(2));
        assert_eq!(previous.as_deref(), Some(&Payload(1)));
        assert_eq!(hexagon.satellite_data().as_deref(), Some(&Payload(2)));
    }

    #[test]
    fn test_concurrent_access() {
        let hexagon = hexagon(Orientation::PointyTop);
        thread::scope(|scope| {
            for n in 0..8 {
                let hexagon = &hexagon;
                scope.spawn(move || {
                    for _ in 0..100 {
                        hexagon.set_satellite_data(Payload(n));
                        if let Some(payload) = hexagon.satellite_data() {
                            assert!(payload.0 < 8);
                        }
                        hexagon.clear_satellite_data();
                    }
                });
            }
        });
        assert!(hexagon.satellite_data().is_none());
    }
}
