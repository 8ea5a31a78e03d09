use indexmap::IndexMap;
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::geometry::{AxialCoordinate, Hexagon};

/// A keyed store of hexagons.
///
/// The grid writes into its store only while it is being built; afterwards
/// it only reads. Iteration order is whatever the store provides: insertion
/// order for [`IndexMap`], key order for [`BTreeMap`], unspecified for [`HashMap`].
pub trait Storage<T> {
    type Iter<'a>: Iterator<Item = &'a Hexagon<T>>
    where
        Self: 'a,
        T: 'a;

    /// Store a hexagon under its own coordinate, replacing any previous occupant.
    fn insert(&mut self, hexagon: Hexagon<T>);

    fn get(&self, coordinate: &AxialCoordinate) -> Option<&Hexagon<T>>;

    fn len(&self) -> usize;

    fn iter(&self) -> Self::Iter<'_>;

    fn contains(&self, coordinate: &AxialCoordinate) -> bool {
        self.get(coordinate).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, S: BuildHasher> Storage<T> for IndexMap<AxialCoordinate, Hexagon<T>, S> {
    type Iter<'a> = indexmap::map::Values<'a, AxialCoordinate, Hexagon<T>>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, hexagon: Hexagon<T>) {
        IndexMap::insert(self, hexagon.coordinate(), hexagon);
    }

    fn get(&self, coordinate: &AxialCoordinate) -> Option<&Hexagon<T>> {
        IndexMap::get(self, coordinate)
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.values()
    }
}

impl<T, S: BuildHasher> Storage<T> for HashMap<AxialCoordinate, Hexagon<T>, S> {
    type Iter<'a> = std::collections::hash_map::Values<'a, AxialCoordinate, Hexagon<T>>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, hexagon: Hexagon<T>) {
        HashMap::insert(self, hexagon.coordinate(), hexagon);
    }

    fn get(&self, coordinate: &AxialCoordinate) -> Option<&Hexagon<T>> {
        HashMap::get(self, coordinate)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.values()
    }
}

impl<T> Storage<T> for BTreeMap<AxialCoordinate, Hexagon<T>> {
    type Iter<'a> = std::collections::btree_map::Values<'a, AxialCoordinate, Hexagon<T>>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, hexagon: Hexagon<T>) {
        BTreeMap::insert(self, hexagon.coordinate(), hexagon);
    }

    fn get(&self, coordinate: &AxialCoordinate) -> Option<&Hexagon<T>> {
        BTreeMap::get(self, coordinate)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.values()
    }
}
