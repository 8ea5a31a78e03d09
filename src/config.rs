use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::path::Path;
use thiserror::Error;

use crate::{
    geometry::{hex::InvalidRadiusError, AxialCoordinate, Orientation, SharedHexagonData},
    grid::{GridLayout, HexagonalGrid, Storage},
};

/// Everything needed to build a grid.
///
/// A config is plain data: it can be written by hand, deserialized, or loaded
/// from a TOML file. Nothing is checked until [`GridConfig::validate`].
///
/// ```toml
/// orientation = "POINTY_TOP"
/// radius = 30.0
/// layout = "HEXAGONAL"
/// width = 9
/// height = 9
/// custom_coordinates = ["-3,4", "12,0"]
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    /// Distance from a hexagon's center to each of its vertices, in pixels.
    pub radius: f64,

    /// One of `RECTANGULAR`, `HEXAGONAL`, `TRIANGULAR`, `TRAPEZOID(TOP)`, `TRAPEZOID(BOTTOM)`.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<GridLayout>,

    pub width: u32,
    pub height: u32,

    /// Coordinates added to the layout's own, as `"x,z"` keys.
    #[serde_as(as = "Vec<DisplayFromStr>")]
    #[serde(default)]
    pub custom_coordinates: Vec<AxialCoordinate>,
}

impl GridConfig {
    pub fn new(
        orientation: Orientation,
        radius: f64,
        layout: GridLayout,
        width: u32,
        height: u32,
    ) -> Self {
        GridConfig {
            orientation: Some(orientation),
            radius,
            layout: Some(layout),
            width,
            height,
            custom_coordinates: Vec::new(),
        }
    }

    /// Add coordinates beyond those the layout produces.
    pub fn with_custom_coordinates(
        mut self,
        coordinates: impl IntoIterator<Item = AxialCoordinate>,
    ) -> Self {
        self.custom_coordinates.extend(coordinates);
        self
    }

    /// Check this configuration and enumerate the coordinates of the grid it describes.
    ///
    /// Fails before any hexagon is created.
    pub fn validate(&self) -> Result<GridSpec, GridCreationError> {
        self.validate_inner().map_err(|err| {
            tracing::debug!(%err, config = ?self, "rejected grid configuration");
            err
        })
    }

    fn validate_inner(&self) -> Result<GridSpec, GridCreationError> {
        let orientation = self
            .orientation
            .ok_or(GridCreationError::MissingOrientation)?;
        let layout = self.layout.ok_or(GridCreationError::MissingLayout)?;
        let shared = SharedHexagonData::new(orientation, self.radius)
            .map_err(|InvalidRadiusError(radius)| GridCreationError::InvalidRadius(radius))?;

        if !layout.is_valid_size(self.width, self.height) {
            return Err(GridCreationError::IncompatibleSize {
                layout,
                width: self.width,
                height: self.height,
            });
        }

        let coordinates = layout
            .coordinates(self.width, self.height, orientation)
            .into_iter()
            .chain(self.custom_coordinates.iter().copied())
            .collect();

        Ok(GridSpec {
            shared,
            layout,
            width: self.width,
            height: self.height,
            coordinates,
        })
    }

    /// Validate and build in one step, using the default store.
    pub fn build<T>(&self) -> Result<HexagonalGrid<T>, GridCreationError> {
        self.validate().map(|spec| spec.build())
    }

    pub fn from_toml(data: &str) -> Result<Self, Error> {
        toml::from_str(data).map_err(Into::into)
    }

    pub fn to_toml(&self) -> Result<String, Error> {
        toml::ser::to_string_pretty(self).map_err(Into::into)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = self.to_toml()?;
        std::fs::write(path, serialized.as_bytes()).map_err(Into::into)
    }

    /// Load a configuration file and build the grid it describes.
    pub fn load_grid<T>(path: impl AsRef<Path>) -> Result<HexagonalGrid<T>, Error> {
        Ok(Self::load(path)?.build()?)
    }
}

/// A validated grid configuration.
///
/// Holds the shared hexagon data and the full, deduplicated coordinate set:
/// the layout's coordinates in layout order, followed by any custom
/// coordinates the layout did not already produce.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    shared: SharedHexagonData,
    layout: GridLayout,
    width: u32,
    height: u32,
    coordinates: IndexSet<AxialCoordinate>,
}

impl GridSpec {
    pub fn shared_data(&self) -> &SharedHexagonData {
        &self.shared
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn coordinates(&self) -> &IndexSet<AxialCoordinate> {
        &self.coordinates
    }

    /// Build a grid backed by an insertion-ordered map.
    pub fn build<T>(&self) -> HexagonalGrid<T> {
        self.build_with_storage(IndexMap::new())
    }

    /// Build a grid backed by a caller-supplied store.
    pub fn build_with_storage<T, S: Storage<T>>(&self, store: S) -> HexagonalGrid<T, S> {
        HexagonalGrid::new(
            self.shared,
            self.layout,
            self.width,
            self.height,
            self.coordinates.clone(),
            store,
        )
    }
}

/// A grid configuration was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridCreationError {
    #[error("no orientation configured")]
    MissingOrientation,
    #[error("no layout configured")]
    MissingLayout,
    #[error("radius must be finite and positive; got {0}")]
    InvalidRadius(f64),
    #[error("{layout} layout is incompatible with width {width} and height {height}")]
    IncompatibleSize {
        layout: GridLayout,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration could not be loaded")]
    CouldNotLoad(#[from] std::io::Error),
    #[error("malformed configuration")]
    Malformed(#[from] toml::de::Error),
    #[error("failed to serialize")]
    CouldNotSerialize(#[from] toml::ser::Error),
    #[error("invalid grid configuration")]
    Creation(#[from] GridCreationError),
}
