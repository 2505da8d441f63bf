#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District boundary loading.
//!
//! Reads the England and Wales local authority district boundaries from a
//! `GeoJSON` `FeatureCollection` in WGS84 longitude/latitude and indexes the
//! polygons by district code so they can be joined against the tabular
//! dataset when rendering the choropleth.

pub mod boundaries;

pub use boundaries::{BoundaryCollection, MapBounds, load_boundaries, parse_boundaries};

use thiserror::Error;

/// Property holding the district code in the ONS boundary files.
pub const DEFAULT_KEY_PROPERTY: &str = "LAD23CD";

/// Errors that can occur during geography operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The boundary file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path of the boundary file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    /// The document is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    /// A boundary has coordinates outside the longitude/latitude range,
    /// which usually means the file is still in a projected CRS.
    #[error(
        "Boundary {code} has coordinates outside WGS84 range \
         (x {min_x}..{max_x}, y {min_y}..{max_y}); reproject to EPSG:4326"
    )]
    ProjectedCoordinates {
        /// District code of the offending boundary.
        code: String,
        /// Minimum x coordinate.
        min_x: f64,
        /// Minimum y coordinate.
        min_y: f64,
        /// Maximum x coordinate.
        max_x: f64,
        /// Maximum y coordinate.
        max_y: f64,
    },

    /// No feature had both a district code and a polygonal geometry.
    #[error("No usable boundaries found using key property {key}")]
    NoBoundaries {
        /// Property that was expected to hold the district code.
        key: String,
    },
}

impl From<geojson::Error> for GeoError {
    fn from(value: geojson::Error) -> Self {
        Self::GeoJson(Box::new(value))
    }
}
