//! Shared read-only data loaded once at startup.

use std::path::Path;

use housing_map_dataset::DatasetError;
use housing_map_district_models::DistrictRecord;
use housing_map_geography::{BoundaryCollection, GeoError};

/// Errors that prevent the data context from being built.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// The tabular dataset failed to load.
    #[error("Failed to load district dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// The boundary collection failed to load.
    #[error("Failed to load district boundaries: {0}")]
    Geography(#[from] GeoError),
}

/// The base dataset and boundaries every request computes from.
///
/// Nothing mutates a context after construction; requests copy the district
/// records before recomputing.
#[derive(Debug, Clone)]
pub struct DataContext {
    districts: Vec<DistrictRecord>,
    boundaries: BoundaryCollection,
}

impl DataContext {
    /// Builds a context from already-loaded data.
    #[must_use]
    pub fn new(districts: Vec<DistrictRecord>, boundaries: BoundaryCollection) -> Self {
        let context = Self {
            districts,
            boundaries,
        };

        let unmatched = context.unmatched_codes();
        if !unmatched.is_empty() {
            log::warn!(
                "{} districts have no boundary and will not be drawn: {}",
                unmatched.len(),
                unmatched.join(", ")
            );
        }

        context
    }

    /// Loads the dataset CSV and boundary `GeoJSON` from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] if either file fails to load.
    pub fn load(
        districts_path: &Path,
        boundaries_path: &Path,
        key_property: &str,
    ) -> Result<Self, ContextError> {
        let districts = housing_map_dataset::load_districts(districts_path)?;
        let boundaries = housing_map_geography::load_boundaries(boundaries_path, key_property)?;

        Ok(Self::new(districts, boundaries))
    }

    /// Base district records in dataset order.
    #[must_use]
    pub fn districts(&self) -> &[DistrictRecord] {
        &self.districts
    }

    /// District boundaries.
    #[must_use]
    pub const fn boundaries(&self) -> &BoundaryCollection {
        &self.boundaries
    }

    /// Codes of districts that have no boundary, in dataset order.
    #[must_use]
    pub fn unmatched_codes(&self) -> Vec<&str> {
        self.districts
            .iter()
            .map(|d| d.code.as_str())
            .filter(|code| !self.boundaries.contains(code))
            .collect()
    }
}
