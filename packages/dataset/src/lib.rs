#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loader for the pre-computed district affordability dataset.
//!
//! The dataset is a CSV file with one row per local authority district:
//! district code, district name, median house price, median salary and the
//! affordability index computed upstream. It is read once at startup and
//! never modified afterwards.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use housing_map_district_models::DistrictRecord;
use serde::Deserialize;

/// Errors that can occur while loading the district dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be opened or read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path of the dataset file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row has an empty district code.
    #[error("Row {row} has an empty district code")]
    EmptyCode {
        /// 1-based data row number (excluding the header).
        row: usize,
    },

    /// Two rows share the same district code.
    #[error("Duplicate district code {0}")]
    DuplicateCode(String),

    /// The file has a header but no data rows.
    #[error("Dataset contains no districts")]
    Empty,
}

/// One CSV row. Header names from the upstream processing step are accepted
/// alongside the `snake_case` field names.
#[derive(Debug, Deserialize)]
struct DistrictRow {
    #[serde(alias = "LAD code", alias = "Code")]
    code: String,
    #[serde(alias = "LAD name", alias = "Name")]
    name: String,
    #[serde(
        alias = "Median house price",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    median_house_price: Option<f64>,
    #[serde(
        alias = "Median salary",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    median_salary: Option<f64>,
    #[serde(
        alias = "Affordability index",
        alias = "Housing affordability index",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    affordability_index: Option<f64>,
}

/// Loads the district dataset from a CSV file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read, is not valid CSV,
/// contains an empty or duplicate district code, or has no rows.
pub fn load_districts(path: &Path) -> Result<Vec<DistrictRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let districts = read_districts(file)?;

    log::info!(
        "Loaded {} districts from {}",
        districts.len(),
        path.display()
    );

    Ok(districts)
}

/// Reads district rows from any CSV source.
///
/// Numeric cells that are empty or not numbers load as `None`; the record
/// is still kept so that it can be listed and drawn without a band.
///
/// # Errors
///
/// Returns [`DatasetError`] on malformed CSV, an empty or duplicate district
/// code, or when no rows are present.
pub fn read_districts(reader: impl Read) -> Result<Vec<DistrictRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen = BTreeSet::new();
    let mut districts = Vec::new();

    for (i, result) in reader.deserialize::<DistrictRow>().enumerate() {
        let row = result?;

        if row.code.is_empty() {
            return Err(DatasetError::EmptyCode { row: i + 1 });
        }
        if !seen.insert(row.code.clone()) {
            return Err(DatasetError::DuplicateCode(row.code));
        }

        if row.affordability_index.is_none() {
            log::warn!("District {} ({}) has no affordability index", row.code, row.name);
        }

        districts.push(DistrictRecord::new(
            row.code,
            row.name,
            row.median_house_price,
            row.median_salary,
            row.affordability_index,
        ));
    }

    if districts.is_empty() {
        return Err(DatasetError::Empty);
    }

    Ok(districts)
}
