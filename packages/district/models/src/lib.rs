#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! District record and affordability band types.
//!
//! This crate defines the canonical district record loaded from the
//! pre-computed dataset, the four ordered affordability bands used to color
//! the map, and the per-request event type that drives a dashboard
//! recompute.

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// Lower bound (inclusive) of [`AffordabilityBand::Affordable`].
pub const AFFORDABLE_THRESHOLD: f64 = 6.0;

/// Lower bound (inclusive) of [`AffordabilityBand::Expensive`].
pub const EXPENSIVE_THRESHOLD: f64 = 9.0;

/// Lower bound (inclusive) of [`AffordabilityBand::VeryExpensive`].
pub const VERY_EXPENSIVE_THRESHOLD: f64 = 12.0;

/// Fill color used for districts that have no band (missing index).
pub const UNBANDED_COLOR: &str = "lightgrey";

/// Affordability severity band, from most to least affordable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AffordabilityBand {
    /// Index in `[0, 6)`
    #[strum(serialize = "Very Affordable")]
    VeryAffordable,
    /// Index in `[6, 9)`
    #[strum(serialize = "Affordable")]
    Affordable,
    /// Index in `[9, 12)`
    #[strum(serialize = "Expensive")]
    Expensive,
    /// Index of 12 or more
    #[strum(serialize = "Very Expensive")]
    VeryExpensive,
}

impl AffordabilityBand {
    /// Buckets an affordability index into its band.
    ///
    /// Intervals are right-open: `[0, 6)`, `[6, 9)`, `[9, 12)`, `[12, ∞)`.
    /// Returns `None` for a missing, `NaN` or negative index so that the
    /// district is drawn without a band instead of failing the render.
    #[must_use]
    pub fn from_index(index: Option<f64>) -> Option<Self> {
        let index = index?;

        if index.is_nan() || index < 0.0 {
            return None;
        }

        Some(if index < AFFORDABLE_THRESHOLD {
            Self::VeryAffordable
        } else if index < EXPENSIVE_THRESHOLD {
            Self::Affordable
        } else if index < VERY_EXPENSIVE_THRESHOLD {
            Self::Expensive
        } else {
            Self::VeryExpensive
        })
    }

    /// Fixed map fill color for this band.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryAffordable => "green",
            Self::Affordable => "yellow",
            Self::Expensive => "orange",
            Self::VeryExpensive => "red",
        }
    }

    /// Returns all variants of this enum, most affordable first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::VeryAffordable,
            Self::Affordable,
            Self::Expensive,
            Self::VeryExpensive,
        ]
    }
}

/// A local authority district as loaded from the tabular dataset.
///
/// `affordability_index` is the working value that a request may overwrite
/// on its own copy of the dataset. The pre-computed value from the source
/// file is kept separately and can only be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRecord {
    /// District code (e.g. "E09000001"). Unique within a dataset.
    pub code: String,
    /// Human-readable district name.
    pub name: String,
    /// Median house price in pounds.
    pub median_house_price: Option<f64>,
    /// Median annual salary in pounds.
    pub median_salary: Option<f64>,
    /// Current affordability index (house price ÷ salary).
    pub affordability_index: Option<f64>,
    original_affordability_index: Option<f64>,
}

impl DistrictRecord {
    /// Creates a record, snapshotting `affordability_index` as the original
    /// pre-computed value.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        median_house_price: Option<f64>,
        median_salary: Option<f64>,
        affordability_index: Option<f64>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            median_house_price,
            median_salary,
            affordability_index,
            original_affordability_index: affordability_index,
        }
    }

    /// The pre-computed index as loaded from the dataset.
    #[must_use]
    pub const fn original_affordability_index(&self) -> Option<f64> {
        self.original_affordability_index
    }

    /// Restores the working index to the pre-computed value.
    pub const fn restore_original_index(&mut self) {
        self.affordability_index = self.original_affordability_index;
    }

    /// Band for the current working index.
    #[must_use]
    pub fn band(&self) -> Option<AffordabilityBand> {
        AffordabilityBand::from_index(self.affordability_index)
    }
}

/// A single dashboard interaction.
///
/// Whichever control fired last determines the event; each event is
/// evaluated independently against the base dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardEvent {
    /// The salary input changed. `None` when the input is empty.
    SalaryChanged(Option<f64>),
    /// The reset button was clicked.
    ResetClicked,
}

/// Raw per-request input state as submitted by the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RequestState {
    /// Salary typed by the user, if any.
    pub user_salary: Option<f64>,
    /// Whether the reset button triggered this request.
    pub reset_requested: bool,
}

impl RequestState {
    /// Converts the request state into the event it represents. A reset
    /// always wins over a salary value submitted alongside it.
    #[must_use]
    pub const fn event(self) -> DashboardEvent {
        if self.reset_requested {
            DashboardEvent::ResetClicked
        } else {
            DashboardEvent::SalaryChanged(self.user_salary)
        }
    }
}
