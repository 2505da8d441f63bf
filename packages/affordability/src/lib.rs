#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Affordability dashboard core.
//!
//! Holds the immutable [`DataContext`] built at startup and the stateless
//! recompute-and-render cycle run for every interaction: the affordability
//! index is recomputed on a copy of the dataset, bucketed into bands,
//! joined with the district boundaries into a choropleth, and summarised
//! into the five most and least affordable districts.

pub mod context;
pub mod controller;
pub mod format;
pub mod map;
pub mod ranking;
pub mod recompute;

pub use context::{ContextError, DataContext};
pub use controller::{DashboardView, handle_event};
pub use map::{ChoroplethMap, LegendEntry};
pub use ranking::{RankingRow, Rankings};
pub use recompute::{INVALID_SALARY_WARNING, Recomputed};

pub use housing_map_geography::DEFAULT_KEY_PROPERTY;
