//! Most and least affordable district tables.

use housing_map_district_models::DistrictRecord;

use crate::format;

/// Number of districts listed in each ranking table.
pub const RANKING_SIZE: usize = 5;

/// One formatted row in a ranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    /// District code.
    pub code: String,
    /// District name.
    pub name: String,
    /// Formatted median house price, or `N/A`.
    pub house_price: String,
    /// Formatted median salary, or `N/A`.
    pub salary: String,
    /// Formatted affordability index, or `N/A`.
    pub affordability_index: String,
}

impl From<&DistrictRecord> for RankingRow {
    fn from(district: &DistrictRecord) -> Self {
        Self {
            code: district.code.clone(),
            name: district.name.clone(),
            house_price: format::currency(district.median_house_price),
            salary: format::currency(district.median_salary),
            affordability_index: format::index(district.affordability_index),
        }
    }
}

/// The two ranking tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rankings {
    /// Lowest index first.
    pub most_affordable: Vec<RankingRow>,
    /// Highest index first.
    pub least_affordable: Vec<RankingRow>,
}

/// Ranks districts by their working affordability index.
///
/// Districts without a finite index are left out of both tables. Sorting
/// is stable, so districts with equal indices keep dataset order.
#[must_use]
pub fn rank(districts: &[DistrictRecord], size: usize) -> Rankings {
    let mut ranked: Vec<(f64, &DistrictRecord)> = districts
        .iter()
        .filter_map(|d| d.affordability_index.filter(|i| i.is_finite()).map(|i| (i, d)))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    let most_affordable = ranked
        .iter()
        .take(size)
        .map(|(_, d)| RankingRow::from(*d))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    let least_affordable = ranked
        .iter()
        .take(size)
        .map(|(_, d)| RankingRow::from(*d))
        .collect();

    Rankings {
        most_affordable,
        least_affordable,
    }
}
