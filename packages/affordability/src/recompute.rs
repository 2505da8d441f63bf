//! Per-request affordability index recomputation.

use housing_map_district_models::{DashboardEvent, DistrictRecord};

/// Warning shown when the salary input is zero, negative or not a number.
pub const INVALID_SALARY_WARNING: &str = "Please enter a valid salary greater than £0.";

/// Outcome of recomputing the dataset for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputed {
    /// Copy of the base dataset with the working index set.
    pub districts: Vec<DistrictRecord>,
    /// Salary applied to every district, when one was valid.
    pub custom_salary: Option<f64>,
    /// Validation warning to surface, if any.
    pub warning: Option<&'static str>,
}

/// Recomputes every district's affordability index for an event.
///
/// The base records are cloned; the shared dataset is never modified.
/// Branches, in precedence order:
///
/// 1. reset: restore the pre-computed index, no warning
/// 2. salary `> 0`: index = house price ÷ salary, the same salary for every
///    district
/// 3. salary `<= 0` or not finite: restore and warn
/// 4. no salary: restore, no warning
#[must_use]
pub fn recompute(base: &[DistrictRecord], event: DashboardEvent) -> Recomputed {
    let mut districts = base.to_vec();

    match event {
        DashboardEvent::ResetClicked => {
            restore_all(&mut districts);
            Recomputed {
                districts,
                custom_salary: None,
                warning: None,
            }
        }
        DashboardEvent::SalaryChanged(Some(salary)) if salary.is_finite() && salary > 0.0 => {
            for district in &mut districts {
                district.affordability_index = district.median_house_price.map(|p| p / salary);
            }
            log::debug!(
                "Recomputed {} districts for salary {salary}",
                districts.len()
            );
            Recomputed {
                districts,
                custom_salary: Some(salary),
                warning: None,
            }
        }
        DashboardEvent::SalaryChanged(Some(salary)) => {
            log::debug!("Rejected salary {salary}");
            restore_all(&mut districts);
            Recomputed {
                districts,
                custom_salary: None,
                warning: Some(INVALID_SALARY_WARNING),
            }
        }
        DashboardEvent::SalaryChanged(None) => {
            restore_all(&mut districts);
            Recomputed {
                districts,
                custom_salary: None,
                warning: None,
            }
        }
    }
}

fn restore_all(districts: &mut [DistrictRecord]) {
    for district in districts {
        district.restore_original_index();
    }
}
