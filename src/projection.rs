//! Compound-growth projection
//!
//! Year-by-year future value of a lump sum plus a fixed monthly contribution.
//! Contributions are annualised (`monthly * 12`) and compounded yearly.

use crate::models::ProjectionPoint;

/// Project the value of an investment schedule for years `0..=timeline_years`.
///
/// Inputs are expected to be non-negative; range checks happen in
/// [`PlanInput::validate`](crate::models::PlanInput::validate).
pub fn project(
    initial_investment: f64,
    monthly_contribution: f64,
    annual_rate: f64,
    timeline_years: u32,
) -> Vec<ProjectionPoint> {
    let annual_contribution = monthly_contribution * 12.0;

    (0..=timeline_years)
        .map(|year| {
            let growth = (1.0 + annual_rate).powi(year as i32);
            let fv_initial = initial_investment * growth;

            // Annuity sum degenerates to a linear term at 0%
            let fv_contributions = if annual_rate > 0.0 {
                annual_contribution * ((growth - 1.0) / annual_rate)
            } else {
                annual_contribution * year as f64
            };

            ProjectionPoint {
                year,
                value: fv_initial + fv_contributions,
            }
        })
        .collect()
}

/// Last value of a series, 0 when empty
pub fn final_value(series: &[ProjectionPoint]) -> f64 {
    series.last().map(|p| p.value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(series: &[ProjectionPoint]) -> Vec<f64> {
        series.iter().map(|p| p.value).collect()
    }

    #[test]
    fn test_length_and_year_zero() {
        for years in [1, 5, 20, 50] {
            let series = project(50_000.0, 15_000.0, 0.09, years);
            assert_eq!(series.len(), years as usize + 1);
            assert_eq!(series[0].year, 0);
            assert_eq!(series[0].value, 50_000.0);
            assert_eq!(series.last().unwrap().year, years);
        }
    }

    #[test]
    fn test_lump_sum_single_year() {
        let series = project(1000.0, 0.0, 0.10, 1);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0], ProjectionPoint { year: 0, value: 1000.0 });
        assert_eq!(series[1].year, 1);
        assert!((series[1].value - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let series = project(0.0, 1000.0, 0.0, 3);
        assert_eq!(values(&series), vec![0.0, 12_000.0, 24_000.0, 36_000.0]);
    }

    #[test]
    fn test_non_decreasing() {
        for rate in [0.0, 0.06, 0.09, 0.12] {
            let series = project(25_000.0, 5_000.0, rate, 50);
            assert!(series.windows(2).all(|w| w[1].value >= w[0].value));
        }

        let idle = project(0.0, 0.0, 0.12, 10);
        assert!(idle.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_deterministic() {
        let a = project(50_000.0, 15_000.0, 0.09, 20);
        let b = project(50_000.0, 15_000.0, 0.09, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_scenario() {
        let series = project(50_000.0, 15_000.0, 0.09, 20);
        let actual = final_value(&series);

        let growth = 1.09_f64.powf(20.0);
        let expected = 50_000.0 * growth + 15_000.0 * 12.0 * (growth - 1.0) / 0.09;

        let relative_error = ((actual - expected) / expected).abs();
        assert!(relative_error < 1e-6, "relative error {}", relative_error);
        assert!(actual < 10_000_000.0);
    }

    #[test]
    fn test_final_value_empty() {
        assert_eq!(final_value(&[]), 0.0);
    }
}
