//! Projection output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wealth at one month-end, in start-date currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WealthPoint {
    pub date: NaiveDate,
    pub wealth: f64,
}

/// Step-by-step breakdown of one simulated month
///
/// Only recorded when the projection runs with `detailed_output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBreakdown {
    pub projection_month: u32,
    pub date: NaiveDate,

    /// Wealth carried in from the previous month
    pub opening_wealth: f64,

    pub contribution: f64,
    pub equity_growth: f64,
    pub bond_growth: f64,

    /// Sum of expenses applied this month
    pub expenses_paid: f64,

    /// Names of the expenses applied this month, in application order
    pub expense_names: Vec<String>,

    /// Wealth before the inflation adjustment
    pub nominal_wealth: f64,

    /// Wealth after the inflation adjustment
    pub closing_wealth: f64,
}

/// Complete projection result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WealthSeries {
    /// One point per month-end, in date order
    pub points: Vec<WealthPoint>,

    /// Monthly breakdown rows (empty unless detailed output was requested)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub months: Vec<MonthBreakdown>,
}

impl WealthSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(months: usize) -> Self {
        Self { points: Vec::with_capacity(months), months: Vec::new() }
    }

    pub fn push(&mut self, point: WealthPoint) {
        self.points.push(point);
    }

    pub fn push_breakdown(&mut self, month: MonthBreakdown) {
        self.months.push(month);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WealthPoint> {
        self.points.iter()
    }

    pub fn final_point(&self) -> Option<&WealthPoint> {
        self.points.last()
    }

    /// Indices of every twelfth month, plus the final month
    pub fn yearly_indices(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (11..self.points.len()).step_by(12).collect();
        if let Some(last) = self.points.len().checked_sub(1) {
            if idx.last() != Some(&last) {
                idx.push(last);
            }
        }
        idx
    }

    /// Points at 12-month steps from the first month, plus the final point
    pub fn yearly(&self) -> Vec<WealthPoint> {
        self.yearly_indices().into_iter().map(|i| self.points[i]).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> SeriesSummary {
        let min_point = self
            .points
            .iter()
            .copied()
            .min_by(|a, b| a.wealth.total_cmp(&b.wealth));
        let max_point = self
            .points
            .iter()
            .copied()
            .max_by(|a, b| a.wealth.total_cmp(&b.wealth));

        SeriesSummary {
            total_months: self.points.len() as u32,
            first_date: self.points.first().map(|p| p.date),
            final_date: self.points.last().map(|p| p.date),
            final_wealth: self.points.last().map(|p| p.wealth).unwrap_or(0.0),
            min_point,
            max_point,
            first_negative: self.points.iter().copied().find(|p| p.wealth < 0.0),
            total_contributions: self.months.iter().map(|m| m.contribution).sum(),
            total_growth: self.months.iter().map(|m| m.equity_growth + m.bond_growth).sum(),
            total_expenses: self.months.iter().map(|m| m.expenses_paid).sum(),
        }
    }
}

impl<'a> IntoIterator for &'a WealthSeries {
    type Item = &'a WealthPoint;
    type IntoIter = std::slice::Iter<'a, WealthPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Summary statistics for a projection
///
/// The flow totals (contributions, growth, expenses) are nominal sums of the
/// monthly breakdown and stay zero when detailed output was off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub total_months: u32,
    pub first_date: Option<NaiveDate>,
    pub final_date: Option<NaiveDate>,
    pub final_wealth: f64,
    pub min_point: Option<WealthPoint>,
    pub max_point: Option<WealthPoint>,
    /// First month-end at which wealth dropped below zero
    pub first_negative: Option<WealthPoint>,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub total_expenses: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: u32, wealth: f64) -> WealthPoint {
        WealthPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .checked_add_months(chrono::Months::new(month))
                .unwrap(),
            wealth,
        }
    }

    #[test]
    fn test_summary() {
        let mut series = WealthSeries::new();
        series.push(point(0, 100.0));
        series.push(point(1, -50.0));
        series.push(point(2, -80.0));
        series.push(point(3, 20.0));

        let summary = series.summary();
        assert_eq!(summary.total_months, 4);
        assert_eq!(summary.final_wealth, 20.0);
        assert_eq!(summary.min_point.unwrap().wealth, -80.0);
        assert_eq!(summary.max_point.unwrap().wealth, 100.0);
        assert_eq!(summary.first_negative.unwrap().wealth, -50.0);
        assert_eq!(summary.total_expenses, 0.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = WealthSeries::new().summary();
        assert_eq!(summary.total_months, 0);
        assert!(summary.final_date.is_none());
        assert!(summary.first_negative.is_none());
    }

    #[test]
    fn test_yearly_points() {
        let mut series = WealthSeries::new();
        for m in 0..30 {
            series.push(point(m, m as f64));
        }

        let yearly: Vec<f64> = series.yearly().iter().map(|p| p.wealth).collect();
        assert_eq!(yearly, [11.0, 23.0, 29.0]);

        let mut short = WealthSeries::new();
        short.push(point(0, 1.0));
        assert_eq!(short.yearly().len(), 1);
    }
}
