//! Running state of a wealth projection

use crate::params::SimulationParameters;

/// Convert an annual percentage rate to its monthly effective rate: (1+r)^(1/12) - 1
pub fn monthly_rate(annual_pct: f64) -> f64 {
    (1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Monthly effective rates derived once per projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRates {
    pub equity_return: f64,
    pub bond_return: f64,
    pub inflation: f64,
}

impl MonthlyRates {
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self {
            equity_return: monthly_rate(params.annual_equity_return),
            bond_return: monthly_rate(params.annual_bond_return),
            inflation: monthly_rate(params.annual_inflation),
        }
    }

    /// Allocation-weighted monthly portfolio return
    pub fn blended_return(&self, params: &SimulationParameters) -> f64 {
        params.allocation.equity_fraction() * self.equity_return
            + params.allocation.bond_fraction() * self.bond_return
    }
}

/// State carried from one month to the next
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Number of months recorded so far
    pub projection_month: u32,

    /// Wealth in start-date currency
    pub wealth: f64,

    /// Index of the next unapplied expense in the date-sorted list
    pub expense_cursor: usize,
}

impl ProjectionState {
    pub fn new(starting_wealth: f64) -> Self {
        Self {
            projection_month: 0,
            wealth: starting_wealth,
            expense_cursor: 0,
        }
    }
}
