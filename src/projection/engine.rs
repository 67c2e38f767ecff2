//! Core projection engine for monthly wealth projections

use log::{debug, info};

use super::schedule::month_ends;
use super::series::{MonthBreakdown, WealthPoint, WealthSeries};
use super::state::{MonthlyRates, ProjectionState};
use crate::expenses::Expense;
use crate::params::SimulationParameters;
use crate::report::format_currency;

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Whether to record the monthly breakdown alongside the wealth points
    pub detailed_output: bool,
}

/// Main projection engine
///
/// Parameters are expected to have passed [`SimulationParameters::validate`];
/// the engine itself never fails.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: SimulationParameters,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(params: SimulationParameters, config: ProjectionConfig) -> Self {
        Self { params, config }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// Project wealth over every month-end of the horizon
    ///
    /// `expenses` is read, never modified; it is sorted by date into a local
    /// copy on each call.
    pub fn project(&self, expenses: &[Expense]) -> WealthSeries {
        let start = self.params.start_date;
        let end = self.params.end_date();
        info!("Starting wealth simulation: {} to {}, {} expenses", start, end, expenses.len());

        let rates = MonthlyRates::from_parameters(&self.params);

        let mut sorted: Vec<&Expense> = expenses.iter().collect();
        sorted.sort_by_key(|e| e.date);

        let mut state = ProjectionState::new(self.params.starting_wealth);
        let months = u64::from(self.params.duration_years) * 12 + 1;
        let mut series = WealthSeries::with_capacity(months as usize);

        for date in month_ends(start, end) {
            let month = self.calculate_month(date, &rates, &sorted, &mut state);
            series.push(WealthPoint { date, wealth: state.wealth });
            if self.config.detailed_output {
                series.push_breakdown(month);
            }
        }

        info!(
            "Wealth simulation completed: {} months, final wealth {}",
            series.len(),
            format_currency(state.wealth)
        );
        series
    }

    /// Advance one month: contribution, growth, expenses, inflation, in that order
    fn calculate_month(
        &self,
        date: chrono::NaiveDate,
        rates: &MonthlyRates,
        sorted_expenses: &[&Expense],
        state: &mut ProjectionState,
    ) -> MonthBreakdown {
        state.projection_month += 1;
        let opening_wealth = state.wealth;

        // Savings
        let contribution = self.params.monthly_contribution;
        state.wealth += contribution;
        debug!("{}: Added monthly savings. Total wealth: {:.2}", date, state.wealth);

        // Investment returns on the current split
        let equity_growth = state.wealth * self.params.allocation.equity_fraction() * rates.equity_return;
        let bond_growth = state.wealth * self.params.allocation.bond_fraction() * rates.bond_return;
        state.wealth += equity_growth + bond_growth;
        debug!(
            "{}: Applied returns. Equity growth: {:.2}, Bond growth: {:.2}, Total wealth: {:.2}",
            date, equity_growth, bond_growth, state.wealth
        );

        // Every expense dated on or before this month-end
        let mut expenses_paid = 0.0;
        let mut expense_names = Vec::new();
        while let Some(expense) = sorted_expenses.get(state.expense_cursor) {
            if expense.date > date {
                break;
            }
            state.wealth -= expense.amount;
            expenses_paid += expense.amount;
            if self.config.detailed_output {
                expense_names.push(expense.name.clone());
            }
            info!(
                "{}: Subtracted expense {} of {}. Total wealth: {:.2}",
                date,
                expense.name,
                format_currency(expense.amount),
                state.wealth
            );
            state.expense_cursor += 1;
        }

        // Express in start-date currency
        let nominal_wealth = state.wealth;
        state.wealth /= 1.0 + rates.inflation;
        debug!("{}: Adjusted for inflation. Total wealth: {:.2}", date, state.wealth);

        MonthBreakdown {
            projection_month: state.projection_month,
            date,
            opening_wealth,
            contribution,
            equity_growth,
            bond_growth,
            expenses_paid,
            expense_names,
            nominal_wealth,
            closing_wealth: state.wealth,
        }
    }
}

/// Project wealth for `params` against a snapshot of `expenses`
pub fn simulate_wealth(params: &SimulationParameters, expenses: &[Expense]) -> WealthSeries {
    ProjectionEngine::new(params.clone(), ProjectionConfig::default()).project(expenses)
}
