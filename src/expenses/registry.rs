//! Session-owned list of one-off expenses

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::report::format_currency;

/// A one-off withdrawal scheduled for a calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self { name: name.into(), amount, date }
    }
}

/// Mutable, insertion-ordered expense list
///
/// The registry only guards its two operations; it does not keep the list
/// sorted. Projections take a [`snapshot`](Self::snapshot) and sort that.
#[derive(Debug, Clone)]
pub struct ExpenseRegistry {
    simulation_start: NaiveDate,
    expenses: Vec<Expense>,
}

impl ExpenseRegistry {
    /// Create an empty registry guarding against dates before `simulation_start`
    pub fn new(simulation_start: NaiveDate) -> Self {
        Self { simulation_start, expenses: Vec::new() }
    }

    pub fn simulation_start(&self) -> NaiveDate {
        self.simulation_start
    }

    /// Move the simulation start
    ///
    /// Fails with `InvalidExpenseDate` for the earliest registered expense if
    /// it would fall before the new start; the registry is left unchanged.
    pub fn set_simulation_start(&mut self, start: NaiveDate) -> Result<(), ExpenseError> {
        if let Some(earliest) = self.expenses.iter().map(|e| e.date).min() {
            if earliest < start {
                return Err(ExpenseError::InvalidExpenseDate { date: earliest, start });
            }
        }

        self.simulation_start = start;
        Ok(())
    }

    /// Append an expense, rejecting dates before the simulation start
    ///
    /// Amounts are not checked here; the CSV loader and the
    /// `NAME,AMOUNT,DATE` parser reject negative and non-finite values.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Result<&Expense, ExpenseError> {
        if date < self.simulation_start {
            return Err(ExpenseError::InvalidExpenseDate {
                date,
                start: self.simulation_start,
            });
        }

        let expense = Expense::new(name, amount, date);
        info!(
            "Added expense: {} of {} on {}",
            expense.name,
            format_currency(expense.amount),
            expense.date
        );
        let index = self.expenses.len();
        self.expenses.push(expense);
        Ok(&self.expenses[index])
    }

    /// Remove the expense at `index` (0-based) and return it
    pub fn remove(&mut self, index: usize) -> Result<Expense, ExpenseError> {
        if index >= self.expenses.len() {
            return Err(ExpenseError::InvalidIndex { index, len: self.expenses.len() });
        }

        let expense = self.expenses.remove(index);
        info!(
            "Removed expense: {} of {} on {}",
            expense.name,
            format_currency(expense.amount),
            expense.date
        );
        Ok(expense)
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.expenses.iter()
    }

    pub fn as_slice(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Owned copy of the current list, for handing to a projection
    pub fn snapshot(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// Sum of all registered amounts
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

impl<'a> IntoIterator for &'a ExpenseRegistry {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.expenses.iter()
    }
}
