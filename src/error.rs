//! Error types for parameter validation, the expense registry and file loading

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the expense registry
///
/// Neither is fatal: the caller reports it and asks again.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExpenseError {
    /// Expense date precedes the simulation start
    #[error("Expense date {date} is before the simulation start {start}")]
    InvalidExpenseDate {
        /// The rejected date
        date: NaiveDate,
        /// The simulation start date
        start: NaiveDate,
    },

    /// Removal of an expense that does not exist
    #[error("No expense at index {index} (registry holds {len})")]
    InvalidIndex {
        /// Requested position
        index: usize,
        /// Number of expenses currently registered
        len: usize,
    },
}

/// Errors raised while validating simulation inputs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Allocation {equity_pct}% equity / {bond_pct}% bonds must sum to 100")]
    AllocationSum { equity_pct: f64, bond_pct: f64 },

    #[error("Allocation percentage for {asset} must be within [0, 100], got {value}")]
    AllocationRange { asset: &'static str, value: f64 },

    #[error("{field} must be a non-negative amount, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be a finite rate above -100%, got {value}")]
    InvalidRate { field: &'static str, value: f64 },

    #[error("Simulation duration must be between {min} and {max} years, got {years}")]
    InvalidDuration { years: u32, min: u32, max: u32 },

    #[error("Unknown parameter field: {0}")]
    UnknownField(String),

    #[error("Could not parse {field} from '{input}'")]
    Parse { field: &'static str, input: String },
}

/// Errors raised while loading parameters or expenses from files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {row}: {source}")]
    Expense {
        row: usize,
        #[source]
        source: ExpenseError,
    },

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}
