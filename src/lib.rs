//! Wealth Simulator - deterministic month-by-month household wealth projection
//!
//! This library provides:
//! - Simulation parameters with regional defaults and validation
//! - An expense registry guarding the dates and positions of one-off expenses
//! - The projection engine (contribution, growth, expenses, inflation per month)
//! - A memoizing scenario runner keyed on every projection input
//! - Console, CSV and JSON reporting, and a line-oriented interactive session

pub mod error;
pub mod params;
pub mod expenses;
pub mod projection;
pub mod scenario;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use error::{ExpenseError, LoadError, ParameterError};
pub use params::{Allocation, Region, SimulationParameters};
pub use expenses::{Expense, ExpenseRegistry};
pub use projection::{simulate_wealth, ProjectionEngine, ProjectionConfig, WealthPoint, WealthSeries};
pub use scenario::ScenarioRunner;
