//! One-off expenses and the registry that owns them

mod registry;
pub mod loader;

pub use loader::{load_expenses, load_expenses_from_reader, parse_expense_spec};
pub use registry::{Expense, ExpenseRegistry};
