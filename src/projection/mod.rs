//! Projection engine for month-by-month wealth projections

mod state;
mod engine;
mod series;
pub mod schedule;

pub use state::{monthly_rate, MonthlyRates, ProjectionState};
pub use engine::{simulate_wealth, ProjectionEngine, ProjectionConfig};
pub use series::{MonthBreakdown, SeriesSummary, WealthPoint, WealthSeries};
pub use schedule::{month_end, month_ends, MonthEnds};
