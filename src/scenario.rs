//! Scenario runner with memoized projections
//!
//! Interactive callers re-run the projection after every small change. The
//! runner keeps each result keyed on the full input (every parameter and the
//! whole expense list, by value), so repeating an earlier input is a lookup.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;

use crate::expenses::Expense;
use crate::params::SimulationParameters;
use crate::projection::{ProjectionConfig, ProjectionEngine, WealthSeries};

/// Value-equality key over every projection input
///
/// Floats are keyed by bit pattern, so `0.0` and `-0.0` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectionKey {
    starting_wealth: u64,
    monthly_contribution: u64,
    equity_pct: u64,
    bond_pct: u64,
    equity_return: u64,
    bond_return: u64,
    inflation: u64,
    start_date: NaiveDate,
    duration_years: u32,
    detailed_output: bool,
    expenses: Vec<(String, u64, NaiveDate)>,
}

impl ProjectionKey {
    pub fn new(params: &SimulationParameters, expenses: &[Expense], config: &ProjectionConfig) -> Self {
        Self {
            starting_wealth: params.starting_wealth.to_bits(),
            monthly_contribution: params.monthly_contribution.to_bits(),
            equity_pct: params.allocation.equity_pct.to_bits(),
            bond_pct: params.allocation.bond_pct.to_bits(),
            equity_return: params.annual_equity_return.to_bits(),
            bond_return: params.annual_bond_return.to_bits(),
            inflation: params.annual_inflation.to_bits(),
            start_date: params.start_date,
            duration_years: params.duration_years,
            detailed_output: config.detailed_output,
            expenses: expenses
                .iter()
                .map(|e| (e.name.clone(), e.amount.to_bits(), e.date))
                .collect(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizing projection runner
///
/// # Example
/// ```ignore
/// let mut runner = ScenarioRunner::new();
/// let series = runner.run(&params, &registry.snapshot());
/// // Same inputs again: served from the cache
/// let again = runner.run(&params, &registry.snapshot());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
    cache: HashMap<ProjectionKey, WealthSeries>,
    hits: u64,
    misses: u64,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner whose projections use the given config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a single projection, reusing a cached result for identical inputs
    pub fn run(&mut self, params: &SimulationParameters, expenses: &[Expense]) -> WealthSeries {
        let key = ProjectionKey::new(params, expenses, &self.config);

        if let Some(series) = self.cache.get(&key) {
            self.hits += 1;
            debug!("Projection cache hit ({} entries)", self.cache.len());
            return series.clone();
        }

        self.misses += 1;
        let engine = ProjectionEngine::new(params.clone(), self.config.clone());
        let series = engine.project(expenses);
        self.cache.insert(key, series.clone());
        series
    }

    /// Run multiple scenarios (different parameters) against one expense list
    pub fn run_scenarios(
        &mut self,
        scenarios: &[SimulationParameters],
        expenses: &[Expense],
    ) -> Vec<WealthSeries> {
        scenarios.iter().map(|params| self.run(params, expenses)).collect()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.len(),
        }
    }

    /// Drop every cached result and reset the counters
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
