//! Line-oriented interactive session
//!
//! Holds the parameters, the expense registry and a memoizing runner for the
//! lifetime of one terminal session. Rejected input is reported and the user
//! is prompted again; nothing is written to disk.

use std::io::{self, BufRead, Write};

use log::{info, warn};

use crate::error::ExpenseError;
use crate::expenses::{parse_expense_spec, Expense, ExpenseRegistry};
use crate::params::SimulationParameters;
use crate::report::{final_wealth_line, format_currency, period_line, write_expense_table, write_table};
use crate::scenario::ScenarioRunner;

const HELP: &str = "\
Commands:
  add NAME,AMOUNT,DATE   add an expense (date as YYYY-MM-DD)
  remove N               remove expense number N from the list
  list                   show the current expenses
  set FIELD VALUE        change a parameter (starting-wealth, monthly-savings,
                         equity-pct, bond-pct, equity-return, bond-return,
                         inflation, years, start-date)
  show                   show the current parameters
  run [monthly]          project wealth (yearly table unless 'monthly')
  help                   show this help
  quit                   leave the session";

/// A parsed session command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(String),
    Remove(String),
    List,
    Set { field: String, value: String },
    Show,
    Run { monthly: bool },
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "add" if !rest.is_empty() => Ok(Command::Add(rest.to_string())),
            "remove" | "rm" if !rest.is_empty() => Ok(Command::Remove(rest.to_string())),
            "list" | "ls" => Ok(Command::List),
            "set" => match rest.split_once(char::is_whitespace) {
                Some((field, value)) => Ok(Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }),
                None => Err("Usage: set FIELD VALUE".to_string()),
            },
            "show" => Ok(Command::Show),
            "run" => Ok(Command::Run { monthly: rest.eq_ignore_ascii_case("monthly") }),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "add" => Err("Usage: add NAME,AMOUNT,DATE".to_string()),
            "remove" | "rm" => Err("Usage: remove N".to_string()),
            other => Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
        }
    }
}

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session state
#[derive(Debug)]
pub struct Session {
    params: SimulationParameters,
    registry: ExpenseRegistry,
    runner: ScenarioRunner,
}

impl Session {
    pub fn new(params: SimulationParameters) -> Self {
        let registry = ExpenseRegistry::new(params.start_date);
        Self { params, registry, runner: ScenarioRunner::new() }
    }

    /// Start from an existing registry (e.g., expenses loaded from a file)
    ///
    /// Fails if any registered expense is dated before `params.start_date`.
    pub fn with_registry(
        params: SimulationParameters,
        mut registry: ExpenseRegistry,
    ) -> Result<Self, ExpenseError> {
        registry.set_simulation_start(params.start_date)?;
        Ok(Self { params, registry, runner: ScenarioRunner::new() })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn registry(&self) -> &ExpenseRegistry {
        &self.registry
    }

    pub fn runner(&self) -> &ScenarioRunner {
        &self.runner
    }

    /// Read commands from `input` until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "Investment Wealth Simulator. Type 'help' for commands.")?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            if self.execute(&line?, out)? == Flow::Quit {
                break;
            }
            write!(out, "> ")?;
            out.flush()?;
        }

        info!("Session ended with {} expenses", self.registry.len());
        Ok(())
    }

    /// Execute one command line
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Empty => {}
            Command::Add(spec) => self.add_expense(&spec, out)?,
            Command::Remove(number) => self.remove_expense(&number, out)?,
            Command::List => write_expense_table(out, self.registry.as_slice())?,
            Command::Set { field, value } => self.set_parameter(&field, &value, out)?,
            Command::Show => self.show_parameters(out)?,
            Command::Run { monthly } => self.run_projection(monthly, out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn add_expense<W: Write>(&mut self, spec: &str, out: &mut W) -> io::Result<()> {
        let (name, amount, date) = match parse_expense_spec(spec) {
            Ok(parsed) => parsed,
            Err(e) => return writeln!(out, "Error: {e}"),
        };

        match self.registry.add(name, amount, date) {
            Ok(Expense { name, date, .. }) => writeln!(out, "Added expense: {name} on {date}"),
            Err(e) => {
                warn!("Rejected expense: {e}");
                writeln!(out, "Error: {e}")
            }
        }
    }

    fn remove_expense<W: Write>(&mut self, number: &str, out: &mut W) -> io::Result<()> {
        let index = match number.trim().parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => return writeln!(out, "Error: expense numbers start at 1, got '{number}'"),
        };

        match self.registry.remove(index) {
            Ok(expense) => writeln!(out, "Removed expense: {}", expense.name),
            Err(e) => writeln!(out, "Error: {e}"),
        }
    }

    fn set_parameter<W: Write>(&mut self, field: &str, value: &str, out: &mut W) -> io::Result<()> {
        let mut params = self.params.clone();
        if let Err(e) = params.set_field(field, value) {
            return writeln!(out, "Error: {e}");
        }

        if params.start_date != self.params.start_date {
            if let Err(e) = self.registry.set_simulation_start(params.start_date) {
                warn!("Rejected start date {}: {e}", params.start_date);
                return writeln!(out, "Error: {e}. Remove it before moving the start date.");
            }
        }

        self.params = params;
        info!("Parameter {field} set to {value}");
        writeln!(out, "Set {field} = {value}")
    }

    fn show_parameters<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let p = &self.params;
        writeln!(out, "Starting wealth:      {}", format_currency(p.starting_wealth))?;
        writeln!(out, "Monthly savings:      {}", format_currency(p.monthly_contribution))?;
        writeln!(
            out,
            "Allocation:           {}% equities / {}% bonds",
            p.allocation.equity_pct, p.allocation.bond_pct
        )?;
        writeln!(out, "Equity return:        {}%", p.annual_equity_return)?;
        writeln!(out, "Bond return:          {}%", p.annual_bond_return)?;
        writeln!(out, "Inflation:            {}%", p.annual_inflation)?;
        writeln!(out, "Duration:             {} years", p.duration_years)?;
        writeln!(out, "{}", period_line(p))
    }

    fn run_projection<W: Write>(&mut self, monthly: bool, out: &mut W) -> io::Result<()> {
        if let Err(e) = self.params.validate() {
            return writeln!(out, "Error: {e}");
        }

        let series = self.runner.run(&self.params, &self.registry.snapshot());
        writeln!(out, "{}", period_line(&self.params))?;
        write_table(out, &series, !monthly)?;
        writeln!(out, "{}", final_wealth_line(&self.params, &series))
    }
}
