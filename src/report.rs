//! Display formatting and writers for projection results

use std::io::Write;

use serde::Serialize;

use crate::error::LoadError;
use crate::expenses::Expense;
use crate::params::SimulationParameters;
use crate::projection::{MonthBreakdown, SeriesSummary, WealthPoint, WealthSeries};

/// Currency symbol used in every human-readable amount
pub const CURRENCY_SYMBOL: &str = "€";

/// Format an amount as `€1,234,567.89`, with a leading `-` for negatives
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{CURRENCY_SYMBOL}{value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Values that round to zero print without a sign
    let sign = if value < 0.0 && int_part.chars().chain(frac_part.chars()).any(|c| c != '0') {
        "-"
    } else {
        ""
    };

    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{frac_part}")
}

/// `Simulation Period: 2024-01-01 to 2048-12-25`
pub fn period_line(params: &SimulationParameters) -> String {
    format!("Simulation Period: {} to {}", params.start_date, params.end_date())
}

/// `Final Wealth after 25 years: €1,234.56`
pub fn final_wealth_line(params: &SimulationParameters, series: &WealthSeries) -> String {
    format!(
        "Final Wealth after {} years: {}",
        params.duration_years,
        format_currency(series.summary().final_wealth)
    )
}

/// Write the expense list as a numbered table (numbers are 1-based)
pub fn write_expense_table<W: Write>(out: &mut W, expenses: &[Expense]) -> std::io::Result<()> {
    if expenses.is_empty() {
        return writeln!(out, "No significant expenses added.");
    }

    writeln!(out, "{:>3}  {:<30} {:>18}  {:<10}", "#", "Name", "Amount", "Date")?;
    for (i, expense) in expenses.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<30} {:>18}  {}",
            i + 1,
            expense.name,
            format_currency(expense.amount),
            expense.date
        )?;
    }
    Ok(())
}

/// Write the series as a console table
///
/// With `yearly`, only every twelfth month and the final month are shown.
/// When the series carries a monthly breakdown, flow columns are added.
pub fn write_table<W: Write>(out: &mut W, series: &WealthSeries, yearly: bool) -> std::io::Result<()> {
    let detailed = series.months.len() == series.points.len() && !series.months.is_empty();

    if detailed {
        writeln!(
            out,
            "{:<10} {:>18} {:>14} {:>16} {:>16}",
            "Date", "Wealth", "Contribution", "Growth", "Expenses"
        )?;
    } else {
        writeln!(out, "{:<10} {:>18}", "Date", "Wealth")?;
    }

    let rows: Vec<(usize, WealthPoint)> = if yearly {
        series
            .yearly_indices()
            .into_iter()
            .map(|i| (i, series.points[i]))
            .collect()
    } else {
        series.points.iter().copied().enumerate().collect()
    };

    for (i, point) in rows {
        if detailed {
            let month = &series.months[i];
            writeln!(
                out,
                "{:<10} {:>18} {:>14} {:>16} {:>16}",
                point.date,
                format_currency(point.wealth),
                format_currency(month.contribution),
                format_currency(month.equity_growth + month.bond_growth),
                format_currency(month.expenses_paid),
            )?;
        } else {
            writeln!(out, "{:<10} {:>18}", point.date, format_currency(point.wealth))?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CsvPointRow {
    #[serde(rename = "Date")]
    date: chrono::NaiveDate,
    #[serde(rename = "Wealth")]
    wealth: f64,
}

#[derive(Serialize)]
struct CsvBreakdownRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Date")]
    date: chrono::NaiveDate,
    #[serde(rename = "OpeningWealth")]
    opening_wealth: f64,
    #[serde(rename = "Contribution")]
    contribution: f64,
    #[serde(rename = "EquityGrowth")]
    equity_growth: f64,
    #[serde(rename = "BondGrowth")]
    bond_growth: f64,
    #[serde(rename = "Expenses")]
    expenses_paid: f64,
    #[serde(rename = "ExpenseNames")]
    expense_names: String,
    #[serde(rename = "NominalWealth")]
    nominal_wealth: f64,
    #[serde(rename = "Wealth")]
    closing_wealth: f64,
}

impl From<&MonthBreakdown> for CsvBreakdownRow {
    fn from(m: &MonthBreakdown) -> Self {
        Self {
            month: m.projection_month,
            date: m.date,
            opening_wealth: m.opening_wealth,
            contribution: m.contribution,
            equity_growth: m.equity_growth,
            bond_growth: m.bond_growth,
            expenses_paid: m.expenses_paid,
            expense_names: m.expense_names.join(";"),
            nominal_wealth: m.nominal_wealth,
            closing_wealth: m.closing_wealth,
        }
    }
}

/// Write the series as CSV at full precision
///
/// Plain series use `Date,Wealth`; series with a breakdown write one row per
/// month with every step of the month.
pub fn write_csv<W: Write>(out: W, series: &WealthSeries) -> Result<(), LoadError> {
    let mut writer = csv::Writer::from_writer(out);

    if series.months.is_empty() {
        for point in series {
            writer.serialize(CsvPointRow { date: point.date, wealth: point.wealth })?;
        }
    } else {
        for month in &series.months {
            writer.serialize(CsvBreakdownRow::from(month))?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Full JSON report
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub parameters: &'a SimulationParameters,
    pub end_date: chrono::NaiveDate,
    pub expenses: &'a [Expense],
    pub summary: SeriesSummary,
    pub series: &'a WealthSeries,
}

/// Write parameters, expenses, summary and series as pretty JSON
pub fn write_json<W: Write>(
    out: W,
    params: &SimulationParameters,
    expenses: &[Expense],
    series: &WealthSeries,
) -> Result<(), LoadError> {
    let report = JsonReport {
        parameters: params,
        end_date: params.end_date(),
        expenses,
        summary: series.summary(),
        series,
    };
    serde_json::to_writer_pretty(out, &report)?;
    Ok(())
}
