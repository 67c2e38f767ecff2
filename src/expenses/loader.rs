//! Load expenses from CSV

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::ExpenseRegistry;
use crate::error::{LoadError, ParameterError};
use crate::params::{parse_date, parse_number, validate_amount};

/// Raw CSV row matching the `Name,Amount,Date` layout
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Date")]
    date: NaiveDate,
}

/// Load every row of a CSV file into `registry`
///
/// Rows go through [`ExpenseRegistry::add`], so the start-date guard applies.
/// Returns the number of rows added. Loading stops at the first bad row;
/// rows before it stay registered.
pub fn load_expenses<P: AsRef<Path>>(
    path: P,
    registry: &mut ExpenseRegistry,
) -> Result<usize, LoadError> {
    let reader = Reader::from_path(path)?;
    load_rows(reader, registry)
}

/// Load expenses from any reader (e.g., string buffer)
pub fn load_expenses_from_reader<R: Read>(
    reader: R,
    registry: &mut ExpenseRegistry,
) -> Result<usize, LoadError> {
    load_rows(Reader::from_reader(reader), registry)
}

/// Parse a `NAME,AMOUNT,DATE` expense argument
///
/// The name may itself contain commas; amount and date are taken from the end.
pub fn parse_expense_spec(spec: &str) -> Result<(String, f64, NaiveDate), ParameterError> {
    let mut parts = spec.rsplitn(3, ',');
    let (date, amount, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(date), Some(amount), Some(name)) if !name.trim().is_empty() => (date, amount, name),
        _ => {
            return Err(ParameterError::Parse {
                field: "expense (expected NAME,AMOUNT,DATE)",
                input: spec.to_string(),
            })
        }
    };

    let amount = parse_number("expense amount", amount)?;
    validate_amount("expense amount", amount)?;
    let date = parse_date("expense date", date)?;

    Ok((name.trim().to_string(), amount, date))
}

fn load_rows<R: Read>(mut reader: Reader<R>, registry: &mut ExpenseRegistry) -> Result<usize, LoadError> {
    let mut added = 0;

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        validate_amount("expense amount", row.amount)?;
        registry
            .add(row.name, row.amount, row.date)
            .map_err(|source| LoadError::Expense { row: i + 1, source })?;
        added += 1;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpenseError;

    fn registry() -> ExpenseRegistry {
        ExpenseRegistry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn test_load_expenses() {
        let csv = "Name,Amount,Date\n\
                   House Purchase,300000,2029-01-01\n\
                   \"Wedding, big\",25000.50,2026-06-30\n";
        let mut registry = registry();

        let added = load_expenses_from_reader(csv.as_bytes(), &mut registry).unwrap();
        assert_eq!(added, 2);
        assert_eq!(registry.get(1).unwrap().name, "Wedding, big");
        assert_eq!(registry.get(1).unwrap().amount, 25_000.5);
    }

    #[test]
    fn test_past_date_reports_row() {
        let csv = "Name,Amount,Date\nOk,1,2024-05-01\nOld,1,2020-01-01\n";
        let mut registry = registry();

        let err = load_expenses_from_reader(csv.as_bytes(), &mut registry).unwrap_err();
        match err {
            LoadError::Expense { row, source } => {
                assert_eq!(row, 2);
                assert!(matches!(source, ExpenseError::InvalidExpenseDate { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let csv = "Name,Amount,Date\nRefund,-10,2024-05-01\n";
        let err = load_expenses_from_reader(csv.as_bytes(), &mut registry()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parameter(ParameterError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_parse_expense_spec() {
        let (name, amount, date) = parse_expense_spec("House Purchase, 300000, 2029-01-01").unwrap();
        assert_eq!(name, "House Purchase");
        assert_eq!(amount, 300_000.0);
        assert_eq!(date, NaiveDate::from_ymd_opt(2029, 1, 1).unwrap());

        let (name, _, _) = parse_expense_spec("Kids, school,12000,2030-09-01").unwrap();
        assert_eq!(name, "Kids, school");
    }

    #[test]
    fn test_parse_expense_spec_errors() {
        assert!(matches!(
            parse_expense_spec("Car,20000"),
            Err(ParameterError::Parse { .. })
        ));
        assert!(matches!(
            parse_expense_spec(",1,2030-01-01"),
            Err(ParameterError::Parse { .. })
        ));
        assert!(matches!(
            parse_expense_spec("Car,-5,2030-01-01"),
            Err(ParameterError::NegativeAmount { .. })
        ));
        assert!(matches!(
            parse_expense_spec("Car,5,next year"),
            Err(ParameterError::Parse { field: "expense date", .. })
        ));
    }

    #[test]
    fn test_malformed_date() {
        let csv = "Name,Amount,Date\nX,1,01/05/2024\n";
        let err = load_expenses_from_reader(csv.as_bytes(), &mut registry()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
