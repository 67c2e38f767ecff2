//! Load simulation parameters from a JSON file
//!
//! Every field is optional; anything left out falls back to the region preset.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::{Allocation, Region, SimulationParameters};
use crate::error::LoadError;

/// Raw parameter file contents
///
/// ```json
/// { "region": "europe", "starting_wealth": 250000, "equity_pct": 80, "years": 30 }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterFile {
    pub region: Region,
    pub starting_wealth: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub equity_pct: Option<f64>,
    pub bond_pct: Option<f64>,
    pub equity_return: Option<f64>,
    pub bond_return: Option<f64>,
    pub inflation: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub years: Option<u32>,
}

impl ParameterFile {
    /// Resolve against the region preset and validate
    ///
    /// `default_start` is used when the file does not name a start date.
    pub fn into_parameters(self, default_start: NaiveDate) -> Result<SimulationParameters, LoadError> {
        let mut params =
            SimulationParameters::for_region(self.region, self.start_date.unwrap_or(default_start));

        if let Some(v) = self.starting_wealth {
            params.starting_wealth = v;
        }
        if let Some(v) = self.monthly_contribution {
            params.monthly_contribution = v;
        }
        params.allocation = match (self.equity_pct, self.bond_pct) {
            (Some(e), Some(b)) => Allocation::new(e, b)?,
            (Some(e), None) => Allocation::from_equity(e)?,
            (None, Some(b)) => Allocation::new(100.0 - b, b)?,
            (None, None) => params.allocation,
        };
        if let Some(v) = self.equity_return {
            params.annual_equity_return = v;
        }
        if let Some(v) = self.bond_return {
            params.annual_bond_return = v;
        }
        if let Some(v) = self.inflation {
            params.annual_inflation = v;
        }
        if let Some(v) = self.years {
            params.duration_years = v;
        }

        params.validate()?;
        Ok(params)
    }
}

/// Read a parameter file without resolving it
pub fn read_parameter_file<P: AsRef<Path>>(path: P) -> Result<ParameterFile, LoadError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load parameters from a JSON file
pub fn load_parameters<P: AsRef<Path>>(
    path: P,
    default_start: NaiveDate,
) -> Result<SimulationParameters, LoadError> {
    let file = File::open(path)?;
    load_parameters_from_reader(BufReader::new(file), default_start)
}

/// Load parameters from any reader (e.g., string buffer)
pub fn load_parameters_from_reader<R: Read>(
    reader: R,
    default_start: NaiveDate,
) -> Result<SimulationParameters, LoadError> {
    let file: ParameterFile = serde_json::from_reader(reader)?;
    file.into_parameters(default_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParameterError;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_empty_file_uses_us_defaults() {
        let params = load_parameters_from_reader("{}".as_bytes(), start()).unwrap();
        assert_eq!(params, SimulationParameters::for_region(Region::Us, start()));
    }

    #[test]
    fn test_overrides_apply_on_top_of_region() {
        let json = r#"{
            "region": "europe",
            "starting_wealth": 250000,
            "equity_pct": 80,
            "years": 30,
            "start_date": "2025-03-01"
        }"#;
        let params = load_parameters_from_reader(json.as_bytes(), start()).unwrap();

        assert_eq!(params.starting_wealth, 250_000.0);
        assert_eq!(params.allocation, Allocation { equity_pct: 80.0, bond_pct: 20.0 });
        assert_eq!(params.annual_equity_return, 6.0);
        assert_eq!(params.duration_years, 30);
        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let json = r#"{ "equity_pct": 70, "bond_pct": 20 }"#;
        let err = load_parameters_from_reader(json.as_bytes(), start()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parameter(ParameterError::AllocationSum { .. })
        ));

        let json = r#"{ "years": 0 }"#;
        assert!(load_parameters_from_reader(json.as_bytes(), start()).is_err());
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let json = r#"{ "currency": "USD" }"#;
        let err = load_parameters_from_reader(json.as_bytes(), start()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
