//! Simulation parameter structures and validation

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::region::Region;
use crate::error::ParameterError;

/// Shortest supported horizon in years
pub const MIN_DURATION_YEARS: u32 = 1;

/// Longest supported horizon in years
pub const MAX_DURATION_YEARS: u32 = 50;

/// Days counted per simulated year when deriving the end date
pub const DAYS_PER_YEAR: u64 = 365;

/// Tolerance applied when checking that an allocation sums to 100
const ALLOCATION_TOLERANCE: f64 = 1e-9;

/// Split of invested wealth between equities and bonds, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub equity_pct: f64,
    pub bond_pct: f64,
}

impl Allocation {
    /// Build an allocation from an explicit pair, rejecting pairs that do not sum to 100
    pub fn new(equity_pct: f64, bond_pct: f64) -> Result<Self, ParameterError> {
        let allocation = Self { equity_pct, bond_pct };
        allocation.validate()?;
        Ok(allocation)
    }

    /// Build an allocation from the equity share alone; bonds take the remainder
    pub fn from_equity(equity_pct: f64) -> Result<Self, ParameterError> {
        Self::new(equity_pct, 100.0 - equity_pct)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        for (asset, value) in [("equities", self.equity_pct), ("bonds", self.bond_pct)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ParameterError::AllocationRange { asset, value });
            }
        }

        if (self.equity_pct + self.bond_pct - 100.0).abs() > ALLOCATION_TOLERANCE {
            return Err(ParameterError::AllocationSum {
                equity_pct: self.equity_pct,
                bond_pct: self.bond_pct,
            });
        }

        Ok(())
    }

    /// Equity share as a fraction
    pub fn equity_fraction(&self) -> f64 {
        self.equity_pct / 100.0
    }

    /// Bond share as a fraction
    pub fn bond_fraction(&self) -> f64 {
        self.bond_pct / 100.0
    }
}

/// Inputs to a wealth projection
///
/// Rates are annual percentages (7.0 means 7% per year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Wealth held on the start date
    pub starting_wealth: f64,

    /// Amount saved at the start of every simulated month
    pub monthly_contribution: f64,

    /// Equity / bond split
    pub allocation: Allocation,

    /// Expected annual return on equities (%)
    pub annual_equity_return: f64,

    /// Expected annual return on bonds (%)
    pub annual_bond_return: f64,

    /// Expected annual inflation (%)
    pub annual_inflation: f64,

    /// First day of the simulation
    pub start_date: NaiveDate,

    /// Horizon in whole years
    pub duration_years: u32,
}

impl SimulationParameters {
    /// Default inputs for a region, starting on the given date
    pub fn for_region(region: Region, start_date: NaiveDate) -> Self {
        let preset = region.preset();
        Self {
            starting_wealth: super::region::DEFAULT_STARTING_WEALTH,
            monthly_contribution: super::region::DEFAULT_MONTHLY_CONTRIBUTION,
            allocation: preset.allocation,
            annual_equity_return: preset.equity_return,
            annual_bond_return: preset.bond_return,
            annual_inflation: super::region::DEFAULT_INFLATION,
            start_date,
            duration_years: super::region::DEFAULT_DURATION_YEARS,
        }
    }

    /// Last day covered by the simulation: start + duration x 365 days
    pub fn end_date(&self) -> NaiveDate {
        let days = u64::from(self.duration_years) * DAYS_PER_YEAR;
        self.start_date
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Check every precondition the projection relies on
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_amount("starting wealth", self.starting_wealth)?;
        validate_amount("monthly contribution", self.monthly_contribution)?;
        self.allocation.validate()?;
        validate_rate("equity return", self.annual_equity_return)?;
        validate_rate("bond return", self.annual_bond_return)?;
        validate_rate("inflation", self.annual_inflation)?;

        if !(MIN_DURATION_YEARS..=MAX_DURATION_YEARS).contains(&self.duration_years) {
            return Err(ParameterError::InvalidDuration {
                years: self.duration_years,
                min: MIN_DURATION_YEARS,
                max: MAX_DURATION_YEARS,
            });
        }

        Ok(())
    }

    /// Update one field from its textual value
    ///
    /// Field names match the CLI flags (`equity-pct`, `years`, ...). Setting
    /// `equity-pct` moves the bond share with it so the pair keeps summing to 100.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ParameterError> {
        let field = field.trim().to_lowercase().replace('_', "-");
        match field.as_str() {
            "starting-wealth" => {
                let v = parse_number("starting wealth", value)?;
                validate_amount("starting wealth", v)?;
                self.starting_wealth = v;
            }
            "monthly-savings" | "monthly-contribution" => {
                let v = parse_number("monthly contribution", value)?;
                validate_amount("monthly contribution", v)?;
                self.monthly_contribution = v;
            }
            "equity-pct" => {
                self.allocation = Allocation::from_equity(parse_number("equity allocation", value)?)?;
            }
            "bond-pct" => {
                let bonds = parse_number("bond allocation", value)?;
                self.allocation = Allocation::new(100.0 - bonds, bonds)?;
            }
            "equity-return" => {
                let v = parse_number("equity return", value)?;
                validate_rate("equity return", v)?;
                self.annual_equity_return = v;
            }
            "bond-return" => {
                let v = parse_number("bond return", value)?;
                validate_rate("bond return", v)?;
                self.annual_bond_return = v;
            }
            "inflation" => {
                let v = parse_number("inflation", value)?;
                validate_rate("inflation", v)?;
                self.annual_inflation = v;
            }
            "years" | "duration" => {
                let years: u32 = value.trim().parse().map_err(|_| ParameterError::Parse {
                    field: "duration",
                    input: value.to_string(),
                })?;
                if !(MIN_DURATION_YEARS..=MAX_DURATION_YEARS).contains(&years) {
                    return Err(ParameterError::InvalidDuration {
                        years,
                        min: MIN_DURATION_YEARS,
                        max: MAX_DURATION_YEARS,
                    });
                }
                self.duration_years = years;
            }
            "start-date" => {
                self.start_date = parse_date("start date", value)?;
            }
            _ => return Err(ParameterError::UnknownField(field)),
        }
        Ok(())
    }
}

/// Reject negative or non-finite money amounts
pub fn validate_amount(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NegativeAmount { field, value })
    }
}

/// Reject rates that are not finite or would wipe out the whole balance (<= -100%)
pub fn validate_rate(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > -100.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidRate { field, value })
    }
}

pub(crate) fn parse_number(field: &'static str, input: &str) -> Result<f64, ParameterError> {
    input
        .trim()
        .replace('_', "")
        .parse::<f64>()
        .map_err(|_| ParameterError::Parse { field, input: input.to_string() })
}

pub(crate) fn parse_date(field: &'static str, input: &str) -> Result<NaiveDate, ParameterError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ParameterError::Parse { field, input: input.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_params() -> SimulationParameters {
        SimulationParameters::for_region(Region::Us, date(2024, 1, 1))
    }

    #[test]
    fn test_allocation_must_sum_to_100() {
        assert!(Allocation::new(70.0, 30.0).is_ok());
        assert!(Allocation::new(0.0, 100.0).is_ok());

        let err = Allocation::new(70.0, 40.0).unwrap_err();
        assert!(matches!(err, ParameterError::AllocationSum { .. }));
    }

    #[test]
    fn test_allocation_range() {
        let err = Allocation::new(120.0, -20.0).unwrap_err();
        assert_eq!(
            err,
            ParameterError::AllocationRange { asset: "equities", value: 120.0 }
        );
        assert!(Allocation::from_equity(101.0).is_err());
    }

    #[test]
    fn test_allocation_from_equity() {
        let a = Allocation::from_equity(65.0).unwrap();
        assert_eq!(a.bond_pct, 35.0);
        assert_eq!(a.equity_fraction(), 0.65);
    }

    #[test]
    fn test_end_date_uses_365_day_years() {
        let mut params = test_params();
        params.duration_years = 1;
        // 2024 is a leap year, so 365 days lands on Dec 31
        assert_eq!(params.end_date(), date(2024, 12, 31));

        params.duration_years = 2;
        assert_eq!(params.end_date(), date(2025, 12, 31));
    }

    #[test]
    fn test_validate_defaults() {
        assert!(test_params().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let mut params = test_params();
        params.starting_wealth = -1.0;
        assert!(matches!(params.validate(), Err(ParameterError::NegativeAmount { .. })));

        let mut params = test_params();
        params.duration_years = 0;
        assert!(matches!(params.validate(), Err(ParameterError::InvalidDuration { .. })));

        let mut params = test_params();
        params.duration_years = 51;
        assert!(params.validate().is_err());

        let mut params = test_params();
        params.annual_inflation = -100.0;
        assert!(matches!(params.validate(), Err(ParameterError::InvalidRate { .. })));

        let mut params = test_params();
        params.allocation = Allocation { equity_pct: 50.0, bond_pct: 40.0 };
        assert!(matches!(params.validate(), Err(ParameterError::AllocationSum { .. })));
    }

    #[test]
    fn test_set_field() {
        let mut params = test_params();
        params.set_field("equity-pct", "80").unwrap();
        assert_eq!(params.allocation, Allocation { equity_pct: 80.0, bond_pct: 20.0 });

        params.set_field("monthly_savings", "1_500").unwrap();
        assert_eq!(params.monthly_contribution, 1500.0);

        params.set_field("years", "10").unwrap();
        assert_eq!(params.duration_years, 10);

        params.set_field("start-date", "2030-05-01").unwrap();
        assert_eq!(params.start_date, date(2030, 5, 1));

        assert!(matches!(
            params.set_field("colour", "blue"),
            Err(ParameterError::UnknownField(_))
        ));
        assert!(matches!(
            params.set_field("inflation", "abc"),
            Err(ParameterError::Parse { .. })
        ));
        assert!(params.set_field("years", "60").is_err());
        // Failed updates leave the previous value in place
        assert_eq!(params.duration_years, 10);
    }
}
