//! Regional default assumptions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Allocation;
use crate::error::ParameterError;

pub const DEFAULT_STARTING_WEALTH: f64 = 500_000.0;
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 2_000.0;
pub const DEFAULT_INFLATION: f64 = 2.0;
pub const DEFAULT_DURATION_YEARS: u32 = 25;

/// Region used to pick default allocation and return assumptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Europe,
    /// Balanced fallback for anywhere else
    Global,
}

/// Default portfolio and annual returns (%) for a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPreset {
    pub allocation: Allocation,
    pub equity_return: f64,
    pub bond_return: f64,
}

impl Region {
    pub fn preset(self) -> RegionPreset {
        match self {
            Region::Us => RegionPreset {
                allocation: Allocation { equity_pct: 70.0, bond_pct: 30.0 },
                equity_return: 7.0,
                bond_return: 3.0,
            },
            Region::Europe => RegionPreset {
                allocation: Allocation { equity_pct: 60.0, bond_pct: 40.0 },
                equity_return: 6.0,
                bond_return: 2.5,
            },
            Region::Global => RegionPreset {
                allocation: Allocation { equity_pct: 50.0, bond_pct: 50.0 },
                equity_return: 6.0,
                bond_return: 2.5,
            },
        }
    }
}

impl FromStr for Region {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "usa" => Ok(Region::Us),
            "europe" | "eu" => Ok(Region::Europe),
            "global" | "other" => Ok(Region::Global),
            _ => Err(ParameterError::Parse { field: "region", input: s.to_string() }),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => write!(f, "US"),
            Region::Europe => write!(f, "Europe"),
            Region::Global => write!(f, "Global"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid_allocations() {
        for region in [Region::Us, Region::Europe, Region::Global] {
            assert!(region.preset().allocation.validate().is_ok(), "{region}");
        }
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("US".parse::<Region>().unwrap(), Region::Us);
        assert_eq!("europe".parse::<Region>().unwrap(), Region::Europe);
        assert!("mars".parse::<Region>().is_err());
    }

    #[test]
    fn test_europe_defaults() {
        let preset = Region::Europe.preset();
        assert_eq!(preset.allocation.equity_pct, 60.0);
        assert_eq!(preset.equity_return, 6.0);
        assert_eq!(preset.bond_return, 2.5);
    }
}
