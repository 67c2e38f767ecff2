//! Simulation inputs: parameters, allocation, regional presets and file loading

mod data;
mod region;
pub mod loader;

pub use data::{
    validate_amount, validate_rate, Allocation, SimulationParameters, DAYS_PER_YEAR,
    MAX_DURATION_YEARS, MIN_DURATION_YEARS,
};
pub(crate) use data::{parse_date, parse_number};
pub use loader::{load_parameters, load_parameters_from_reader, read_parameter_file, ParameterFile};
pub use region::{
    Region, RegionPreset, DEFAULT_DURATION_YEARS, DEFAULT_INFLATION,
    DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_STARTING_WEALTH,
};
