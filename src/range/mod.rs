//! Physics-based EV consumption and range estimation.
//!
//! [`physics`] holds the force-balance model, [`scenario`] the static
//! scenario catalog and calibration table, [`estimate`] fallbacks for
//! missing data-sheet values, and [`report`] the all-scenario table.

/// Heuristic estimators for Cd, frontal area and Crr.
pub mod estimate;
pub mod physics;
pub mod report;
/// Driving scenario catalog and calibration factors.
pub mod scenario;
pub mod vehicle;

pub use estimate::{CdLookup, CdSource, estimate_crr, estimate_frontal_area, find_cd};
pub use physics::{consumption_wh_km, range_km};
pub use report::{CardRanges, RangeReport, RangeResult, compute_all_ranges, compute_card_ranges};
pub use scenario::{ScenarioName, ScenarioParams};
pub use vehicle::{BatteryChemistry, VehicleParams};
