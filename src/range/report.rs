//! All-scenario range tables and the card summary derived from them.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use super::physics::{self, DEFAULT_USABLE_SOC};
use super::scenario::ScenarioName;
use super::vehicle::VehicleParams;
use crate::rounding::{round_half_up, round_to};

/// Shaped result for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeResult {
    /// Consumption (Wh/km), one decimal.
    pub consumption_wh_km: f64,
    /// Physics-only range (km), integer.
    pub range_km: f64,
    /// Range after the scenario calibration factor (km), integer.
    pub range_calibrated_km: f64,
}

/// Range results for every catalog scenario, keyed and ordered by scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RangeReport {
    pub scenarios: BTreeMap<ScenarioName, RangeResult>,
}

impl RangeReport {
    /// Result for one scenario. Every catalog scenario is always present.
    pub fn get(&self, name: ScenarioName) -> Option<&RangeResult> {
        self.scenarios.get(&name)
    }

    /// Iterates scenarios in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ScenarioName, &RangeResult)> {
        self.scenarios.iter().map(|(name, r)| (*name, r))
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Headline figures for a vehicle card.
    pub fn card(&self) -> CardRanges {
        let calibrated = |n| self.get(n).map_or(0.0, |r| r.range_calibrated_km);
        let consumption = |n| self.get(n).map_or(0.0, |r| r.consumption_wh_km);
        CardRanges {
            real_range: calibrated(ScenarioName::RealCombinedMild),
            winter_range: calibrated(ScenarioName::RealCombinedCold),
            autobahn_range: calibrated(ScenarioName::Autobahn130),
            city_range: calibrated(ScenarioName::CityMild),
            highway_range: calibrated(ScenarioName::HighwayMild),
            consumption_highway: consumption(ScenarioName::HighwayMild),
            consumption_city: consumption(ScenarioName::CityMild),
        }
    }
}

impl fmt::Display for RangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Range Report ---")?;
        writeln!(
            f,
            "{:<20} {:>12} {:>10} {:>12}",
            "scenario", "Wh/km", "range km", "calibrated"
        )?;
        for (name, r) in self.iter() {
            writeln!(
                f,
                "{:<20} {:>12.1} {:>10.0} {:>12.0}",
                name.as_str(),
                r.consumption_wh_km,
                r.range_km,
                r.range_calibrated_km
            )?;
        }
        Ok(())
    }
}

/// Headline numbers shown on a vehicle card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardRanges {
    /// `real_combined_mild`, calibrated (km).
    pub real_range: f64,
    /// `real_combined_cold`, calibrated (km).
    pub winter_range: f64,
    /// `autobahn_130`, calibrated (km).
    pub autobahn_range: f64,
    /// `city_mild`, calibrated (km).
    pub city_range: f64,
    /// `highway_mild`, calibrated (km).
    pub highway_range: f64,
    /// `highway_mild` consumption (Wh/km).
    pub consumption_highway: f64,
    /// `city_mild` consumption (Wh/km).
    pub consumption_city: f64,
}

impl fmt::Display for CardRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Card Summary ---")?;
        writeln!(f, "Real range:            {:.0} km", self.real_range)?;
        writeln!(f, "Winter range:          {:.0} km", self.winter_range)?;
        writeln!(f, "Autobahn range:        {:.0} km", self.autobahn_range)?;
        writeln!(f, "City range:            {:.0} km", self.city_range)?;
        writeln!(f, "Highway range:         {:.0} km", self.highway_range)?;
        writeln!(f, "Highway consumption:   {:.1} Wh/km", self.consumption_highway)?;
        write!(f, "City consumption:      {:.1} Wh/km", self.consumption_city)
    }
}

/// Evaluates every catalog scenario with the default 95 % usable SOC window.
pub fn compute_all_ranges(vehicle: &VehicleParams) -> RangeReport {
    compute_all_ranges_with_soc(vehicle, DEFAULT_USABLE_SOC)
}

/// Evaluates every catalog scenario with an explicit usable SOC window.
///
/// Never fails: degenerate vehicles (zero battery, tiny mass) produce finite
/// numbers and it is up to the caller how to surface them.
pub fn compute_all_ranges_with_soc(vehicle: &VehicleParams, usable_soc_pct: f64) -> RangeReport {
    let scenarios = ScenarioName::ALL
        .into_iter()
        .map(|name| {
            let params = name.params();
            let is_cold = name.is_cold();

            let breakdown = physics::consumption_breakdown(vehicle, params, is_cold);
            if breakdown.is_floored() {
                trace!(scenario = %name, "consumption clamped to floor");
            }
            let range = physics::range_km(
                vehicle.battery_net_kwh,
                breakdown.total_wh_km,
                params.temp_factor,
                vehicle.battery_chemistry,
                is_cold,
                usable_soc_pct,
            );
            let factor = name.calibration_factor();

            debug!(
                scenario = %name,
                consumption_wh_km = breakdown.total_wh_km,
                range_km = range,
                calibration = factor,
                "scenario evaluated"
            );

            let result = RangeResult {
                consumption_wh_km: round_to(breakdown.total_wh_km, 1),
                range_km: round_half_up(range),
                range_calibrated_km: round_half_up(range * factor),
            };
            (name, result)
        })
        .collect();

    RangeReport { scenarios }
}

/// Headline card figures for a vehicle.
pub fn compute_card_ranges(vehicle: &VehicleParams) -> CardRanges {
    compute_all_ranges(vehicle).card()
}
