//! Longitudinal vehicle-dynamics model.
//!
//! Energy use per kilometre is the sum of a steady-state term (rolling
//! resistance plus aerodynamic drag), an auxiliary term and a stop-start
//! kinetic term with partial regenerative recovery. All functions return
//! full-precision values; rounding happens in [`super::report`].

use serde::Serialize;

use super::scenario::ScenarioParams;
use super::vehicle::{BatteryChemistry, VehicleParams};

/// Air density at 15 °C, sea level (kg/m³).
pub const RHO_AIR: f64 = 1.225;
/// Gravitational acceleration (m/s²).
pub const G: f64 = 9.81;
/// Lower bound on reported consumption (Wh/km).
pub const MIN_CONSUMPTION_WH_KM: f64 = 50.0;
/// Share of auxiliary power left when a heat pump runs in the cold.
pub const HEAT_PUMP_AUX_FACTOR: f64 = 0.60;
/// Efficiency of the regen path applied to the recoverable share.
pub const REGEN_PATH_EFF: f64 = 0.85;
/// Extra usable-capacity multiplier for LFP cells in cold scenarios.
pub const LFP_COLD_FACTOR: f64 = 0.93;
/// Default usable state-of-charge window.
pub const DEFAULT_USABLE_SOC: f64 = 0.95;

/// Per-term decomposition of one consumption estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsumptionBreakdown {
    /// Vehicle plus driver (kg).
    pub mass_kg: f64,
    /// Scenario speed (m/s).
    pub speed_ms: f64,
    /// Auxiliary power after heat-pump adjustment (W).
    pub aux_power_w: f64,
    /// Rolling-resistance force (N).
    pub rolling_force_n: f64,
    /// Aerodynamic drag force (N).
    pub aero_force_n: f64,
    /// Steady-state term (Wh/km).
    pub steady_wh_km: f64,
    /// Auxiliary term (Wh/km).
    pub aux_wh_km: f64,
    /// Stop-start kinetic term (Wh/km).
    pub accel_wh_km: f64,
    /// Sum of the terms, clamped to [`MIN_CONSUMPTION_WH_KM`].
    pub total_wh_km: f64,
}

impl ConsumptionBreakdown {
    /// Rolling plus aerodynamic force (N).
    pub fn steady_force_n(&self) -> f64 {
        self.rolling_force_n + self.aero_force_n
    }

    /// Whether the floor replaced the physical sum.
    pub fn is_floored(&self) -> bool {
        self.steady_wh_km + self.aux_wh_km + self.accel_wh_km < MIN_CONSUMPTION_WH_KM
    }
}

/// Computes the full consumption breakdown for one vehicle in one scenario.
pub fn consumption_breakdown(
    vehicle: &VehicleParams,
    scenario: &ScenarioParams,
    is_cold_scenario: bool,
) -> ConsumptionBreakdown {
    let mass_kg = vehicle.effective_mass_kg();
    let v = scenario.speed_kmh / 3.6;

    let aux_power_w = if is_cold_scenario && vehicle.has_heat_pump {
        scenario.aux_power_w * HEAT_PUMP_AUX_FACTOR
    } else {
        scenario.aux_power_w
    };

    let rolling_force_n = vehicle.crr * mass_kg * G;
    let aero_force_n = 0.5 * RHO_AIR * vehicle.cd * vehicle.frontal_area_m2 * v * v;

    let steady_wh_km = ((rolling_force_n + aero_force_n) / scenario.drivetrain_eff) / v / 3.6;
    let aux_wh_km = aux_power_w / v / 3.6;

    let accel_wh_km = if scenario.stops_per_km > 0.0 {
        let ke_per_stop = 0.5 * mass_kg * v * v;
        let ke_net = ke_per_stop * (1.0 - scenario.regen_factor * REGEN_PATH_EFF);
        (ke_net * scenario.stops_per_km / 3600.0) / scenario.drivetrain_eff
    } else {
        0.0
    };

    let total_wh_km = (steady_wh_km + aux_wh_km + accel_wh_km).max(MIN_CONSUMPTION_WH_KM);

    ConsumptionBreakdown {
        mass_kg,
        speed_ms: v,
        aux_power_w,
        rolling_force_n,
        aero_force_n,
        steady_wh_km,
        aux_wh_km,
        accel_wh_km,
        total_wh_km,
    }
}

/// Energy consumption (Wh/km), never below [`MIN_CONSUMPTION_WH_KM`].
///
/// # Examples
///
/// ```
/// use enersim::range::physics::consumption_wh_km;
/// use enersim::range::scenario::ScenarioName;
/// use enersim::range::vehicle::{BatteryChemistry, VehicleParams};
///
/// let v = VehicleParams {
///     battery_net_kwh: 75.0,
///     curb_weight_kg: 1900.0,
///     cd: 0.23,
///     frontal_area_m2: 2.3,
///     crr: 0.008,
///     has_heat_pump: true,
///     battery_chemistry: BatteryChemistry::Nmc,
/// };
/// let c = consumption_wh_km(&v, ScenarioName::CityMild.params(), false);
/// assert!(c >= 50.0);
/// ```
pub fn consumption_wh_km(
    vehicle: &VehicleParams,
    scenario: &ScenarioParams,
    is_cold_scenario: bool,
) -> f64 {
    consumption_breakdown(vehicle, scenario, is_cold_scenario).total_wh_km
}

/// Temperature factor after the chemistry-specific cold penalty.
pub fn effective_temp_factor(temp_factor: f64, chemistry: BatteryChemistry, is_cold: bool) -> f64 {
    if is_cold && chemistry.is_lfp() {
        temp_factor * LFP_COLD_FACTOR
    } else {
        temp_factor
    }
}

/// Driving range (km) for a battery budget at a given consumption.
///
/// Zero battery yields zero range; a tiny consumption yields a large but
/// finite range. Neither is treated as an error.
pub fn range_km(
    battery_net_kwh: f64,
    consumption_wh_km: f64,
    temp_factor: f64,
    chemistry: BatteryChemistry,
    is_cold: bool,
    usable_soc_pct: f64,
) -> f64 {
    let tf = effective_temp_factor(temp_factor, chemistry, is_cold);
    let usable_energy_wh = battery_net_kwh * 1000.0 * tf * usable_soc_pct;
    usable_energy_wh / consumption_wh_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::scenario::ScenarioName;

    fn reference_vehicle() -> VehicleParams {
        VehicleParams {
            battery_net_kwh: 75.0,
            curb_weight_kg: 1900.0,
            cd: 0.23,
            frontal_area_m2: 2.3,
            crr: 0.008,
            has_heat_pump: true,
            battery_chemistry: BatteryChemistry::Nmc,
        }
    }

    #[test]
    fn highway_mild_forces_follow_formulas() {
        let b = consumption_breakdown(&reference_vehicle(), ScenarioName::HighwayMild.params(), false);
        let v = 110.0 / 3.6;
        assert!((b.speed_ms - v).abs() < 1e-12);
        // 0.008 * 1975 * 9.81
        assert!((b.rolling_force_n - 154.998).abs() < 1e-9);
        // 0.5 * 1.225 * 0.23 * 2.3 * v²
        assert!((b.aero_force_n - 302.511_670_524_691_4).abs() < 1e-6);
        assert!((b.steady_force_n() - 457.509_670_524_691_4).abs() < 1e-6);
        assert!((b.steady_wh_km - 457.509_670_524_691_4 / 0.90 / v / 3.6).abs() < 1e-9);
        assert!((b.aux_wh_km - 400.0 / v / 3.6).abs() < 1e-12);
        assert_eq!(b.accel_wh_km, 0.0);
        // Physical sum is well below the floor at this speed.
        assert!(b.is_floored());
        assert_eq!(b.total_wh_km, MIN_CONSUMPTION_WH_KM);
    }

    #[test]
    fn city_mild_includes_stop_start_term() {
        let b = consumption_breakdown(&reference_vehicle(), ScenarioName::CityMild.params(), false);
        let v = 25.0 / 3.6;
        let ke = 0.5 * 1975.0 * v * v;
        let expected = ke * (1.0 - 0.35 * 0.85) * 3.0 / 3600.0 / 0.84;
        assert!((b.accel_wh_km - expected).abs() < 1e-9);
        assert!((b.total_wh_km - 57.314_220_004_623_5).abs() < 1e-6);
        assert!(!b.is_floored());
    }

    #[test]
    fn heat_pump_scales_aux_only_in_cold() {
        let v = reference_vehicle();
        let cold = consumption_breakdown(&v, ScenarioName::CityCold.params(), true);
        assert!((cold.aux_power_w - 1800.0).abs() < 1e-9);

        let mild = consumption_breakdown(&v, ScenarioName::CityCold.params(), false);
        assert_eq!(mild.aux_power_w, 3000.0);
    }

    #[test]
    fn lfp_penalty_only_when_cold() {
        assert_eq!(effective_temp_factor(0.9, BatteryChemistry::Lfp, false), 0.9);
        assert!((effective_temp_factor(0.9, BatteryChemistry::Lfp, true) - 0.837).abs() < 1e-12);
        assert_eq!(effective_temp_factor(0.9, BatteryChemistry::Nmc, true), 0.9);
    }

    #[test]
    fn range_uses_usable_soc_window() {
        let r = range_km(75.0, 50.0, 1.0, BatteryChemistry::Nmc, false, DEFAULT_USABLE_SOC);
        assert!((r - 1425.0).abs() < 1e-9);
    }

    #[test]
    fn zero_battery_gives_zero_range() {
        let r = range_km(0.0, 50.0, 1.0, BatteryChemistry::Nmc, false, DEFAULT_USABLE_SOC);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn near_zero_speed_is_finite() {
        let slow = ScenarioParams {
            speed_kmh: 1e-3,
            ..*ScenarioName::CityMild.params()
        };
        let c = consumption_wh_km(&reference_vehicle(), &slow, false);
        assert!(c.is_finite());
        assert!(c >= MIN_CONSUMPTION_WH_KM);
    }
}
