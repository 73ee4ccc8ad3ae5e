//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use enersim::payback::HouseholdProfile;
use enersim::range::{BatteryChemistry, VehicleParams};

/// Long-range sedan (75 kWh NMC, 1900 kg, Cd 0.23, 2.3 m², Crr 0.008, heat pump).
pub fn reference_vehicle() -> VehicleParams {
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

/// Same vehicle with a different chemistry.
pub fn reference_vehicle_with(chemistry: BatteryChemistry) -> VehicleParams {
    VehicleParams {
        battery_chemistry: chemistry,
        ..reference_vehicle()
    }
}

/// 350 kWh/month household, 8 kWp PV, 10 kWh storage for 9500 + 1500 EUR.
pub fn reference_profile() -> HouseholdProfile {
    HouseholdProfile {
        monthly_consumption_kwh: 350.0,
        solar_system_kwp: 8.0,
        storage_size_kwh: 10.0,
        system_cost_eur: 9500.0,
        installation_cost_eur: 1500.0,
        electricity_price_eur: 0.35,
        feed_in_tariff_eur: 0.08,
    }
}

/// Asserts two floats agree within `tol`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
