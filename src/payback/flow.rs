//! Daily energy flows with and without storage, and the resulting annual savings.

use serde::Serialize;

use super::types::{EnergyFlow, HouseholdProfile};

/// Share of PV production that overlaps household load without storage.
pub const DIRECT_SELF_CONSUMPTION_RATE: f64 = 0.30;
/// Billing days per month used to derive daily consumption.
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Daily PV production (kWh) for an installed peak power.
pub fn daily_solar_production_kwh(solar_kwp: f64, yield_kwh_per_kwp: f64) -> f64 {
    if solar_kwp > 0.0 {
        solar_kwp * yield_kwh_per_kwp / DAYS_PER_YEAR
    } else {
        0.0
    }
}

/// Self-consumption rate reachable with storage, from the ratio of storage
/// capacity to daily PV production.
pub fn storage_self_consumption_rate(storage_ratio: f64) -> f64 {
    if storage_ratio >= 1.0 {
        0.80
    } else if storage_ratio >= 0.5 {
        0.65 + (storage_ratio - 0.5) * 0.30
    } else {
        0.30 + storage_ratio * 0.70
    }
}

fn flow_at_rate(consumption: f64, production: f64, rate: f64) -> EnergyFlow {
    let self_consumed = (production * rate).min(consumption);
    EnergyFlow {
        daily_consumption_kwh: consumption,
        daily_solar_production_kwh: production,
        self_consumed_kwh: self_consumed,
        grid_purchase_kwh: consumption - self_consumed,
        feed_in_kwh: production - self_consumed,
        self_consumption_rate: if production > 0.0 {
            self_consumed / production
        } else {
            0.0
        },
    }
}

/// Flows when PV feeds the house directly and the surplus is exported.
pub fn without_storage(profile: &HouseholdProfile, yield_kwh_per_kwp: f64) -> EnergyFlow {
    let consumption = profile.monthly_consumption_kwh / DAYS_PER_MONTH;
    let production = daily_solar_production_kwh(profile.solar_system_kwp, yield_kwh_per_kwp);
    flow_at_rate(consumption, production, DIRECT_SELF_CONSUMPTION_RATE)
}

/// Flows with a battery shifting PV surplus into the evening.
///
/// Without PV the battery has nothing to store: everything is bought from the
/// grid and the rate is zero. The check precedes any division by production.
pub fn with_storage(profile: &HouseholdProfile, yield_kwh_per_kwp: f64) -> EnergyFlow {
    let consumption = profile.monthly_consumption_kwh / DAYS_PER_MONTH;
    let production = daily_solar_production_kwh(profile.solar_system_kwp, yield_kwh_per_kwp);

    if production <= 0.0 {
        return EnergyFlow {
            daily_consumption_kwh: consumption,
            daily_solar_production_kwh: 0.0,
            self_consumed_kwh: 0.0,
            grid_purchase_kwh: consumption,
            feed_in_kwh: 0.0,
            self_consumption_rate: 0.0,
        };
    }

    let rate = storage_self_consumption_rate(profile.storage_size_kwh / production);
    let mut flow = flow_at_rate(consumption, production, rate);
    // Rate reported is the tier rate, even when consumption caps self-use.
    flow.self_consumption_rate = rate;
    flow
}

/// First-year savings breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualSavings {
    /// Avoided grid purchases (EUR/year).
    pub grid_savings_eur: f64,
    /// Feed-in revenue given up (EUR/year).
    pub feed_in_loss_eur: f64,
    /// `grid_savings_eur - feed_in_loss_eur`.
    pub annual_savings_eur: f64,
    pub without_storage: EnergyFlow,
    pub with_storage: EnergyFlow,
}

impl AnnualSavings {
    /// Gain in self-consumption rate from adding storage.
    pub fn self_consumption_improvement(&self) -> f64 {
        self.with_storage.self_consumption_rate - self.without_storage.self_consumption_rate
    }
}

/// Compares both configurations and prices the difference over one year.
pub fn annual_savings(profile: &HouseholdProfile, yield_kwh_per_kwp: f64) -> AnnualSavings {
    let without = without_storage(profile, yield_kwh_per_kwp);
    let with = with_storage(profile, yield_kwh_per_kwp);

    let grid_savings_eur = (without.grid_purchase_kwh - with.grid_purchase_kwh)
        * DAYS_PER_YEAR
        * profile.electricity_price_eur;
    let feed_in_loss_eur =
        (without.feed_in_kwh - with.feed_in_kwh) * DAYS_PER_YEAR * profile.feed_in_tariff_eur;

    AnnualSavings {
        grid_savings_eur,
        feed_in_loss_eur,
        annual_savings_eur: grid_savings_eur - feed_in_loss_eur,
        without_storage: without,
        with_storage: with,
    }
}
