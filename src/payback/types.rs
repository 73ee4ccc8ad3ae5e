//! Inputs, model constants and results for the storage payback engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rounding::{round_half_up, round_to};

/// Household energy profile together with the storage offer being evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    /// Electricity consumption per month (kWh, > 0).
    pub monthly_consumption_kwh: f64,
    /// Installed PV peak power (kWp, 0 when there is no PV).
    pub solar_system_kwp: f64,
    /// Storage capacity (kWh, > 0).
    pub storage_size_kwh: f64,
    /// Battery plus inverter cost (EUR).
    pub system_cost_eur: f64,
    /// Installation cost (EUR).
    pub installation_cost_eur: f64,
    /// Grid electricity price (EUR/kWh).
    pub electricity_price_eur: f64,
    /// Feed-in tariff (EUR/kWh).
    pub feed_in_tariff_eur: f64,
}

impl HouseholdProfile {
    /// System plus installation cost (EUR).
    pub fn total_investment_eur(&self) -> f64 {
        self.system_cost_eur + self.installation_cost_eur
    }
}

/// Longest projection horizon a study may request (years).
pub const MAX_LIFESPAN_YEARS: u32 = 100;

/// Model constants for the payback projection.
///
/// The defaults describe a German household in 2026.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaybackAssumptions {
    /// Household grid price used when a profile does not set one (EUR/kWh).
    pub electricity_price_eur: f64,
    /// Feed-in tariff used when a profile does not set one (EUR/kWh).
    pub feed_in_tariff_eur: f64,
    /// Annual PV yield per installed kWp (kWh/kWp/year).
    pub solar_yield_kwh_per_kwp: f64,
    /// Projection horizon and timeline length (years).
    pub battery_lifespan_years: u32,
    /// Linear capacity loss (percent per year).
    pub degradation_percent_per_year: f64,
    /// Compound grid-price escalation (fraction per year).
    pub electricity_price_increase_per_year: f64,
}

impl Default for PaybackAssumptions {
    fn default() -> Self {
        Self {
            electricity_price_eur: 0.35,
            feed_in_tariff_eur: 0.08,
            solar_yield_kwh_per_kwp: 1000.0,
            battery_lifespan_years: 25,
            degradation_percent_per_year: 0.5,
            electricity_price_increase_per_year: 0.03,
        }
    }
}

/// Average daily energy flows for one configuration (with or without storage).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyFlow {
    /// Household consumption (kWh/day).
    pub daily_consumption_kwh: f64,
    /// PV production (kWh/day).
    pub daily_solar_production_kwh: f64,
    /// PV energy consumed on site (kWh/day).
    pub self_consumed_kwh: f64,
    /// Energy bought from the grid (kWh/day).
    pub grid_purchase_kwh: f64,
    /// Energy exported to the grid (kWh/day).
    pub feed_in_kwh: f64,
    /// Share of PV production consumed on site, in `[0, 1]`.
    pub self_consumption_rate: f64,
}

/// One year of the lifetime projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineEntry {
    /// Year after installation, starting at 1.
    pub year: u32,
    /// Savings in this year after degradation and price escalation (EUR).
    pub annual_savings_eur: f64,
    /// Running total including the initial investment (EUR).
    pub cumulative_savings_eur: f64,
}

/// Qualitative verdict on the investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfitabilityRating {
    /// Lifetime net savings exceed the investment itself.
    Excellent,
    /// Positive lifetime net savings.
    Good,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl ProfitabilityRating {
    /// Rates lifetime net savings against the investment.
    pub fn from_savings(lifetime_savings_eur: f64, total_investment_eur: f64) -> Self {
        if lifetime_savings_eur > total_investment_eur {
            Self::Excellent
        } else if lifetime_savings_eur > 0.0 {
            Self::Good
        } else {
            Self::NotRecommended
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NotRecommended => "Not Recommended",
        }
    }
}

impl fmt::Display for ProfitabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full payback analysis. Values are unrounded; [`fmt::Display`] rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaybackResult {
    pub system_cost_eur: f64,
    pub installation_cost_eur: f64,
    pub total_investment_eur: f64,

    /// First-year net savings (EUR/year).
    pub annual_savings_eur: f64,
    /// Avoided grid purchases (EUR/year).
    pub grid_savings_eur: f64,
    /// Lost feed-in revenue (EUR/year).
    pub feed_in_loss_eur: f64,

    /// Investment over first-year savings; infinite when savings are not positive.
    pub simple_payback_years: f64,
    /// First year whose cumulative total reaches zero, if any.
    pub break_even_year: Option<u32>,
    /// Cumulative total at the end of the horizon (EUR).
    pub lifetime_savings_eur: f64,

    /// Self-consumption rate without storage, in `[0, 1]`.
    pub self_consumption_rate_before: f64,
    /// Self-consumption rate with storage, in `[0, 1]`.
    pub self_consumption_rate_after: f64,
    pub self_consumption_improvement: f64,

    pub daily_consumption_kwh: f64,
    pub daily_solar_production_kwh: f64,
    /// Grid purchase without storage (kWh/year).
    pub grid_purchase_before_kwh: f64,
    /// Grid purchase with storage (kWh/year).
    pub grid_purchase_after_kwh: f64,

    pub without_storage: EnergyFlow,
    pub with_storage: EnergyFlow,

    /// One entry per year of the horizon.
    pub savings_timeline: Vec<TimelineEntry>,

    pub is_profitable: bool,
    pub profitability_rating: ProfitabilityRating,
}

impl fmt::Display for PaybackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Payback Report ---")?;
        writeln!(
            f,
            "Total investment:      {:.0} EUR",
            round_half_up(self.total_investment_eur)
        )?;
        writeln!(
            f,
            "Annual savings:        {:.0} EUR",
            round_half_up(self.annual_savings_eur)
        )?;
        writeln!(
            f,
            "Simple payback:        {:.1} years",
            round_to(self.simple_payback_years, 1)
        )?;
        match self.break_even_year {
            Some(year) => writeln!(f, "Break-even year:       {year}")?,
            None => writeln!(f, "Break-even year:       never")?,
        }
        writeln!(
            f,
            "Lifetime savings:      {:.0} EUR",
            round_half_up(self.lifetime_savings_eur)
        )?;
        writeln!(
            f,
            "Self-consumption:      {:.0}% -> {:.0}%",
            round_half_up(self.self_consumption_rate_before * 100.0),
            round_half_up(self.self_consumption_rate_after * 100.0)
        )?;
        writeln!(
            f,
            "Grid purchase:         {:.0} -> {:.0} kWh/year",
            round_half_up(self.grid_purchase_before_kwh),
            round_half_up(self.grid_purchase_after_kwh)
        )?;
        write!(f, "Rating:                {}", self.profitability_rating)
    }
}

/// Cumulative savings series for charting, starting at year 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsChartSeries {
    pub years: Vec<u32>,
    pub cumulative_savings: Vec<f64>,
}

/// Suggested storage capacity with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageRecommendation {
    pub recommended_size_kwh: f64,
    pub reasoning: String,
}
