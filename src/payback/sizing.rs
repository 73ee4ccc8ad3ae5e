//! Storage sizing rule of thumb.

use super::flow::{DAYS_PER_MONTH, daily_solar_production_kwh};
use super::types::{PaybackAssumptions, StorageRecommendation};
use crate::rounding::round_half_up;

/// Smallest capacity ever recommended (kWh).
pub const MIN_RECOMMENDED_KWH: f64 = 5.0;

/// Recommends a storage capacity using the default PV yield.
pub fn recommend_storage_size(monthly_consumption_kwh: f64, solar_kwp: f64) -> StorageRecommendation {
    recommend_storage_size_with(
        monthly_consumption_kwh,
        solar_kwp,
        &PaybackAssumptions::default(),
    )
}

/// Recommends a storage capacity: the smaller of half a day's PV production
/// and 70 % of a day's consumption, never below [`MIN_RECOMMENDED_KWH`].
///
/// Without PV the recommendation is zero.
pub fn recommend_storage_size_with(
    monthly_consumption_kwh: f64,
    solar_kwp: f64,
    assumptions: &PaybackAssumptions,
) -> StorageRecommendation {
    if solar_kwp <= 0.0 {
        return StorageRecommendation {
            recommended_size_kwh: 0.0,
            reasoning: "Battery storage is not economical without a solar PV system. \
                        Consider installing solar panels first."
                .to_string(),
        };
    }

    let daily_consumption = monthly_consumption_kwh / DAYS_PER_MONTH;
    let daily_production = daily_solar_production_kwh(solar_kwp, assumptions.solar_yield_kwh_per_kwp);

    let based_on_solar = daily_production * 0.5;
    let based_on_consumption = daily_consumption * 0.7;
    let size = round_half_up(based_on_solar.min(based_on_consumption));

    let reasoning = if size < 5.0 {
        "Small battery (5 kWh) recommended for your setup. Covers evening consumption."
    } else if size < 10.0 {
        "Medium battery (7-10 kWh) recommended. Balances cost and self-sufficiency."
    } else if size < 15.0 {
        "Large battery (10-15 kWh) recommended for high self-consumption."
    } else {
        "Extra-large battery (15+ kWh) recommended. Consider backup power needs."
    };

    StorageRecommendation {
        recommended_size_kwh: size.max(MIN_RECOMMENDED_KWH),
        reasoning: reasoning.to_string(),
    }
}
