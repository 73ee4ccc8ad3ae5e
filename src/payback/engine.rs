//! Lifetime payback projection for a battery storage investment.

use tracing::debug;

use super::flow::{self, DAYS_PER_YEAR};
use super::types::{
    HouseholdProfile, MAX_LIFESPAN_YEARS, PaybackAssumptions, PaybackResult, ProfitabilityRating,
    SavingsChartSeries, TimelineEntry,
};
use crate::error::ValidationError;

/// Runs the payback analysis with default model assumptions.
///
/// # Errors
///
/// Returns a [`ValidationError`] if monthly consumption or storage size is
/// not strictly positive.
///
/// # Examples
///
/// ```
/// use enersim::payback::{HouseholdProfile, compute_payback};
///
/// let profile = HouseholdProfile {
///     monthly_consumption_kwh: 350.0,
///     solar_system_kwp: 8.0,
///     storage_size_kwh: 10.0,
///     system_cost_eur: 9500.0,
///     installation_cost_eur: 1500.0,
///     electricity_price_eur: 0.35,
///     feed_in_tariff_eur: 0.08,
/// };
/// let result = compute_payback(&profile).expect("valid profile");
/// assert_eq!(result.savings_timeline.len(), 25);
/// assert!(result.is_profitable);
/// ```
pub fn compute_payback(profile: &HouseholdProfile) -> Result<PaybackResult, ValidationError> {
    compute_payback_with(profile, &PaybackAssumptions::default())
}

/// Runs the payback analysis with explicit model assumptions.
///
/// The timeline has exactly `assumptions.battery_lifespan_years` entries.
///
/// # Errors
///
/// Returns a [`ValidationError`] if monthly consumption or storage size is
/// not strictly positive.
pub fn compute_payback_with(
    profile: &HouseholdProfile,
    assumptions: &PaybackAssumptions,
) -> Result<PaybackResult, ValidationError> {
    // Negated comparisons so NaN is rejected too.
    if !(profile.monthly_consumption_kwh > 0.0) {
        return Err(ValidationError::NonPositiveConsumption(
            profile.monthly_consumption_kwh,
        ));
    }
    if !(profile.storage_size_kwh > 0.0) {
        return Err(ValidationError::NonPositiveStorage(profile.storage_size_kwh));
    }

    let total_investment_eur = profile.total_investment_eur();
    let savings = flow::annual_savings(profile, assumptions.solar_yield_kwh_per_kwp);
    let annual_savings_eur = savings.annual_savings_eur;

    let simple_payback_years = if annual_savings_eur > 0.0 {
        total_investment_eur / annual_savings_eur
    } else {
        f64::INFINITY
    };

    let mut cumulative = -total_investment_eur;
    let mut break_even_year = None;
    let capacity = assumptions.battery_lifespan_years.min(MAX_LIFESPAN_YEARS);
    let mut savings_timeline = Vec::with_capacity(capacity as usize);

    for year in 1..=assumptions.battery_lifespan_years {
        let degradation_factor =
            1.0 - (assumptions.degradation_percent_per_year / 100.0) * f64::from(year);
        let price_increase_factor =
            price_increase_factor(assumptions.electricity_price_increase_per_year, year);

        let year_savings = annual_savings_eur * degradation_factor * price_increase_factor;
        cumulative += year_savings;

        savings_timeline.push(TimelineEntry {
            year,
            annual_savings_eur: year_savings,
            cumulative_savings_eur: cumulative,
        });

        if break_even_year.is_none() && cumulative >= 0.0 {
            break_even_year = Some(year);
        }
    }

    let lifetime_savings_eur = cumulative;
    let without = savings.without_storage;
    let with = savings.with_storage;

    debug!(
        annual_savings_eur,
        lifetime_savings_eur,
        ?break_even_year,
        "payback projection complete"
    );

    Ok(PaybackResult {
        system_cost_eur: profile.system_cost_eur,
        installation_cost_eur: profile.installation_cost_eur,
        total_investment_eur,
        annual_savings_eur,
        grid_savings_eur: savings.grid_savings_eur,
        feed_in_loss_eur: savings.feed_in_loss_eur,
        simple_payback_years,
        break_even_year,
        lifetime_savings_eur,
        self_consumption_rate_before: without.self_consumption_rate,
        self_consumption_rate_after: with.self_consumption_rate,
        self_consumption_improvement: savings.self_consumption_improvement(),
        daily_consumption_kwh: with.daily_consumption_kwh,
        daily_solar_production_kwh: with.daily_solar_production_kwh,
        grid_purchase_before_kwh: without.grid_purchase_kwh * DAYS_PER_YEAR,
        grid_purchase_after_kwh: with.grid_purchase_kwh * DAYS_PER_YEAR,
        without_storage: without,
        with_storage: with,
        savings_timeline,
        is_profitable: lifetime_savings_eur > 0.0,
        profitability_rating: ProfitabilityRating::from_savings(
            lifetime_savings_eur,
            total_investment_eur,
        ),
    })
}

/// Compound price escalation for `year` (1-based), relative to year 1.
fn price_increase_factor(increase_per_year: f64, year: u32) -> f64 {
    let exponent = i32::try_from(year.saturating_sub(1)).unwrap_or(i32::MAX);
    (1.0 + increase_per_year).powi(exponent)
}

/// Cumulative savings per year with year 0 at `-total_investment_eur`.
pub fn generate_savings_chart_series(result: &PaybackResult) -> SavingsChartSeries {
    let years = std::iter::once(0)
        .chain(result.savings_timeline.iter().map(|e| e.year))
        .collect();
    let cumulative_savings = std::iter::once(-result.total_investment_eur)
        .chain(
            result
                .savings_timeline
                .iter()
                .map(|e| e.cumulative_savings_eur),
        )
        .collect();
    SavingsChartSeries {
        years,
        cumulative_savings,
    }
}
