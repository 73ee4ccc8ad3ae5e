//! Payback and ROI simulation for residential battery storage.

pub mod engine;
/// Daily energy flows and annual savings.
pub mod flow;
pub mod sizing;
pub mod types;

pub use engine::{compute_payback, compute_payback_with, generate_savings_chart_series};
pub use sizing::{recommend_storage_size, recommend_storage_size_with};
pub use types::{
    EnergyFlow, HouseholdProfile, MAX_LIFESPAN_YEARS, PaybackAssumptions, PaybackResult,
    ProfitabilityRating, SavingsChartSeries, StorageRecommendation, TimelineEntry,
};
