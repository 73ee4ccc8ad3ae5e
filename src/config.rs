//! TOML-based study configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::payback::{HouseholdProfile, MAX_LIFESPAN_YEARS, PaybackAssumptions};
use crate::range::estimate::{CdSource, estimate_crr, estimate_frontal_area, find_cd};
use crate::range::physics::DEFAULT_USABLE_SOC;
use crate::range::vehicle::{BatteryChemistry, VehicleParams};

/// Top-level study configuration parsed from TOML.
///
/// A study evaluates a vehicle, a household, or both. Load from TOML with
/// [`StudyConfig::from_toml_file`] or use [`StudyConfig::baseline`] for the
/// built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyConfig {
    /// Vehicle for the range study.
    #[serde(default)]
    pub vehicle: Option<VehicleConfig>,
    /// Household and storage offer for the payback study.
    #[serde(default)]
    pub household: Option<HouseholdConfig>,
    /// Payback model constants.
    #[serde(default)]
    pub assumptions: PaybackAssumptions,
}

fn default_chemistry() -> BatteryChemistry {
    BatteryChemistry::Nmc
}

fn default_usable_soc() -> f64 {
    DEFAULT_USABLE_SOC
}

/// Vehicle data sheet. Missing aerodynamic and tyre values are estimated.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    /// Model name, used for the Cd lookup.
    pub name: Option<String>,
    /// Body style (`"sedan"`, `"SUV"`, ...).
    pub body_type: Option<String>,
    /// Market segment (`"D - Large"`, ...).
    pub segment: Option<String>,
    /// Peak motor power (kW).
    pub power_kw: Option<f64>,
    /// Overall width (mm).
    pub width_mm: Option<f64>,
    /// Overall height (mm).
    pub height_mm: Option<f64>,
    /// Net battery energy (kWh).
    pub battery_net_kwh: f64,
    /// Curb weight (kg).
    pub curb_weight_kg: f64,
    /// Drag coefficient; looked up by name or body style when absent.
    pub cd: Option<f64>,
    /// Frontal area (m²); estimated from width and height when absent.
    pub frontal_area_m2: Option<f64>,
    /// Rolling-resistance coefficient; estimated when absent.
    pub crr: Option<f64>,
    #[serde(default)]
    pub has_heat_pump: bool,
    #[serde(default = "default_chemistry")]
    pub battery_chemistry: BatteryChemistry,
    /// Usable SOC window (0.0-1.0].
    #[serde(default = "default_usable_soc")]
    pub usable_soc_pct: f64,
}

/// A vehicle with every parameter filled in, plus where the estimates came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVehicle {
    pub params: VehicleParams,
    pub usable_soc_pct: f64,
    /// Source of Cd when it was looked up; `None` when given.
    pub cd_source: Option<CdSource>,
    pub frontal_area_estimated: bool,
    pub crr_estimated: bool,
}

impl VehicleConfig {
    /// Fills in missing Cd, frontal area and Crr.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the frontal area is absent and cannot be
    /// estimated because width or height is missing.
    pub fn resolve(&self) -> Result<ResolvedVehicle, ConfigError> {
        let body_type = self.body_type.as_deref();

        let (cd, cd_source) = match self.cd {
            Some(cd) => (cd, None),
            None => {
                let lookup = find_cd(self.name.as_deref().unwrap_or(""), body_type);
                (lookup.cd, Some(lookup.source))
            }
        };

        let dims = (self.frontal_area_m2, self.width_mm, self.height_mm);
        let (frontal_area_m2, frontal_area_estimated) = match dims {
            (Some(a), _, _) => (a, false),
            (None, Some(w), Some(h)) => (estimate_frontal_area(w, h, body_type), true),
            _ => {
                return Err(ConfigError {
                    field: "vehicle.frontal_area_m2".into(),
                    message: "required unless vehicle.width_mm and vehicle.height_mm are set".into(),
                });
            }
        };

        let (crr, crr_estimated) = match self.crr {
            Some(crr) => (crr, false),
            None => (
                estimate_crr(self.power_kw, self.segment.as_deref(), body_type),
                true,
            ),
        };

        Ok(ResolvedVehicle {
            params: VehicleParams {
                battery_net_kwh: self.battery_net_kwh,
                curb_weight_kg: self.curb_weight_kg,
                cd,
                frontal_area_m2,
                crr,
                has_heat_pump: self.has_heat_pump,
                battery_chemistry: self.battery_chemistry,
            },
            usable_soc_pct: self.usable_soc_pct,
            cd_source,
            frontal_area_estimated,
            crr_estimated,
        })
    }

    fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        positive(errors, "vehicle.battery_net_kwh", self.battery_net_kwh);
        positive(errors, "vehicle.curb_weight_kg", self.curb_weight_kg);
        if self.cd.is_some_and(|cd| !(cd > 0.0 && cd < 1.0)) {
            errors.push(ConfigError {
                field: "vehicle.cd".into(),
                message: "must be in (0.0, 1.0)".into(),
            });
        }
        if let Some(a) = self.frontal_area_m2 {
            positive(errors, "vehicle.frontal_area_m2", a);
        }
        if let Some(crr) = self.crr {
            positive(errors, "vehicle.crr", crr);
        }
        if let Some(w) = self.width_mm {
            positive(errors, "vehicle.width_mm", w);
        }
        if let Some(h) = self.height_mm {
            positive(errors, "vehicle.height_mm", h);
        }
        if !(self.usable_soc_pct > 0.0 && self.usable_soc_pct <= 1.0) {
            errors.push(ConfigError {
                field: "vehicle.usable_soc_pct".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if let Err(e) = self.resolve() {
            errors.push(e);
        }
    }
}

/// Household profile and storage offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Monthly consumption (kWh).
    pub monthly_consumption_kwh: f64,
    /// PV peak power (kWp).
    #[serde(default)]
    pub solar_system_kwp: f64,
    /// Storage capacity (kWh).
    pub storage_size_kwh: f64,
    /// Battery plus inverter cost (EUR).
    pub system_cost_eur: f64,
    /// Installation cost (EUR).
    #[serde(default)]
    pub installation_cost_eur: f64,
    /// Grid price (EUR/kWh); falls back to `assumptions.electricity_price_eur`.
    pub electricity_price_eur: Option<f64>,
    /// Feed-in tariff (EUR/kWh); falls back to `assumptions.feed_in_tariff_eur`.
    pub feed_in_tariff_eur: Option<f64>,
}

impl HouseholdConfig {
    /// Builds the engine profile, filling prices from `assumptions`.
    pub fn to_profile(&self, assumptions: &PaybackAssumptions) -> HouseholdProfile {
        HouseholdProfile {
            monthly_consumption_kwh: self.monthly_consumption_kwh,
            solar_system_kwp: self.solar_system_kwp,
            storage_size_kwh: self.storage_size_kwh,
            system_cost_eur: self.system_cost_eur,
            installation_cost_eur: self.installation_cost_eur,
            electricity_price_eur: self
                .electricity_price_eur
                .unwrap_or(assumptions.electricity_price_eur),
            feed_in_tariff_eur: self
                .feed_in_tariff_eur
                .unwrap_or(assumptions.feed_in_tariff_eur),
        }
    }

    fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        positive(errors, "household.monthly_consumption_kwh", self.monthly_consumption_kwh);
        positive(errors, "household.storage_size_kwh", self.storage_size_kwh);
        non_negative(errors, "household.solar_system_kwp", self.solar_system_kwp);
        non_negative(errors, "household.system_cost_eur", self.system_cost_eur);
        non_negative(errors, "household.installation_cost_eur", self.installation_cost_eur);
        if let Some(p) = self.electricity_price_eur {
            positive(errors, "household.electricity_price_eur", p);
        }
        if let Some(t) = self.feed_in_tariff_eur {
            positive(errors, "household.feed_in_tariff_eur", t);
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"vehicle.cd"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

fn positive(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value > 0.0) {
        errors.push(ConfigError {
            field: field.into(),
            message: format!("must be > 0, got {value}"),
        });
    }
}

fn non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value >= 0.0) {
        errors.push(ConfigError {
            field: field.into(),
            message: format!("must be >= 0, got {value}"),
        });
    }
}

impl StudyConfig {
    /// Baseline study: a 75 kWh NMC sedan and an 8 kWp household with 10 kWh storage.
    pub fn baseline() -> Self {
        Self {
            vehicle: Some(VehicleConfig {
                name: Some("Tesla Model 3 Long Range".to_string()),
                body_type: Some("sedan".to_string()),
                segment: Some("D - Large".to_string()),
                power_kw: Some(366.0),
                width_mm: Some(1849.0),
                height_mm: Some(1443.0),
                battery_net_kwh: 75.0,
                curb_weight_kg: 1900.0,
                cd: Some(0.23),
                frontal_area_m2: Some(2.3),
                crr: Some(0.008),
                has_heat_pump: true,
                battery_chemistry: BatteryChemistry::Nmc,
                usable_soc_pct: DEFAULT_USABLE_SOC,
            }),
            household: Some(HouseholdConfig {
                monthly_consumption_kwh: 350.0,
                solar_system_kwp: 8.0,
                storage_size_kwh: 10.0,
                system_cost_eur: 9500.0,
                installation_cost_eur: 1500.0,
                electricity_price_eur: Some(0.35),
                feed_in_tariff_eur: Some(0.08),
            }),
            assumptions: PaybackAssumptions::default(),
        }
    }

    /// Compact LFP hatchback without heat pump; aero and tyres estimated.
    pub fn lfp_compact() -> Self {
        Self {
            vehicle: Some(VehicleConfig {
                name: Some("BYD Dolphin".to_string()),
                body_type: Some("hatchback".to_string()),
                segment: Some("C - Medium".to_string()),
                power_kw: Some(150.0),
                width_mm: Some(1770.0),
                height_mm: Some(1570.0),
                battery_net_kwh: 60.4,
                curb_weight_kg: 1658.0,
                cd: None,
                frontal_area_m2: None,
                crr: None,
                has_heat_pump: false,
                battery_chemistry: BatteryChemistry::Lfp,
                usable_soc_pct: DEFAULT_USABLE_SOC,
            }),
            household: None,
            assumptions: PaybackAssumptions::default(),
        }
    }

    /// Household with storage but no PV.
    pub fn no_solar() -> Self {
        Self {
            vehicle: None,
            household: Some(HouseholdConfig {
                monthly_consumption_kwh: 350.0,
                solar_system_kwp: 0.0,
                storage_size_kwh: 10.0,
                system_cost_eur: 9500.0,
                installation_cost_eur: 1500.0,
                electricity_price_eur: None,
                feed_in_tariff_eur: None,
            }),
            assumptions: PaybackAssumptions::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "lfp_compact", "no_solar"];

    /// Loads a study from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "lfp_compact" => Ok(Self::lfp_compact()),
            "no_solar" => Ok(Self::no_solar()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a study from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a study from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.vehicle.is_none() && self.household.is_none() {
            errors.push(ConfigError {
                field: "study".into(),
                message: "needs a [vehicle] or [household] section".into(),
            });
        }
        if let Some(v) = &self.vehicle {
            v.validate_into(&mut errors);
        }
        if let Some(h) = &self.household {
            h.validate_into(&mut errors);
        }

        let a = &self.assumptions;
        if !(1..=MAX_LIFESPAN_YEARS).contains(&a.battery_lifespan_years) {
            errors.push(ConfigError {
                field: "assumptions.battery_lifespan_years".into(),
                message: format!(
                    "must be in 1..={MAX_LIFESPAN_YEARS}, got {}",
                    a.battery_lifespan_years
                ),
            });
        }
        if !(0.0..100.0).contains(&a.degradation_percent_per_year) {
            errors.push(ConfigError {
                field: "assumptions.degradation_percent_per_year".into(),
                message: "must be in [0.0, 100.0)".into(),
            });
        }
        positive(&mut errors, "assumptions.solar_yield_kwh_per_kwp", a.solar_yield_kwh_per_kwp);
        positive(&mut errors, "assumptions.electricity_price_eur", a.electricity_price_eur);
        positive(&mut errors, "assumptions.feed_in_tariff_eur", a.feed_in_tariff_eur);
        if !(a.electricity_price_increase_per_year > -1.0) {
            errors.push(ConfigError {
                field: "assumptions.electricity_price_increase_per_year".into(),
                message: "must be > -1.0".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = StudyConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = StudyConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in StudyConfig::PRESETS {
            let cfg = StudyConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[vehicle]
name = "Hyundai Ioniq 6"
body_type = "sedan"
battery_net_kwh = 74.0
curb_weight_kg = 1985.0
frontal_area_m2 = 2.25
crr = 0.0075
has_heat_pump = true
battery_chemistry = "NMC"

[household]
monthly_consumption_kwh = 400.0
solar_system_kwp = 10.0
storage_size_kwh = 12.0
system_cost_eur = 10000.0

[assumptions]
battery_lifespan_years = 20
"#;
        let cfg = StudyConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.assumptions.battery_lifespan_years),
            Some(20)
        );
        // unset assumptions keep defaults
        assert_eq!(
            cfg.as_ref().map(|c| c.assumptions.solar_yield_kwh_per_kwp),
            Some(1000.0)
        );
        let errors = cfg.as_ref().map(StudyConfig::validate).unwrap_or_default();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[household]
monthly_consumption_kwh = 300.0
storage_size_kwh = 5.0
system_cost_eur = 4000.0
bogus_field = true
"#;
        assert!(StudyConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn missing_vehicle_cd_is_looked_up() {
        let toml = r#"
[vehicle]
name = "Hyundai Ioniq 6"
battery_net_kwh = 74.0
curb_weight_kg = 1985.0
width_mm = 1880.0
height_mm = 1495.0
"#;
        let resolved = StudyConfig::from_toml_str(toml)
            .ok()
            .and_then(|c| c.vehicle)
            .map(|v| v.resolve());
        let Some(Ok(r)) = resolved else {
            panic!("vehicle should resolve");
        };
        assert_eq!(r.params.cd, 0.21);
        assert_eq!(r.cd_source, Some(CdSource::Published));
        assert!(r.frontal_area_estimated);
        assert!(r.crr_estimated);
        assert_eq!(r.params.crr, 0.0075);
        assert_eq!(r.params.battery_chemistry, BatteryChemistry::Nmc);
        assert_eq!(r.usable_soc_pct, 0.95);
    }

    #[test]
    fn household_prices_fall_back_to_assumptions() {
        let cfg = StudyConfig::no_solar();
        let profile = cfg
            .household
            .as_ref()
            .map(|h| h.to_profile(&cfg.assumptions));
        assert_eq!(profile.as_ref().map(|p| p.electricity_price_eur), Some(0.35));
        assert_eq!(profile.as_ref().map(|p| p.feed_in_tariff_eur), Some(0.08));
    }

    #[test]
    fn lfp_compact_uses_estimates() {
        let resolved = StudyConfig::lfp_compact()
            .vehicle
            .map(|v| v.resolve());
        let Some(Ok(r)) = resolved else {
            panic!("vehicle should resolve");
        };
        assert_eq!(r.cd_source, Some(CdSource::Estimated));
        assert_eq!(r.params.cd, 0.28);
        assert!((r.params.frontal_area_m2 - 1.77 * 1.57 * 0.84).abs() < 1e-9);
    }

    #[test]
    fn validation_catches_missing_frontal_area() {
        let mut cfg = StudyConfig::baseline();
        if let Some(v) = cfg.vehicle.as_mut() {
            v.frontal_area_m2 = None;
            v.width_mm = None;
        }
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "vehicle.frontal_area_m2"));
    }

    #[test]
    fn validation_catches_bad_cd() {
        let mut cfg = StudyConfig::baseline();
        if let Some(v) = cfg.vehicle.as_mut() {
            v.cd = Some(1.2);
        }
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "vehicle.cd"));
    }

    #[test]
    fn validation_catches_zero_storage() {
        let mut cfg = StudyConfig::baseline();
        if let Some(h) = cfg.household.as_mut() {
            h.storage_size_kwh = 0.0;
        }
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "household.storage_size_kwh"));
    }

    #[test]
    fn validation_catches_zero_lifespan() {
        let mut cfg = StudyConfig::baseline();
        cfg.assumptions.battery_lifespan_years = 0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "assumptions.battery_lifespan_years")
        );
    }

    #[test]
    fn validation_bounds_lifespan() {
        let cfg = StudyConfig::from_toml_str(
            "[household]\nmonthly_consumption_kwh = 350.0\nsolar_system_kwp = 8.0\n\
             storage_size_kwh = 10.0\nsystem_cost_eur = 9500.0\n\
             [assumptions]\nbattery_lifespan_years = 3000000000\n",
        );
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let errors = cfg.map(|c| c.validate()).unwrap_or_default();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].field, "assumptions.battery_lifespan_years");

        let mut cfg = StudyConfig::baseline();
        cfg.assumptions.battery_lifespan_years = MAX_LIFESPAN_YEARS;
        assert!(cfg.validate().is_empty());
        cfg.assumptions.battery_lifespan_years = MAX_LIFESPAN_YEARS + 1;
        assert!(!cfg.validate().is_empty());
    }

    #[test]
    fn empty_study_is_invalid() {
        let cfg = StudyConfig::from_toml_str("");
        let errors = cfg.map(|c| c.validate()).unwrap_or_default();
        assert!(errors.iter().any(|e| e.field == "study"));
    }
}
