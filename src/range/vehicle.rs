//! Vehicle description consumed by the range engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mass added to the curb weight for the driver (kg).
pub const DRIVER_MASS_KG: f64 = 75.0;

/// Traction battery cell chemistry.
///
/// Parsing is case-insensitive and substring based, so labels such as
/// `"LiFePO4 (LFP)"` resolve to [`BatteryChemistry::Lfp`]. Anything
/// unrecognised becomes [`BatteryChemistry::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BatteryChemistry {
    /// Nickel manganese cobalt.
    Nmc,
    /// Lithium iron phosphate.
    Lfp,
    /// Nickel cobalt aluminium.
    Nca,
    /// Lithium manganese iron phosphate.
    Lmfp,
    /// Unknown or unlisted chemistry.
    Other,
}

impl BatteryChemistry {
    /// Canonical upper-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nmc => "NMC",
            Self::Lfp => "LFP",
            Self::Nca => "NCA",
            Self::Lmfp => "LMFP",
            Self::Other => "other",
        }
    }

    /// Whether the chemistry takes the extra cold-weather capacity penalty.
    pub fn is_lfp(self) -> bool {
        self == Self::Lfp
    }
}

impl From<&str> for BatteryChemistry {
    fn from(label: &str) -> Self {
        let upper = label.to_uppercase();
        if upper.contains("LMFP") {
            Self::Lmfp
        } else if upper.contains("LFP") {
            Self::Lfp
        } else if upper.contains("NMC") {
            Self::Nmc
        } else if upper.contains("NCA") {
            Self::Nca
        } else {
            Self::Other
        }
    }
}

impl From<String> for BatteryChemistry {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<BatteryChemistry> for String {
    fn from(chem: BatteryChemistry) -> Self {
        chem.as_str().to_string()
    }
}

impl fmt::Display for BatteryChemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical description of one vehicle variant.
///
/// Built fresh per request and never mutated. Callers are responsible for
/// positive mass, frontal area and battery capacity; the engine does not
/// re-validate (see [`crate::config::VehicleConfig`] for a validating path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    /// Net (usable) battery energy (kWh).
    pub battery_net_kwh: f64,
    /// Curb weight without driver (kg).
    pub curb_weight_kg: f64,
    /// Aerodynamic drag coefficient.
    pub cd: f64,
    /// Frontal area (m²).
    pub frontal_area_m2: f64,
    /// Rolling-resistance coefficient.
    pub crr: f64,
    /// Heat pump fitted (reduces cabin heating draw in cold scenarios).
    pub has_heat_pump: bool,
    /// Cell chemistry.
    pub battery_chemistry: BatteryChemistry,
}

impl VehicleParams {
    /// Curb weight plus driver (kg).
    pub fn effective_mass_kg(&self) -> f64 {
        self.curb_weight_kg + DRIVER_MASS_KG
    }
}
