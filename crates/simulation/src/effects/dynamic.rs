//! Dynamically recalculated effect values.
//!
//! Each `DynamicCalculation` maps to a pure formula over `DynamicInputs`. The
//! propagation engine evaluates it once at spread time and records the result,
//! so a later stop removes exactly what was added.

use serde::{Deserialize, Serialize};

use crate::config::NEARBY_RESIDENTS_SATURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DynamicCalculation {
    /// Magnitude scaled by the source building's last efficiency.
    ScaledByEfficiency,
    /// Magnitude scaled by residents living inside the effect radius.
    ScaledByNearbyResidents,
}

/// Inputs gathered by the propagation engine for the source building.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DynamicInputs {
    pub efficiency: f64,
    pub nearby_residents: u32,
}

pub type DynamicFormula = fn(f64, &DynamicInputs) -> f64;

fn scaled_by_efficiency(magnitude: f64, inputs: &DynamicInputs) -> f64 {
    magnitude * inputs.efficiency.clamp(0.0, 1.0)
}

fn scaled_by_nearby_residents(magnitude: f64, inputs: &DynamicInputs) -> f64 {
    let saturation = (inputs.nearby_residents as f64 / NEARBY_RESIDENTS_SATURATION).min(1.0);
    magnitude * saturation
}

impl DynamicCalculation {
    pub fn formula(self) -> DynamicFormula {
        match self {
            DynamicCalculation::ScaledByEfficiency => scaled_by_efficiency,
            DynamicCalculation::ScaledByNearbyResidents => scaled_by_nearby_residents,
        }
    }

    pub fn evaluate(self, magnitude: f64, inputs: &DynamicInputs) -> f64 {
        (self.formula())(magnitude, inputs)
    }
}
