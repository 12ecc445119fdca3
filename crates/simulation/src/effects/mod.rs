//! Effect model and radius-based propagation.

mod dynamic;
pub mod propagation;
mod totals;
mod types;

pub use dynamic::{DynamicCalculation, DynamicFormula, DynamicInputs};
pub use propagation::{
    affected_cells, apply_building_effects, effect_radius, max_effect_radius,
    refresh_building_effects, refresh_dynamic_effects, spread_effect, stop_building_effects,
    stop_effects, update_dynamic_effects,
};
pub use totals::{AppliedEffect, CellTotals, EffectTotals};
pub use types::{Effect, EffectDefinition, EffectType, RadiusMode};
