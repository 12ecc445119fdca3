// ---------------------------------------------------------------------------
// Serialization: the versioned city snapshot and its byte encoding
// ---------------------------------------------------------------------------

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use simulation::budget::Budget;
use simulation::buildings::Building;
use simulation::city::City;
use simulation::effects::{AppliedEffect, CellTotals, EffectTotals};
use simulation::grid::Grid;
use simulation::research::ResearchState;

use crate::file_header::{unwrap_payload, wrap_compressed};
use crate::save_error::SaveError;

/// Current save schema version.
/// v1: grid, buildings, budget, research, effect totals + ledger, extensions.
pub const SAVE_VERSION: u32 = 1;

/// Largest drift tolerated between saved cell totals and the ledger's sum.
const TOTALS_TOLERANCE: f64 = 1e-6;

/// Everything needed to rebuild a `City`, plus opaque extension blobs from
/// the `SaveableRegistry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySave {
    pub version: u32,
    pub id: u64,
    pub name: String,
    pub grid: Grid,
    pub buildings: Vec<Building>,
    pub budget: Budget,
    pub research: ResearchState,
    pub effect_totals: Vec<CellTotals>,
    pub applied_effects: Vec<AppliedEffect>,
    pub next_id: u32,
    pub day: u32,
    #[serde(default)]
    pub extensions: BTreeMap<String, Vec<u8>>,
}

/// A restored city and the extension blobs saved alongside it.
#[derive(Debug, Clone)]
pub struct LoadedCity {
    pub city: City,
    pub extensions: BTreeMap<String, Vec<u8>>,
}

impl CitySave {
    pub fn capture(city: &City) -> Self {
        Self {
            version: SAVE_VERSION,
            id: city.id(),
            name: city.name().to_string(),
            grid: city.grid().clone(),
            buildings: city.buildings().cloned().collect(),
            budget: city.budget.clone(),
            research: city.research.clone(),
            effect_totals: city.effects().all_totals().to_vec(),
            applied_effects: city.effects().applied().cloned().collect(),
            next_id: city.next_id().0,
            day: city.day,
            extensions: BTreeMap::new(),
        }
    }

    pub fn with_extensions(mut self, extensions: BTreeMap<String, Vec<u8>>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Validates the snapshot and rebuilds the city from it.
    pub fn restore(self) -> Result<LoadedCity, SaveError> {
        if self.version > SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected_max: SAVE_VERSION,
                found: self.version,
            });
        }
        if self.version == 0 {
            return Err(SaveError::Corrupt("save version 0".to_string()));
        }

        let (width, height) = (self.grid.width, self.grid.height);
        let cell_count = width
            .checked_mul(height)
            .ok_or_else(|| SaveError::Corrupt(format!("grid {width}x{height} overflows")))?;
        if self.grid.cells.len() != cell_count {
            return Err(SaveError::Corrupt(format!(
                "grid has {} cells, expected {cell_count}",
                self.grid.cells.len()
            )));
        }

        let live: BTreeSet<_> = self.buildings.iter().map(|b| b.id).collect();
        if let Some(orphan) = self
            .applied_effects
            .iter()
            .find(|applied| !live.contains(&applied.effect.source))
        {
            return Err(SaveError::Corrupt(format!(
                "effect from missing building {}",
                orphan.effect.source
            )));
        }

        let effects =
            EffectTotals::from_saved(width, height, self.effect_totals, self.applied_effects)
                .ok_or_else(|| SaveError::Corrupt("effect totals do not fit the grid".to_string()))?;
        check_totals(&effects)?;

        let city = City::from_parts(
            self.id,
            self.name,
            self.grid,
            self.buildings,
            self.budget,
            self.research,
            effects,
            self.day,
            self.next_id,
        )?;
        Ok(LoadedCity {
            city,
            extensions: self.extensions,
        })
    }
}

/// The saved totals must equal the sum of the ledger they came from.
fn check_totals(effects: &EffectTotals) -> Result<(), SaveError> {
    let recomputed = effects.recomputed_totals();
    for (index, (saved, expected)) in effects.all_totals().iter().zip(&recomputed).enumerate() {
        if saved
            .iter()
            .zip(expected)
            .any(|(a, b)| !a.is_finite() || (a - b).abs() > TOTALS_TOLERANCE)
        {
            return Err(SaveError::Corrupt(format!(
                "effect totals at cell {index} disagree with the ledger"
            )));
        }
    }
    Ok(())
}

/// JSON-encodes a snapshot, compresses it and wraps it in the file header.
pub fn serialize_city(save: &CitySave) -> Result<Vec<u8>, SaveError> {
    let json = serde_json::to_vec(save).map_err(|e| SaveError::Encode(e.to_string()))?;
    wrap_compressed(&json)
}

/// Inverse of [`serialize_city`]. Does not validate the city itself; call
/// [`CitySave::restore`] for that.
pub fn deserialize_city(bytes: &[u8]) -> Result<CitySave, SaveError> {
    let json = unwrap_payload(bytes)?;
    Ok(serde_json::from_slice(&json)?)
}

pub fn encode_city(
    city: &City,
    extensions: BTreeMap<String, Vec<u8>>,
) -> Result<Vec<u8>, SaveError> {
    serialize_city(&CitySave::capture(city).with_extensions(extensions))
}

pub fn decode_city(bytes: &[u8]) -> Result<LoadedCity, SaveError> {
    deserialize_city(bytes)?.restore()
}

#[cfg(test)]
mod tests_corruption;
#[cfg(test)]
mod tests_roundtrip;
