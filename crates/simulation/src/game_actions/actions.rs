use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::budget::{ImportResource, ServiceCategory, TaxCategory};
use crate::buildings::{BuildingId, BuildingKind};
use crate::research::Technology;

/// The only way outside callers mutate a city. Coordinates are the anchor
/// (top-left) tile of the footprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Encode, Decode)]
pub enum GameAction {
    Build {
        kind: BuildingKind,
        x: u32,
        y: u32,
    },
    /// Removes a building and refunds part of its cost.
    Remove {
        building: BuildingId,
    },
    /// Clears whatever covers the tile, for a per-tile fee.
    Demolish {
        x: u32,
        y: u32,
    },
    Move {
        building: BuildingId,
        x: u32,
        y: u32,
    },
    SetTaxRate {
        category: TaxCategory,
        rate: f32,
    },
    SetServiceAllocation {
        service: ServiceCategory,
        allocation: f32,
    },
    SetImportLimit {
        resource: ImportResource,
        limit: f64,
    },
    StartResearch {
        technology: Technology,
    },
    SetPaused {
        paused: bool,
    },
    SetSpeed {
        speed: u32,
    },
}
